pub mod config;
pub mod constants;
pub mod face_label;
pub mod frame;
pub mod model_payload;
pub mod rect;
