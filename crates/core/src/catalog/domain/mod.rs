pub mod model_loader;
pub mod model_source;
