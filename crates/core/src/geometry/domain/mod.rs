pub mod capture_metadata;
pub mod fov_bounds;
pub mod temporal;
