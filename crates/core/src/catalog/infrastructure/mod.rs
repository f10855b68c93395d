pub mod directory_scanner;
pub mod file_model_source;
pub mod threaded_model_loader;
