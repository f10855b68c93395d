use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelFetchError {
    #[error("no detection model for {0}")]
    NotFound(String),
    #[error("failed to read detection model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for retrieving a frame's raw detection payload.
///
/// Implementations block; callers that must not block go through a
/// [`ModelLoader`](crate::catalog::domain::model_loader::ModelLoader).
pub trait ModelSource: Send + Sync {
    fn fetch(&self, frame_id: &str) -> Result<String, ModelFetchError>;
}
