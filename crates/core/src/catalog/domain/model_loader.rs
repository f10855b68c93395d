use crate::catalog::domain::model_source::ModelFetchError;

/// A finished fetch, successful or not.
#[derive(Debug)]
pub struct ModelFetched {
    pub frame_id: String,
    pub result: Result<String, ModelFetchError>,
}

/// Domain interface for fire-and-forget detection model fetches.
///
/// `request` must return immediately. Completed fetches are collected by
/// the caller through `drain_completed`, which never blocks.
pub trait ModelLoader: Send {
    fn request(&mut self, frame_id: &str);

    fn drain_completed(&mut self) -> Vec<ModelFetched>;

    /// Requests issued but not yet drained.
    fn in_flight(&self) -> usize;
}
