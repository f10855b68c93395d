use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::domain::model_source::{ModelFetchError, ModelSource};
use crate::shared::constants::MODEL_EXTENSION;

/// Reads detection payloads from `<stem>.json` files next to the images.
pub struct FileModelSource {
    dir: PathBuf,
}

impl FileModelSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self, frame_id: &str) -> Option<PathBuf> {
        // Stems often contain dots (`tilt1.0`), so append rather than
        // replace an extension.
        let mut name = Path::new(frame_id).file_stem()?.to_os_string();
        name.push(".");
        name.push(MODEL_EXTENSION);
        Some(self.dir.join(name))
    }
}

impl ModelSource for FileModelSource {
    fn fetch(&self, frame_id: &str) -> Result<String, ModelFetchError> {
        let path = self
            .model_path(frame_id)
            .ok_or_else(|| ModelFetchError::NotFound(frame_id.to_string()))?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModelFetchError::NotFound(frame_id.to_string()),
            _ => ModelFetchError::Read { path, source: e },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_sidecar_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("64_pan1_tilt2.json"), r#"{"embeddings": []}"#).unwrap();
        let source = FileModelSource::new(tmp.path());

        let payload = source.fetch("64_pan1_tilt2.jpg").unwrap();

        assert_eq!(payload, r#"{"embeddings": []}"#);
    }

    #[test]
    fn test_missing_sidecar_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = FileModelSource::new(tmp.path());
        let result = source.fetch("absent.jpg");
        assert!(matches!(result, Err(ModelFetchError::NotFound(id)) if id == "absent.jpg"));
    }

    #[test]
    fn test_model_path_keeps_dotted_stem() {
        let source = FileModelSource::new("/data");
        assert_eq!(
            source.model_path("1_pan-3.5_tilt1.0.jpg"),
            Some(PathBuf::from("/data/1_pan-3.5_tilt1.0.json"))
        );
    }
}
