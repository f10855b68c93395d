use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    BLINK_PERIOD_MS, CONFIG_DIR_NAME, CONFIG_FILE_NAME, FOV_HEIGHT_DEG, FOV_WIDTH_DEG,
    NEIGHBOR_WINDOW_SECS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Angular size of every snapshot's field of view.
///
/// Constant across frames regardless of the zoom encoded in the filename.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    pub width_deg: f64,
    pub height_deg: f64,
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self {
            width_deg: FOV_WIDTH_DEG,
            height_deg: FOV_HEIGHT_DEG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub field_of_view: FieldOfView,
    pub neighbor_window_secs: i64,
    pub blink_period_ms: u64,
    /// When set, native boxes of the displayed frame are deduplicated by
    /// plain IoU before clustering.
    pub same_frame_iou_threshold: Option<f64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            field_of_view: FieldOfView::default(),
            neighbor_window_secs: NEIGHBOR_WINDOW_SECS,
            blink_period_ms: BLINK_PERIOD_MS,
            same_frame_iou_threshold: None,
        }
    }
}

impl OverlayConfig {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the user config, falling back to defaults when it is absent
    /// or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_relative_eq!(config.field_of_view.width_deg, 7.75);
        assert_relative_eq!(config.field_of_view.height_deg, 4.5);
        assert_eq!(config.neighbor_window_secs, 15);
        assert_eq!(config.blink_period(), Duration::from_millis(500));
        assert!(config.same_frame_iou_threshold.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"neighbor_window_secs": 30}"#).unwrap();

        let config = OverlayConfig::from_path(&path).unwrap();

        assert_eq!(config.neighbor_window_secs, 30);
        assert_eq!(config.field_of_view, FieldOfView::default());
        assert_eq!(config.blink_period_ms, 500);
    }

    #[test]
    fn test_field_of_view_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{"field_of_view": {"width_deg": 10.0, "height_deg": 6.0}, "same_frame_iou_threshold": 0.5}"#,
        )
        .unwrap();

        let config = OverlayConfig::from_path(&path).unwrap();

        assert_relative_eq!(config.field_of_view.width_deg, 10.0);
        assert_relative_eq!(config.field_of_view.height_deg, 6.0);
        assert_eq!(config.same_frame_iou_threshold, Some(0.5));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result = OverlayConfig::from_path(&tmp.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let result = OverlayConfig::from_path(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_serialization_roundtrip_of_defaults() {
        let json = serde_json::to_string(&OverlayConfig::default()).unwrap();
        let parsed: OverlayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OverlayConfig::default());
    }
}
