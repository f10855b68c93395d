/// Horizontal angular field of a PTZ snapshot, in degrees.
pub const FOV_WIDTH_DEG: f64 = 7.75;
/// Vertical angular field of a PTZ snapshot, in degrees.
pub const FOV_HEIGHT_DEG: f64 = 4.5;

/// Max capture-time distance for two snapshots to be considered neighbors.
pub const NEIGHBOR_WINDOW_SECS: i64 = 15;

/// Selected key boxes alternate opacity at this period.
pub const BLINK_PERIOD_MS: u64 = 500;

/// Per-axis share of the narrower box an intersection must exceed for two
/// cross-frame boxes to be considered the same face.
pub const CLUSTER_OVERLAP_RATIO: f64 = 0.5;

/// Facial areas within this many pixels of the full image size on both axes
/// are detector artifacts, not faces.
pub const WHOLE_IMAGE_TOLERANCE_PX: f64 = 1.0;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

pub const MODEL_EXTENSION: &str = "json";

pub const CONFIG_DIR_NAME: &str = "ptz-overlap";
pub const CONFIG_FILE_NAME: &str = "config.json";
