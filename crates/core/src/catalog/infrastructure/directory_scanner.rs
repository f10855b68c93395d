use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::{Detections, Dimensions, Frame};

#[derive(Error, Debug)]
pub enum FrameScanError {
    #[error("failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lists the PTZ snapshots in a directory as frames with unloaded
/// detections, sorted by file name.
///
/// Natural dimensions come from the image header. Files whose header
/// cannot be read are skipped with a warning. `display` overrides the
/// displayed size of every frame; by default frames display at natural size.
pub fn scan_directory(dir: &Path, display: Option<Dimensions>) -> Result<Vec<Frame>, FrameScanError> {
    let entries = fs::read_dir(dir).map_err(|e| FrameScanError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .collect();
    paths.sort();

    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let natural = match image::image_dimensions(&path) {
            Ok((width, height)) => Dimensions::new(width, height),
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        frames.push(Frame::new(
            name,
            natural,
            display.unwrap_or(natural),
            Detections::NotLoaded,
        ));
    }
    Ok(frames)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
