use serde::Serialize;

use crate::clustering::domain::cluster::ClusterSet;
use crate::projection::domain::box_projector::GreyBox;
use crate::projection::domain::projected_box::ProjectedBox;

/// Everything the renderer needs for one displayed frame.
///
/// Rebuilt from scratch on every recomputation; never patched in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    pub frame: Option<String>,
    /// `Pan: ..° Tilt: ..° Zoom: ..` caption, when the name carries it.
    pub caption: Option<String>,
    pub native_boxes: Vec<ProjectedBox>,
    pub grey_boxes: Vec<GreyBox>,
    pub clusters: ClusterSet,
}
