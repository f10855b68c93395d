use serde::Serialize;

use crate::geometry::domain::capture_metadata::PanTilt;
use crate::geometry::domain::fov_bounds::{to_pixel_rect, FovBounds};
use crate::geometry::domain::temporal::is_temporal_neighbor;
use crate::projection::domain::projected_box::ProjectedBox;
use crate::shared::config::{FieldOfView, OverlayConfig};
use crate::shared::frame::Frame;
use crate::shared::rect::PixelRect;

/// Region of the displayed frame that a neighbor frame also captured.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GreyBox {
    pub neighbor: String,
    pub rect: PixelRect,
}

/// Everything the displayed frame can currently see, in display pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    pub native: Vec<ProjectedBox>,
    pub projected: Vec<ProjectedBox>,
    pub grey_boxes: Vec<GreyBox>,
    /// Frames that qualify but whose detections have not arrived yet.
    pub missing: Vec<String>,
}

/// Maps face boxes from overlapping neighbor frames into the displayed
/// frame's pixel space.
///
/// The angular overlap of the two frames is rendered once in each frame's
/// pixels; the pair of rectangles defines the scale and offset that carry
/// a neighbor box across.
pub struct CrossFrameProjector {
    field: FieldOfView,
    window_secs: i64,
}

impl CrossFrameProjector {
    pub fn new(field: FieldOfView, window_secs: i64) -> Self {
        Self { field, window_secs }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.field_of_view, config.neighbor_window_secs)
    }

    /// Native boxes of `current`, scaled from natural to display pixels.
    pub fn native_boxes(&self, current: &Frame) -> Vec<ProjectedBox> {
        let Some(detections) = current.face_detections() else {
            return Vec::new();
        };
        let natural = current.natural();
        if natural.width == 0 || natural.height == 0 {
            return Vec::new();
        }
        let display = current.display();
        let scale_x = display.width as f64 / natural.width as f64;
        let scale_y = display.height as f64 / natural.height as f64;

        detections
            .into_iter()
            .map(|d| {
                let area = d.facial_area;
                ProjectedBox {
                    source_frame: current.identifier().to_string(),
                    detection_index: d.index,
                    confidence: d.confidence,
                    rect: PixelRect::new(
                        area.x * scale_x,
                        area.y * scale_y,
                        area.w * scale_x,
                        area.h * scale_y,
                    ),
                    facial_area: area,
                    is_native: true,
                }
            })
            .collect()
    }

    pub fn project(&self, current: &Frame, candidates: &[Frame]) -> Projection {
        let mut projection = Projection {
            native: self.native_boxes(current),
            ..Projection::default()
        };
        if !current.is_loaded() {
            projection.missing.push(current.identifier().to_string());
        }

        let Some(current_pt) = current.pan_tilt() else {
            log::debug!(
                "{} has no pan/tilt; showing native boxes only",
                current.identifier()
            );
            return projection;
        };
        let current_fov = FovBounds::from_pan_tilt(current_pt, self.field);

        for neighbor in candidates {
            if neighbor.identifier() == current.identifier() {
                continue;
            }
            let Some(neighbor_pt) = neighbor.pan_tilt() else {
                continue;
            };
            if !is_temporal_neighbor(
                current.captured_at(),
                neighbor.captured_at(),
                self.window_secs,
            ) {
                continue;
            }
            let neighbor_fov = FovBounds::from_pan_tilt(neighbor_pt, self.field);
            if !current_fov.overlaps(&neighbor_fov) {
                continue;
            }
            let Some(overlap) = current_fov.intersect(&neighbor_fov) else {
                continue;
            };

            let display = current.display();
            let Some(grey) = to_pixel_rect(
                &overlap,
                current_pt,
                self.field,
                display.width as f64,
                display.height as f64,
            ) else {
                continue;
            };
            projection.grey_boxes.push(GreyBox {
                neighbor: neighbor.identifier().to_string(),
                rect: grey,
            });

            if !neighbor.is_loaded() {
                projection.missing.push(neighbor.identifier().to_string());
                continue;
            }
            let boxes = self.project_neighbor(neighbor, neighbor_pt, &overlap, &grey);
            log::debug!(
                "{} contributes {} boxes to {}",
                neighbor.identifier(),
                boxes.len(),
                current.identifier()
            );
            projection.projected.extend(boxes);
        }

        projection
    }

    fn project_neighbor(
        &self,
        neighbor: &Frame,
        neighbor_pt: PanTilt,
        overlap: &FovBounds,
        grey: &PixelRect,
    ) -> Vec<ProjectedBox> {
        let natural = neighbor.natural();
        let Some(source) = to_pixel_rect(
            overlap,
            neighbor_pt,
            self.field,
            natural.width as f64,
            natural.height as f64,
        ) else {
            return Vec::new();
        };
        let Some(detections) = neighbor.face_detections() else {
            return Vec::new();
        };

        let scale_x = grey.width / source.width;
        let scale_y = grey.height / source.height;

        detections
            .into_iter()
            .filter(|d| source.contains(&d.facial_area.to_rect()))
            .map(|d| {
                let area = d.facial_area;
                ProjectedBox {
                    source_frame: neighbor.identifier().to_string(),
                    detection_index: d.index,
                    confidence: d.confidence,
                    rect: PixelRect::new(
                        grey.x + (area.x - source.x) * scale_x,
                        grey.y + (area.y - source.y) * scale_y,
                        area.w * scale_x,
                        area.h * scale_y,
                    ),
                    facial_area: area,
                    is_native: false,
                }
            })
            .collect()
    }
}
