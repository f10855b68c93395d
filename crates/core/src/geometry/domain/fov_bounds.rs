use serde::Serialize;

use crate::geometry::domain::capture_metadata::PanTilt;
use crate::shared::config::FieldOfView;
use crate::shared::rect::PixelRect;

/// Angular rectangle, in degrees, captured by one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FovBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl FovBounds {
    pub fn from_pan_tilt(pan_tilt: PanTilt, field: FieldOfView) -> Self {
        let half_w = field.width_deg / 2.0;
        let half_h = field.height_deg / 2.0;
        Self {
            x_min: pan_tilt.pan - half_w,
            x_max: pan_tilt.pan + half_w,
            y_min: pan_tilt.tilt - half_h,
            y_max: pan_tilt.tilt + half_h,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Closed-interval overlap: bounds that only touch still overlap.
    pub fn overlaps(&self, other: &FovBounds) -> bool {
        !(self.x_max < other.x_min
            || self.x_min > other.x_max
            || self.y_max < other.y_min
            || self.y_min > other.y_max)
    }

    /// Shared angular region, or `None` when it has no area.
    pub fn intersect(&self, other: &FovBounds) -> Option<FovBounds> {
        let x_min = self.x_min.max(other.x_min);
        let x_max = self.x_max.min(other.x_max);
        let y_min = self.y_min.max(other.y_min);
        let y_max = self.y_max.min(other.y_max);
        if x_min >= x_max || y_min >= y_max {
            return None;
        }
        Some(FovBounds {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

/// Maps angular `bounds` into the pixel space of the frame at `frame`.
///
/// Both axes are mirrored: the camera mounting puts larger pan angles
/// toward the left of the image and larger tilt angles toward the top.
/// The result is clamped to the `width` x `height` image and `None` when
/// nothing of it remains visible.
pub fn to_pixel_rect(
    bounds: &FovBounds,
    frame: PanTilt,
    field: FieldOfView,
    width: f64,
    height: f64,
) -> Option<PixelRect> {
    let frame_fov = FovBounds::from_pan_tilt(frame, field);
    let px_per_deg_x = width / field.width_deg;
    let px_per_deg_y = height / field.height_deg;

    let x_min_px = (bounds.x_min - frame_fov.x_min) * px_per_deg_x;
    let x_max_px = (bounds.x_max - frame_fov.x_min) * px_per_deg_x;
    let y_min_px = (bounds.y_min - frame_fov.y_min) * px_per_deg_y;
    let y_max_px = (bounds.y_max - frame_fov.y_min) * px_per_deg_y;

    let x1 = (width - x_max_px).clamp(0.0, width);
    let x2 = (width - x_min_px).clamp(0.0, width);
    let y1 = (height - y_max_px).clamp(0.0, height);
    let y2 = (height - y_min_px).clamp(0.0, height);

    let w = x2 - x1;
    let h = y2 - y1;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(PixelRect::new(x1, y1, w, h))
}
