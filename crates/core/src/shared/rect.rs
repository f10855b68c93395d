use serde::Serialize;

use crate::shared::constants::CLUSTER_OVERLAP_RATIO;

/// Axis-aligned rectangle in some frame's pixel space.
///
/// Which space (natural or display, current or neighbor) is up to the
/// owner; the rectangle itself carries no frame reference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Intersection rectangle, or `None` when the two do not share any area.
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(PixelRect::new(x1, y1, x2 - x1, y2 - y1))
    }

    /// Cross-frame "same face" test.
    ///
    /// The intersection must cover more than half of the narrower box along
    /// each axis independently. Not an IoU test: a small box sitting inside a
    /// large one passes here while its IoU may be tiny.
    pub fn overlaps_majority(&self, other: &PixelRect) -> bool {
        let Some(inter) = self.intersection(other) else {
            return false;
        };
        let width_overlap = inter.width / self.width.min(other.width);
        let height_overlap = inter.height / self.height.min(other.height);
        width_overlap > CLUSTER_OVERLAP_RATIO && height_overlap > CLUSTER_OVERLAP_RATIO
    }

    pub fn iou(&self, other: &PixelRect) -> f64 {
        let Some(inter) = self.intersection(other) else {
            return 0.0;
        };
        let inter_area = inter.area();
        inter_area / (self.area() + other.area() - inter_area)
    }

    /// True when `other` lies entirely within `self`, edges included.
    pub fn contains(&self, other: &PixelRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
