use serde::Serialize;

use crate::shared::frame::FacialArea;
use crate::shared::rect::PixelRect;

/// A face box expressed in the displayed frame's pixel space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectedBox {
    pub source_frame: String,
    pub detection_index: usize,
    pub confidence: f64,
    pub rect: PixelRect,
    /// The detection's area in its source frame's natural pixels.
    pub facial_area: FacialArea,
    /// True when the box comes from the displayed frame itself.
    pub is_native: bool,
}

impl ProjectedBox {
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    /// Greedy same-frame deduplication: keeps a box only if its IoU with
    /// every previously-kept box is at or below the threshold.
    pub fn deduplicate(boxes: &[ProjectedBox], iou_threshold: f64) -> Vec<ProjectedBox> {
        if boxes.len() <= 1 {
            return boxes.to_vec();
        }
        let mut kept: Vec<ProjectedBox> = Vec::with_capacity(boxes.len());
        for b in boxes {
            let dominated = kept.iter().any(|k| b.rect.iou(&k.rect) > iou_threshold);
            if !dominated {
                kept.push(b.clone());
            }
        }
        kept
    }
}
