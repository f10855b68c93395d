use serde::{Deserialize, Serialize};

use crate::geometry::domain::capture_metadata::{
    extract_capture_time, extract_pan_tilt, extract_pan_tilt_zoom, PanTilt, PanTiltZoom,
};
use crate::shared::constants::WHOLE_IMAGE_TOLERANCE_PX;
use crate::shared::rect::PixelRect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Face rectangle in the owning frame's natural pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FacialArea {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

impl FacialArea {
    pub fn to_rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.w, self.h)
    }

    /// Detectors emit a box covering the entire image when they find
    /// nothing; such boxes must never take part in geometry.
    pub fn is_whole_image(&self, natural: Dimensions) -> bool {
        (self.w - natural.width as f64).abs() <= WHOLE_IMAGE_TOLERANCE_PX
            && (self.h - natural.height as f64).abs() <= WHOLE_IMAGE_TOLERANCE_PX
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceDetection {
    /// Position in the frame's detection list.
    pub index: usize,
    pub facial_area: FacialArea,
    pub confidence: f64,
}

/// Detection list of a frame, which may still be on its way.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Detections {
    #[default]
    NotLoaded,
    Loaded(Vec<FaceDetection>),
}

/// Immutable snapshot of one PTZ image.
///
/// Camera metadata is parsed from the identifier once at construction;
/// consumers never re-parse it.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    identifier: String,
    pan_tilt_zoom: Option<PanTiltZoom>,
    pan_tilt: Option<PanTilt>,
    captured_at: Option<i64>,
    natural: Dimensions,
    display: Dimensions,
    detections: Detections,
}

impl Frame {
    pub fn new(
        identifier: impl Into<String>,
        natural: Dimensions,
        display: Dimensions,
        detections: Detections,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            pan_tilt_zoom: extract_pan_tilt_zoom(&identifier),
            pan_tilt: extract_pan_tilt(&identifier),
            captured_at: extract_capture_time(&identifier),
            identifier,
            natural,
            display,
            detections,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn pan_tilt(&self) -> Option<PanTilt> {
        self.pan_tilt
    }

    pub fn pan_tilt_zoom(&self) -> Option<PanTiltZoom> {
        self.pan_tilt_zoom
    }

    pub fn captured_at(&self) -> Option<i64> {
        self.captured_at
    }

    pub fn natural(&self) -> Dimensions {
        self.natural
    }

    pub fn display(&self) -> Dimensions {
        self.display
    }

    pub fn detections(&self) -> &Detections {
        &self.detections
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.detections, Detections::Loaded(_))
    }

    /// Detections usable for geometry: loaded, and not whole-image artifacts.
    ///
    /// Returns `None` while the detection list has not arrived.
    pub fn face_detections(&self) -> Option<Vec<&FaceDetection>> {
        match &self.detections {
            Detections::NotLoaded => None,
            Detections::Loaded(list) => Some(
                list.iter()
                    .filter(|d| !d.facial_area.is_whole_image(self.natural))
                    .collect(),
            ),
        }
    }

    pub fn with_display(&self, display: Dimensions) -> Frame {
        Frame {
            display,
            ..self.clone()
        }
    }

    pub fn with_detections(&self, detections: Detections) -> Frame {
        Frame {
            detections,
            ..self.clone()
        }
    }
}
