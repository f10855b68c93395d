//! Boundary parsing of detection model payloads.
//!
//! Payloads are JSON documents of the form
//! `{"embeddings": [{"facial_area": {"x", "y", "w", "h"}, "confidence": 0.9, ...}]}`.
//! Anything malformed degrades to an empty detection list.

use serde::Deserialize;

use crate::shared::frame::{Detections, FaceDetection, FacialArea};

#[derive(Deserialize)]
struct ModelPayload {
    #[serde(default)]
    embeddings: Option<Vec<Option<EmbeddingEntry>>>,
}

#[derive(Deserialize)]
struct EmbeddingEntry {
    #[serde(default)]
    facial_area: Option<RawFacialArea>,
    #[serde(default, alias = "face_confidence")]
    confidence: Option<f64>,
}

/// Coordinates may be absent or `null`; both read as 0.
#[derive(Deserialize)]
struct RawFacialArea {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    w: Option<f64>,
    #[serde(default)]
    h: Option<f64>,
}

impl From<RawFacialArea> for FacialArea {
    fn from(raw: RawFacialArea) -> Self {
        FacialArea {
            x: raw.x.unwrap_or(0.0),
            y: raw.y.unwrap_or(0.0),
            w: raw.w.unwrap_or(0.0),
            h: raw.h.unwrap_or(0.0),
        }
    }
}

/// Parses a payload into detections. Entries without a facial area are
/// skipped but still consume their index.
pub fn parse_detections(payload: &str) -> Vec<FaceDetection> {
    let parsed: ModelPayload = match serde_json::from_str(payload) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Ignoring malformed detection payload: {e}");
            return Vec::new();
        }
    };

    let Some(entries) = parsed.embeddings else {
        log::warn!("Detection payload has no embeddings list");
        return Vec::new();
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let entry = entry?;
            Some(FaceDetection {
                index,
                facial_area: entry.facial_area?.into(),
                confidence: entry.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
            })
        })
        .collect()
}

pub fn parse_payload(payload: &str) -> Detections {
    Detections::Loaded(parse_detections(payload))
}
