use std::collections::HashSet;
use std::time::Instant;

use crate::catalog::domain::model_loader::ModelLoader;
use crate::clustering::domain::box_clusterer::BoxClusterer;
use crate::clustering::domain::cluster::ClusterId;
use crate::pipeline::overlay_snapshot::OverlaySnapshot;
use crate::projection::domain::box_projector::CrossFrameProjector;
use crate::projection::domain::projected_box::ProjectedBox;
use crate::selection::domain::selection_controller::{SelectionController, SelectionEvent};
use crate::shared::config::OverlayConfig;
use crate::shared::frame::{Detections, Dimensions, Frame};
use crate::shared::model_payload::parse_payload;

/// Drives the overlay for whichever image the operator is looking at.
///
/// Every state change (image switch, new image set, resize, arriving
/// detection model) triggers a full recomputation:
/// `project → cluster → reconcile selection`. The selection check always
/// runs against the freshly built cluster set.
///
/// Missing detection models are requested through the [`ModelLoader`] at
/// most once per displayed image; the requested set is cleared on every
/// image switch.
pub struct OverlaySession {
    projector: CrossFrameProjector,
    clusterer: BoxClusterer,
    same_frame_iou_threshold: Option<f64>,
    loader: Box<dyn ModelLoader>,
    frames: Vec<Frame>,
    current: Option<String>,
    requested: HashSet<String>,
    selection: SelectionController,
    snapshot: OverlaySnapshot,
}

impl OverlaySession {
    pub fn new(config: &OverlayConfig, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            projector: CrossFrameProjector::from_config(config),
            clusterer: BoxClusterer::new(),
            same_frame_iou_threshold: config.same_frame_iou_threshold,
            loader,
            frames: Vec::new(),
            current: None,
            requested: HashSet::new(),
            selection: SelectionController::new(config.blink_period()),
            snapshot: OverlaySnapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &OverlaySnapshot {
        &self.snapshot
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn selected(&self) -> Option<&ClusterId> {
        self.selection.selected()
    }

    pub fn blink_opacity(&self, now: Instant) -> f32 {
        self.selection.blink_opacity(now)
    }

    pub fn models_in_flight(&self) -> usize {
        self.loader.in_flight()
    }

    /// Replaces the active image set.
    ///
    /// Detections already loaded for a frame survive when the provider
    /// hands the same frame back without them.
    pub fn set_frames(&mut self, frames: Vec<Frame>) -> Option<SelectionEvent> {
        let previous = std::mem::take(&mut self.frames);
        self.frames = frames
            .into_iter()
            .map(|frame| {
                if frame.is_loaded() {
                    return frame;
                }
                match previous
                    .iter()
                    .find(|p| p.identifier() == frame.identifier() && p.is_loaded())
                {
                    Some(cached) => frame.with_detections(cached.detections().clone()),
                    None => frame,
                }
            })
            .collect();
        self.recompute()
    }

    pub fn show_image(&mut self, frame_id: &str) -> Option<SelectionEvent> {
        log::info!("Showing {frame_id}");
        self.current = Some(frame_id.to_string());
        self.requested.clear();
        self.recompute()
    }

    /// Applies a new display size to the current frame.
    pub fn resize(&mut self, display: Dimensions) -> Option<SelectionEvent> {
        if let Some(i) = self.current_index() {
            self.frames[i] = self.frames[i].with_display(display);
        }
        self.recompute()
    }

    /// Stores detections for a frame and recomputes.
    ///
    /// Results for frames no longer in the image set are dropped.
    pub fn apply_model(&mut self, frame_id: &str, detections: Detections) -> Option<SelectionEvent> {
        if !self.store_detections(frame_id, detections) {
            return None;
        }
        self.recompute()
    }

    /// Collects finished fetches from the loader, recomputing once if any
    /// of them changed the image set.
    ///
    /// A failed fetch counts as an empty detection list.
    pub fn poll_models(&mut self) -> Option<SelectionEvent> {
        let mut changed = false;
        for fetched in self.loader.drain_completed() {
            let detections = match fetched.result {
                Ok(payload) => parse_payload(&payload),
                Err(e) => {
                    log::warn!("Detection model unavailable: {e}");
                    Detections::Loaded(Vec::new())
                }
            };
            changed |= self.store_detections(&fetched.frame_id, detections);
        }
        if changed {
            self.recompute()
        } else {
            None
        }
    }

    pub fn click(&mut self, id: &ClusterId, now: Instant) -> Option<SelectionEvent> {
        self.selection.click(id, &self.snapshot.clusters, now)
    }

    fn current_index(&self) -> Option<usize> {
        let current = self.current.as_deref()?;
        self.frames.iter().position(|f| f.identifier() == current)
    }

    fn store_detections(&mut self, frame_id: &str, detections: Detections) -> bool {
        match self.frames.iter().position(|f| f.identifier() == frame_id) {
            Some(i) => {
                self.frames[i] = self.frames[i].with_detections(detections);
                true
            }
            None => {
                log::debug!("Dropping detections for {frame_id}: not in image set");
                false
            }
        }
    }

    fn recompute(&mut self) -> Option<SelectionEvent> {
        let (snapshot, missing) = match self.current_index() {
            Some(i) => self.build_snapshot(&self.frames[i]),
            None => (OverlaySnapshot::default(), Vec::new()),
        };

        for frame_id in missing {
            if self.requested.insert(frame_id.clone()) {
                log::debug!("Requesting detections for {frame_id}");
                self.loader.request(&frame_id);
            }
        }

        self.snapshot = snapshot;
        self.selection.reconcile(&self.snapshot.clusters)
    }

    fn build_snapshot(&self, current: &Frame) -> (OverlaySnapshot, Vec<String>) {
        let projection = self.projector.project(current, &self.frames);

        let native = match self.same_frame_iou_threshold {
            Some(threshold) => ProjectedBox::deduplicate(&projection.native, threshold),
            None => projection.native,
        };

        let mut boxes = native.clone();
        boxes.extend(projection.projected);
        let clusters = self.clusterer.cluster(&boxes);
        log::debug!(
            "{}: {} boxes in {} clusters",
            current.identifier(),
            boxes.len(),
            clusters.len()
        );

        let snapshot = OverlaySnapshot {
            frame: Some(current.identifier().to_string()),
            caption: current.pan_tilt_zoom().map(|ptz| ptz.to_string()),
            native_boxes: native,
            grey_boxes: projection.grey_boxes,
            clusters,
        };
        (snapshot, projection.missing)
    }
}
