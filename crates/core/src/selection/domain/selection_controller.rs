use std::time::{Duration, Instant};

use crate::clustering::domain::cluster::{ClusterId, ClusterSet};
use crate::selection::domain::blink_timer::BlinkTimer;
use crate::shared::face_label::face_label_key;
use crate::shared::frame::FacialArea;

/// The face the operator picked for labelling.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFace {
    pub cluster_id: ClusterId,
    pub source_frame: String,
    pub detection_index: usize,
    pub facial_area: FacialArea,
    pub label_key: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
    Selected(SelectedFace),
    Deselected(ClusterId),
}

/// Tracks which cluster is selected and keeps that choice honest across
/// recomputations.
///
/// The blink ticker follows selection transitions exactly: started on
/// select, restarted when a different cluster is picked, stopped on any
/// deselection.
pub struct SelectionController {
    selected: Option<ClusterId>,
    blink: BlinkTimer,
}

impl SelectionController {
    pub fn new(blink_period: Duration) -> Self {
        Self {
            selected: None,
            blink: BlinkTimer::new(blink_period),
        }
    }

    pub fn selected(&self) -> Option<&ClusterId> {
        self.selected.as_ref()
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_running()
    }

    pub fn blink_opacity(&self, now: Instant) -> f32 {
        self.blink.opacity(now)
    }

    /// Handles a click on a rendered key box.
    ///
    /// Clicking the selected cluster toggles it off; clicking any other
    /// cluster selects it. Ids absent from `clusters` are ignored.
    pub fn click(
        &mut self,
        id: &ClusterId,
        clusters: &ClusterSet,
        now: Instant,
    ) -> Option<SelectionEvent> {
        let Some(cluster) = clusters.get(id) else {
            log::debug!("Ignoring click on unknown cluster {id}");
            return None;
        };

        if self.selected.as_ref() == Some(id) {
            return self.clear();
        }

        let key = cluster.key_box();
        self.selected = Some(id.clone());
        self.blink.start(now);
        Some(SelectionEvent::Selected(SelectedFace {
            cluster_id: id.clone(),
            source_frame: key.source_frame.clone(),
            detection_index: key.detection_index,
            facial_area: key.facial_area,
            label_key: face_label_key(&key.source_frame, &key.facial_area),
        }))
    }

    /// Drops the selection if its cluster vanished from a fresh run.
    ///
    /// Must be called with the cluster set of the latest recomputation.
    pub fn reconcile(&mut self, clusters: &ClusterSet) -> Option<SelectionEvent> {
        let selected = self.selected.as_ref()?;
        if clusters.contains(selected) {
            return None;
        }
        log::info!("Selected cluster {selected} disappeared; deselecting");
        self.clear()
    }

    pub fn clear(&mut self) -> Option<SelectionEvent> {
        self.blink.stop();
        self.selected.take().map(SelectionEvent::Deselected)
    }
}
