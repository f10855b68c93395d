use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::catalog::domain::model_loader::{ModelFetched, ModelLoader};
use crate::catalog::domain::model_source::ModelSource;

/// Fetches detection models on background threads.
///
/// Each request runs on its own short-lived thread and reports through an
/// unbounded channel, so `request` never blocks the caller. Results are
/// never cancelled; late arrivals are simply drained later.
pub struct ThreadedModelLoader {
    source: Arc<dyn ModelSource>,
    done_tx: Sender<ModelFetched>,
    done_rx: Receiver<ModelFetched>,
    in_flight: usize,
}

impl ThreadedModelLoader {
    pub fn new(source: Arc<dyn ModelSource>) -> Self {
        let (done_tx, done_rx) = crossbeam_channel::unbounded();
        Self {
            source,
            done_tx,
            done_rx,
            in_flight: 0,
        }
    }
}

impl ModelLoader for ThreadedModelLoader {
    fn request(&mut self, frame_id: &str) {
        let source = Arc::clone(&self.source);
        let tx = self.done_tx.clone();
        let frame_id = frame_id.to_string();
        self.in_flight += 1;
        thread::spawn(move || {
            let result = source.fetch(&frame_id);
            // The receiver lives as long as the loader; a send error only
            // means the loader was dropped.
            let _ = tx.send(ModelFetched { frame_id, result });
        });
    }

    fn drain_completed(&mut self) -> Vec<ModelFetched> {
        let done: Vec<ModelFetched> = self.done_rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }
}
