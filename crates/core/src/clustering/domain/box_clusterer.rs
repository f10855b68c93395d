use std::collections::HashSet;

use crate::clustering::domain::cluster::{Cluster, ClusterSet};
use crate::projection::domain::projected_box::ProjectedBox;

/// Groups boxes from several frames that show the same face.
///
/// Growth is a depth-first walk over the overlap graph with one extra
/// rule: a cluster accepts at most one box per source frame. Two faces in
/// the same photo therefore never merge, even when boxes from other frames
/// would bridge them.
#[derive(Default)]
pub struct BoxClusterer;

impl BoxClusterer {
    pub fn new() -> Self {
        Self
    }

    /// Clusters `boxes`, which must all be in the same pixel space.
    ///
    /// Seeds and candidates are visited in input order, so the result is
    /// deterministic for a given input.
    pub fn cluster(&self, boxes: &[ProjectedBox]) -> ClusterSet {
        let n = boxes.len();
        let mut assigned = vec![false; n];
        let mut clusters = Vec::new();

        for seed in 0..n {
            if assigned[seed] {
                continue;
            }
            assigned[seed] = true;

            let mut members = vec![seed];
            let mut sources: HashSet<&str> = HashSet::from([boxes[seed].source_frame.as_str()]);
            let mut stack = vec![seed];

            while let Some(current) = stack.pop() {
                for candidate in 0..n {
                    if assigned[candidate] {
                        continue;
                    }
                    let source = boxes[candidate].source_frame.as_str();
                    if sources.contains(source) {
                        continue;
                    }
                    if !boxes[current].rect.overlaps_majority(&boxes[candidate].rect) {
                        continue;
                    }
                    assigned[candidate] = true;
                    sources.insert(source);
                    members.push(candidate);
                    stack.push(candidate);
                }
            }

            members.sort_unstable();
            let member_boxes = members.into_iter().map(|i| boxes[i].clone()).collect();
            if let Some(cluster) = Cluster::new(clusters.len(), member_boxes) {
                clusters.push(cluster);
            }
        }

        ClusterSet::new(clusters)
    }
}
