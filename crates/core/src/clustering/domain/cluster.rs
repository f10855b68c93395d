use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::projection::domain::projected_box::ProjectedBox;

/// Identity of a cluster within one clustering run.
///
/// Identical input yields identical ids; any change to the input (a new
/// neighbor, a different displayed image) may change them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ClusterId {
    pub ordinal: usize,
    pub source_frame: String,
    pub detection_index: usize,
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cluster-{}-{}-{}",
            self.ordinal, self.source_frame, self.detection_index
        )
    }
}

/// Boxes judged to show the same physical face, at most one per source frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cluster {
    id: ClusterId,
    members: Vec<ProjectedBox>,
    key: usize,
}

impl Cluster {
    /// Builds a cluster from members in input order.
    ///
    /// Returns `None` for an empty member list.
    pub fn new(ordinal: usize, members: Vec<ProjectedBox>) -> Option<Self> {
        let key = select_key(&members)?;
        let key_box = &members[key];
        let id = ClusterId {
            ordinal,
            source_frame: key_box.source_frame.clone(),
            detection_index: key_box.detection_index,
        };
        Some(Self { id, members, key })
    }

    pub fn id(&self) -> &ClusterId {
        &self.id
    }

    pub fn members(&self) -> &[ProjectedBox] {
        &self.members
    }

    pub fn key_box(&self) -> &ProjectedBox {
        &self.members[self.key]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Highest confidence wins, then larger area; remaining ties keep the
/// earliest member.
fn select_key(members: &[ProjectedBox]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in members.iter().enumerate() {
        let Some(b) = best else {
            best = Some(i);
            continue;
        };
        let current = &members[b];
        let better = candidate.confidence > current.confidence
            || (candidate.confidence == current.confidence && candidate.area() > current.area());
        if better {
            best = Some(i);
        }
    }
    best
}

/// Result of one clustering run, with lookup by id for click handling.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
    #[serde(skip)]
    index: HashMap<ClusterId, usize>,
}

impl ClusterSet {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        let index = clusters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { clusters, index }
    }

    pub fn get(&self, id: &ClusterId) -> Option<&Cluster> {
        self.index.get(id).map(|&i| &self.clusters[i])
    }

    pub fn contains(&self, id: &ClusterId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ClusterId> {
        self.clusters.iter().map(|c| &c.id)
    }

    pub fn key_boxes(&self) -> impl Iterator<Item = (&ClusterId, &ProjectedBox)> {
        self.clusters.iter().map(|c| (&c.id, c.key_box()))
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::FacialArea;
    use crate::shared::rect::PixelRect;

    fn pbox(source: &str, index: usize, confidence: f64, w: f64, h: f64) -> ProjectedBox {
        ProjectedBox {
            source_frame: source.into(),
            detection_index: index,
            confidence,
            rect: PixelRect::new(0.0, 0.0, w, h),
            facial_area: FacialArea::default(),
            is_native: false,
        }
    }

    #[test]
    fn test_empty_members_rejected() {
        assert!(Cluster::new(0, Vec::new()).is_none());
    }

    #[test]
    fn test_key_is_highest_confidence() {
        let c = Cluster::new(
            0,
            vec![pbox("a", 0, 0.7, 50.0, 50.0), pbox("b", 3, 0.9, 10.0, 10.0)],
        )
        .unwrap();
        assert_eq!(c.key_box().source_frame, "b");
        assert_eq!(c.id().detection_index, 3);
    }

    #[test]
    fn test_confidence_tie_broken_by_area() {
        let c = Cluster::new(
            0,
            vec![pbox("a", 0, 0.8, 10.0, 10.0), pbox("b", 0, 0.8, 20.0, 10.0)],
        )
        .unwrap();
        assert_eq!(c.key_box().source_frame, "b");
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let c = Cluster::new(
            2,
            vec![pbox("a", 1, 0.8, 10.0, 10.0), pbox("b", 0, 0.8, 10.0, 10.0)],
        )
        .unwrap();
        assert_eq!(
            c.id(),
            &ClusterId {
                ordinal: 2,
                source_frame: "a".into(),
                detection_index: 1,
            }
        );
    }

    #[test]
    fn test_id_display() {
        let id = ClusterId {
            ordinal: 4,
            source_frame: "x.jpg".into(),
            detection_index: 2,
        };
        assert_eq!(id.to_string(), "cluster-4-x.jpg-2");
    }

    #[test]
    fn test_set_lookup() {
        let a = Cluster::new(0, vec![pbox("a", 0, 0.5, 1.0, 1.0)]).unwrap();
        let b = Cluster::new(1, vec![pbox("b", 0, 0.5, 1.0, 1.0)]).unwrap();
        let set = ClusterSet::new(vec![a.clone(), b]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(a.id()), Some(&a));
        let missing = ClusterId {
            ordinal: 9,
            source_frame: "z".into(),
            detection_index: 0,
        };
        assert!(!set.contains(&missing));
        assert!(set.get(&missing).is_none());
    }

    #[test]
    fn test_key_boxes_follow_cluster_order() {
        let a = Cluster::new(
            0,
            vec![pbox("a", 0, 0.5, 1.0, 1.0), pbox("b", 2, 0.9, 1.0, 1.0)],
        )
        .unwrap();
        let c = Cluster::new(1, vec![pbox("c", 1, 0.4, 1.0, 1.0)]).unwrap();
        let set = ClusterSet::new(vec![a, c]);

        let keys: Vec<(&str, usize)> = set
            .key_boxes()
            .map(|(id, key)| {
                assert_eq!(id.source_frame, key.source_frame);
                (key.source_frame.as_str(), key.detection_index)
            })
            .collect();

        assert_eq!(keys, vec![("b", 2), ("c", 1)]);
    }
}
