pub mod box_clusterer;
pub mod cluster;
