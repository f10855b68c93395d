pub mod box_projector;
pub mod projected_box;
