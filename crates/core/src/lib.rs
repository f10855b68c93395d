pub mod catalog;
pub mod clustering;
pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod selection;
pub mod shared;
