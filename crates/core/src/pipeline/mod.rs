pub mod overlay_session;
pub mod overlay_snapshot;
