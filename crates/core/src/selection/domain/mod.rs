pub mod blink_timer;
pub mod selection_controller;
