//! Background tasks module
//! 
//! This module contains the clock that drives the countdown and the task
//! that renders timer snapshots.

pub mod clock;
pub mod render;

// Re-export main types and functions
pub use clock::{Clock, TickCallback, TickHandle, TokioClock};
pub use render::render_task;
