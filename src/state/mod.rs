//! State management module
//! 
//! This module contains the timer state machine and the application state
//! that coordinates it with the clock, the alarm and rendering.

pub mod app_state;
pub mod render_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use render_state::{RenderState, Theme};
pub use timer_state::{Durations, Mode, TickOutcome, TimerSnapshot, TimerState};
