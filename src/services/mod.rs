//! Collaborators around the timer
//! 
//! This module contains the completion alarm and the presentation
//! projection used by the API and the render task.

pub mod alarm;
pub mod display;

// Re-export main types
pub use alarm::{Alarm, SilentAlarm, TerminalBell};
pub use display::View;
