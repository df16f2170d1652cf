//! Pomodoro Server - A state-managed Pomodoro timer
//! 
//! This library provides the focus/break timer state machine, the clock and
//! alarm collaborators around it, and an HTTP API to drive it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
