//! State handed to the presentation layer after every transition

use serde::{Deserialize, Serialize};

use super::TimerSnapshot;

/// Light/dark appearance, cosmetic only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Snapshot published on the render channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderState {
    pub timer: TimerSnapshot,
    pub theme: Theme,
    /// Set only on the render pass that follows an interval completing
    pub completed: bool,
}
