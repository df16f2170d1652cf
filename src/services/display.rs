//! Presentation projection: what the timer looks like for a given state

use serde::Serialize;

use crate::state::{Mode, RenderState, Theme};

pub const TITLE_SUFFIX: &str = "Pomodoro";

/// Everything a front end needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub display: String,
    pub title: String,
    pub label: &'static str,
    pub accent: &'static str,
    pub icon: &'static str,
    pub theme: Theme,
    pub theme_icon: &'static str,
}

impl View {
    pub fn project(state: &RenderState) -> Self {
        let display = format_clock(state.timer.remaining_seconds);
        Self {
            title: format!("{} - {}", display, TITLE_SUFFIX),
            display,
            label: mode_label(state.timer.mode),
            accent: mode_accent(state.timer.mode),
            icon: if state.timer.is_running { "pause" } else { "play" },
            theme: state.theme,
            theme_icon: match state.theme {
                Theme::Light => "moon",
                Theme::Dark => "sun",
            },
        }
    }
}

/// Zero-padded `MM:SS`; minutes are not wrapped into hours
pub fn format_clock(remaining_seconds: u64) -> String {
    format!("{:02}:{:02}", remaining_seconds / 60, remaining_seconds % 60)
}

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Focus => "Focus Time",
        Mode::ShortBreak => "Short Break",
        Mode::LongBreak => "Long Break",
    }
}

pub fn mode_accent(mode: Mode) -> &'static str {
    match mode {
        Mode::Focus => "brand",
        Mode::ShortBreak => "emerald",
        Mode::LongBreak => "indigo",
    }
}
