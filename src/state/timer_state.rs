//! Timer state machine: mode, countdown and run state

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

/// Which interval the timer is counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "focus" | "work" => Ok(Mode::Focus),
            "short-break" | "short_break" | "short" => Ok(Mode::ShortBreak),
            "long-break" | "long_break" | "long" => Ok(Mode::LongBreak),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

/// Configured interval lengths in minutes, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Durations {
    /// Build durations from raw user input, falling back per field
    pub fn parse(work: &str, short_break: &str, long_break: &str) -> Self {
        Self {
            work: minutes_or(work, DEFAULT_WORK_MINUTES),
            short_break: minutes_or(short_break, DEFAULT_SHORT_BREAK_MINUTES),
            long_break: minutes_or(long_break, DEFAULT_LONG_BREAK_MINUTES),
        }
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    pub fn seconds(&self, mode: Mode) -> u64 {
        u64::from(self.minutes(mode)) * 60
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_MINUTES,
            short_break: DEFAULT_SHORT_BREAK_MINUTES,
            long_break: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

/// Parse a minutes value the lenient way a form field would: skip leading
/// whitespace, accept a sign, read leading digits and ignore the rest.
/// Returns `None` for anything that is not a positive `u32`.
pub fn parse_minutes(input: &str) -> Option<u32> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value: u32 = digits.parse().ok()?;
    if negative || value == 0 {
        None
    } else {
        Some(value)
    }
}

fn minutes_or(input: &str, fallback: u32) -> u32 {
    parse_minutes(input).unwrap_or_else(|| {
        debug!("Invalid duration {:?}, using default of {} minutes", input, fallback);
        fallback
    })
}

/// What a single clock tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running, nothing changed
    Ignored,
    /// One second was taken off the countdown
    Counted,
    /// Tick arrived at zero: the interval is over and the timer stopped
    Completed,
}

/// Read-only copy of the timer handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub durations: Durations,
}

/// Timer state for the Pomodoro countdown.
///
/// Transitions here are pure: starting and stopping the clock, playing the
/// alarm and rendering are the caller's job, driven by the return values.
#[derive(Debug, Clone)]
pub struct TimerState {
    mode: Mode,
    remaining_seconds: u64,
    running: bool,
    durations: Durations,
}

impl TimerState {
    /// Create an idle focus timer with default durations
    pub fn new() -> Self {
        Self::with_durations(Durations::default())
    }

    /// Create an idle focus timer loaded with the given durations
    pub fn with_durations(durations: Durations) -> Self {
        Self {
            mode: Mode::Focus,
            remaining_seconds: durations.seconds(Mode::Focus),
            running: false,
            durations,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            is_running: self.running,
            durations: self.durations,
        }
    }

    /// Start counting down. Returns true if the timer went from idle to running.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting down. Returns true if the timer was running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Advance the countdown by one second.
    ///
    /// Zero is checked before decrementing, so the tick that takes the
    /// countdown to zero is an ordinary tick and completion is reported on
    /// the following one.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            TickOutcome::Counted
        } else {
            self.running = false;
            TickOutcome::Completed
        }
    }

    /// Stop and reload the countdown from the current mode's duration
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.durations.seconds(self.mode);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Replace the durations. An idle timer is reset right away; a running
    /// one keeps its countdown until the next reset.
    pub fn set_durations(&mut self, durations: Durations) {
        self.durations = durations;
        if !self.running {
            self.reset();
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_with(remaining: u64) -> TimerState {
        let mut timer = TimerState::new();
        timer.remaining_seconds = remaining;
        timer.running = true;
        timer
    }

    #[test]
    fn starts_idle_in_focus_mode() {
        let timer = TimerState::new();
        assert_eq!(timer.mode(), Mode::Focus);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert!(!timer.is_running());
        assert_eq!(timer.durations(), Durations::default());
    }

    #[test]
    fn set_mode_loads_configured_duration() {
        let mut timer = TimerState::new();
        timer.set_durations(Durations { work: 50, short_break: 10, long_break: 30 });

        for (mode, minutes) in [(Mode::ShortBreak, 10), (Mode::LongBreak, 30), (Mode::Focus, 50)] {
            timer.set_mode(mode);
            assert_eq!(timer.mode(), mode);
            assert_eq!(timer.remaining_seconds(), minutes * 60);
            assert!(!timer.is_running());
        }
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut timer = TimerState::new();
        let before = timer.snapshot();
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.snapshot(), before);
    }

    #[test]
    fn completion_fires_one_tick_after_zero() {
        let mut timer = running_with(2);

        assert_eq!(timer.tick(), TickOutcome::Counted);
        assert_eq!(timer.remaining_seconds(), 1);
        assert!(timer.is_running());

        assert_eq!(timer.tick(), TickOutcome::Counted);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(timer.is_running());

        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());

        // Completed timer is idle, further ticks are ignored
        assert_eq!(timer.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn start_refuses_empty_countdown() {
        let mut timer = running_with(0);
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert!(!timer.start());
        assert!(!timer.is_running());
    }

    #[test]
    fn start_and_pause_are_noops_when_already_there() {
        let mut timer = TimerState::new();
        assert!(!timer.pause());
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.pause());
        assert!(!timer.pause());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut timer = running_with(42);
        timer.reset();
        let once = timer.snapshot();
        timer.reset();
        assert_eq!(timer.snapshot(), once);
        assert_eq!(once.remaining_seconds, 25 * 60);
        assert!(!once.is_running);
    }

    #[test]
    fn switching_mode_while_running_stops_and_reloads() {
        let mut timer = TimerState::new();
        timer.start();
        timer.tick();
        timer.set_mode(Mode::LongBreak);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 15 * 60);
    }

    #[test]
    fn pause_then_start_resumes_without_drift() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..7 {
            timer.tick();
        }
        timer.pause();
        let paused_at = timer.remaining_seconds();
        timer.tick();
        assert!(timer.start());
        assert_eq!(timer.remaining_seconds(), paused_at);
        assert_eq!(paused_at, 25 * 60 - 7);
    }

    #[test]
    fn durations_apply_immediately_when_idle() {
        let mut timer = TimerState::new();
        timer.set_mode(Mode::ShortBreak);
        timer.set_durations(Durations::parse("30", "8", "20"));
        assert_eq!(timer.remaining_seconds(), 8 * 60);
    }

    #[test]
    fn durations_wait_for_next_reset_when_running() {
        let mut timer = TimerState::new();
        timer.start();
        timer.tick();
        timer.set_durations(Durations::parse("40", "5", "15"));
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 25 * 60 - 1);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 40 * 60);
    }

    #[test]
    fn invalid_durations_fall_back_per_field() {
        let durations = Durations::parse("-5", "abc", "20");
        assert_eq!(durations, Durations { work: 25, short_break: 5, long_break: 20 });
    }

    #[test]
    fn parse_minutes_reads_leading_integer() {
        assert_eq!(parse_minutes("12"), Some(12));
        assert_eq!(parse_minutes("  12abc"), Some(12));
        assert_eq!(parse_minutes("3.7"), Some(3));
        assert_eq!(parse_minutes("+9"), Some(9));
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes("99999999999"), None);
    }

    #[test]
    fn mode_parses_path_segments() {
        assert_eq!("work".parse::<Mode>(), Ok(Mode::Focus));
        assert_eq!("Short-Break".parse::<Mode>(), Ok(Mode::ShortBreak));
        assert_eq!("long_break".parse::<Mode>(), Ok(Mode::LongBreak));
        assert!("nap".parse::<Mode>().is_err());
    }
}
