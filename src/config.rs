//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{Durations, Theme};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed Pomodoro timer with a local HTTP control API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25250")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Focus interval in minutes (invalid values fall back to 25)
    #[arg(short, long, default_value = "25")]
    pub work: String,

    /// Short break in minutes (invalid values fall back to 5)
    #[arg(short, long, default_value = "5")]
    pub short_break: String,

    /// Long break in minutes (invalid values fall back to 15)
    #[arg(short, long, default_value = "15")]
    pub long_break: String,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Log completions instead of ringing the terminal bell
    #[arg(long)]
    pub silent: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial durations, with the same fallback rules as runtime updates
    pub fn durations(&self) -> Durations {
        Durations::parse(&self.work, &self.short_break, &self.long_break)
    }

    pub fn theme(&self) -> Theme {
        if self.dark { Theme::Dark } else { Theme::Light }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let config = Config::try_parse_from(["pomodoro-server"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:25250");
        assert_eq!(config.durations(), Durations::default());
        assert_eq!(config.theme(), Theme::Light);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn bad_durations_fall_back() {
        let config = Config::try_parse_from([
            "pomodoro-server", "--work", "50", "--short-break", "zero", "--long-break=-3", "--dark", "-v",
        ])
        .unwrap();
        assert_eq!(config.durations(), Durations { work: 50, short_break: 5, long_break: 15 });
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.log_level(), "debug");
    }
}
