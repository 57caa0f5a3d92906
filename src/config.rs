//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::services::{ClockKind, SchedulerKind};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "stopwatch")]
#[command(about = "A stopwatch engine with a refreshed display, driven over HTTP or the terminal")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Display refresh period in milliseconds
    #[arg(short, long, default_value = "16")]
    pub refresh_ms: u64,

    /// Time source backing the stopwatch
    #[arg(long, value_enum, default_value = "monotonic")]
    pub clock: ClockKind,

    /// Refresh loop implementation
    #[arg(long, value_enum, default_value = "frame")]
    pub scheduler: SchedulerKind,

    /// Render the display on the terminal and read commands from stdin
    #[arg(short, long)]
    pub console: bool,

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

    /// Refresh period, never shorter than one millisecond
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["stopwatch"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.refresh_interval(), Duration::from_millis(16));
        assert_eq!(config.clock, ClockKind::Monotonic);
        assert_eq!(config.scheduler, SchedulerKind::Frame);
        assert_eq!(config.log_level(), "info");
        assert!(!config.console);
    }

    #[test]
    fn fallbacks_selectable() {
        let config = Config::try_parse_from([
            "stopwatch", "--clock", "wall", "--scheduler", "interval", "-r", "0", "-v",
        ])
        .unwrap();
        assert_eq!(config.clock, ClockKind::Wall);
        assert_eq!(config.scheduler, SchedulerKind::Interval);
        assert_eq!(config.refresh_interval(), Duration::from_millis(1));
        assert_eq!(config.log_level(), "debug");
    }
}
