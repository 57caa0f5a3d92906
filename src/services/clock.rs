//! Time sources for the stopwatch

use std::{fmt::Debug, sync::Arc, time::Duration};

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::info;

/// Which time source backs the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Monotonic clock, unaffected by wall-clock adjustments
    Monotonic,
    /// System wall clock; may step backwards
    Wall,
}

/// A source of timestamps, expressed as offsets from the clock's origin
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Duration;

    fn kind(&self) -> ClockKind;
}

/// Monotonic clock anchored at construction.
///
/// Backed by `tokio::time::Instant`, so it follows paused time in tests.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn kind(&self) -> ClockKind {
        ClockKind::Monotonic
    }
}

/// Wall clock measured from the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Duration {
        // Pre-epoch or out-of-range readings collapse to zero.
        Utc::now()
            .timestamp_nanos_opt()
            .and_then(|nanos| u64::try_from(nanos).ok())
            .map(Duration::from_nanos)
            .unwrap_or_default()
    }

    fn kind(&self) -> ClockKind {
        ClockKind::Wall
    }
}

/// Build the clock chosen at startup
pub fn select_clock(kind: ClockKind) -> Arc<dyn Clock> {
    match kind {
        ClockKind::Monotonic => Arc::new(MonotonicClock::new()),
        ClockKind::Wall => {
            info!("Using wall clock; elapsed time may jump if the system time changes");
            Arc::new(WallClock)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn monotonic_clock_follows_tokio_time() {
        let clock = MonotonicClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[test]
    fn wall_clock_reads_past_epoch() {
        let clock = WallClock;
        assert!(clock.now() > Duration::from_secs(1_600_000_000));
    }

    #[test]
    fn select_clock_honours_kind() {
        assert_eq!(select_clock(ClockKind::Monotonic).kind(), ClockKind::Monotonic);
        assert_eq!(select_clock(ClockKind::Wall).kind(), ClockKind::Wall);
    }
}
