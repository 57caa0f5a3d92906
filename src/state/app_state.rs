//! Main application state management

use std::{
    sync::{Mutex, PoisonError},
    time::Instant,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{TimerEngine, TimerSnapshot};
use crate::{
    config::Config,
    services::{select_clock, select_scheduler},
};

/// The last command a host surface issued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastAction {
    pub action: String,
    pub at: DateTime<Utc>,
}

/// Application state shared by the HTTP handlers and the console
#[derive(Debug)]
pub struct AppState {
    /// The stopwatch itself
    pub engine: TimerEngine,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<LastAction>>,
}

impl AppState {
    /// Wrap an engine with server metadata
    pub fn new(port: u16, host: String, engine: TimerEngine) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Build the engine from the configured clock and scheduler
    pub fn from_config(config: &Config) -> Self {
        let engine = TimerEngine::new(
            select_clock(config.clock),
            select_scheduler(config.scheduler),
            config.refresh_interval(),
        );
        info!(
            "Stopwatch engine ready: clock={:?}, scheduler={:?}, refresh={:?}",
            engine.clock_kind(),
            engine.scheduler_kind(),
            config.refresh_interval()
        );

        Self::new(config.port, config.host.clone(), engine)
    }

    /// Start the stopwatch and record the action
    pub fn start(&self) -> TimerSnapshot {
        self.engine.start();
        self.record_action("start");
        self.engine.snapshot()
    }

    /// Stop the stopwatch and record the action
    pub fn stop(&self) -> TimerSnapshot {
        self.engine.stop();
        self.record_action("stop");
        self.engine.snapshot()
    }

    /// Reset the stopwatch and record the action
    pub fn reset(&self) -> TimerSnapshot {
        self.engine.reset();
        self.record_action("reset");
        self.engine.snapshot()
    }

    /// Follow host visibility: hidden pauses the display refresh
    pub fn set_visible(&self, visible: bool) -> TimerSnapshot {
        self.engine.set_visible(visible);
        self.record_action(if visible { "show" } else { "hide" });
        self.engine.snapshot()
    }

    fn record_action(&self, action: &str) {
        let mut last_action = self.last_action.lock().unwrap_or_else(PoisonError::into_inner);
        *last_action = Some(LastAction {
            action: action.to_string(),
            at: Utc::now(),
        });
    }

    /// Get last action information
    pub fn get_last_action(&self) -> Option<LastAction> {
        self.last_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use pretty_assertions::assert_eq;
    use tokio::runtime::Handle;

    use super::*;
    use crate::{
        services::{FrameScheduler, MonotonicClock},
        state::RunState,
    };

    fn app_state() -> AppState {
        let engine = TimerEngine::new(
            Arc::new(MonotonicClock::new()),
            Arc::new(FrameScheduler::new(Handle::current())),
            Duration::from_millis(16),
        );
        AppState::new(20554, "127.0.0.1".to_string(), engine)
    }

    #[tokio::test(start_paused = true)]
    async fn commands_record_last_action() {
        let state = app_state();
        assert_eq!(state.get_last_action(), None);

        let snapshot = state.start();
        assert_eq!(snapshot.state, RunState::Running);
        assert_eq!(state.get_last_action().map(|a| a.action), Some("start".to_string()));

        tokio::time::advance(Duration::from_millis(750)).await;
        let snapshot = state.stop();
        assert_eq!(snapshot.display, "0.75");
        assert_eq!(state.get_last_action().map(|a| a.action), Some("stop".to_string()));

        let snapshot = state.reset();
        assert_eq!(snapshot.display, "0.00");
        assert_eq!(state.get_last_action().map(|a| a.action), Some("reset".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn visibility_is_recorded() {
        let state = app_state();
        state.set_visible(false);
        assert!(!state.engine.is_visible());
        assert_eq!(state.get_last_action().map(|a| a.action), Some("hide".to_string()));
    }

    #[tokio::test]
    async fn from_config_selects_capabilities() {
        use clap::Parser;

        let config = Config::try_parse_from(["stopwatch", "--clock", "wall"]).unwrap();
        let state = AppState::from_config(&config);
        assert_eq!(state.engine.clock_kind(), crate::services::ClockKind::Wall);
        assert_eq!(state.engine.scheduler_kind(), crate::services::SchedulerKind::Frame);
        assert!(state.get_uptime().ends_with('s'));
    }
}
