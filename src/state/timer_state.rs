//! Timer state structure and transitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The two states of the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

/// Raw timing state. Clock readings are offsets from the clock's origin.
///
/// Transitions take the current clock reading as an argument so the
/// arithmetic stays independent of any particular time source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub running: bool,
    /// Sum of all completed sessions
    pub accumulated: Duration,
    /// Clock reading at the last start; only meaningful while running
    pub session_start: Duration,
}

impl TimerState {
    /// Create a new idle timer at zero
    pub fn new() -> Self {
        Self {
            running: false,
            accumulated: Duration::ZERO,
            session_start: Duration::ZERO,
        }
    }

    /// Idle or Running, derived from the running flag
    pub fn run_state(&self) -> RunState {
        if self.running {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Begin a session. Returns false (and changes nothing) if already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.running {
            return false;
        }
        self.session_start = now;
        self.running = true;
        true
    }

    /// Fold the current session into the accumulator. Returns false if idle.
    pub fn stop(&mut self, now: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.accumulated += now.saturating_sub(self.session_start);
        self.running = false;
        true
    }

    /// Back to idle at zero, from any state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Total elapsed time as of `now`
    pub fn elapsed(&self, now: Duration) -> Duration {
        if self.running {
            // A wall clock may step backwards; the session never goes negative.
            self.accumulated + now.saturating_sub(self.session_start)
        } else {
            self.accumulated
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Which user controls are currently enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub reset_enabled: bool,
}

impl Controls {
    /// Start enabled while idle, stop while running, reset always
    pub fn for_state(state: RunState) -> Self {
        Self {
            start_enabled: state == RunState::Idle,
            stop_enabled: state == RunState::Running,
            reset_enabled: true,
        }
    }
}

/// Point-in-time view of the stopwatch handed to host surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: RunState,
    pub running: bool,
    pub elapsed_ms: f64,
    pub display: String,
    pub controls: Controls,
}
