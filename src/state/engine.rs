//! Timer engine: owns the timing state and drives the display refresh

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::sync::watch;
use tracing::{debug, info, trace};

use super::{Controls, RunState, TimerSnapshot, TimerState};
use crate::{
    services::{Clock, ClockKind, RefreshHandle, Scheduler, SchedulerKind},
    utils::{format_elapsed, millis_f64},
};

/// Mutable engine state, guarded by a single lock
#[derive(Debug)]
struct Inner {
    timer: TimerState,
    refresh: Option<RefreshHandle>,
    /// Bumped whenever a refresh loop starts or stops; ticks from an older
    /// loop are ignored.
    generation: u64,
    visible: bool,
}

/// The part of the engine the refresh loop needs to see
#[derive(Debug)]
struct Shared {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    display_tx: watch::Sender<String>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every critical section leaves the state consistent, so a panic
        // elsewhere never invalidates it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the current display string. Called with the lock held so a
    /// late tick cannot overwrite what a command just published.
    fn publish(&self, inner: &Inner) {
        let display = format_elapsed(inner.timer.elapsed(self.clock.now()));
        self.display_tx.send_if_modified(|current| {
            if *current == display {
                false
            } else {
                *current = display;
                true
            }
        });
    }

    fn refresh_tick(&self, generation: u64) {
        let inner = self.lock();
        if inner.generation != generation || !inner.timer.running {
            trace!("Ignoring stale refresh tick");
            return;
        }
        self.publish(&inner);
    }
}

/// Stopwatch with start/stop/reset commands and a refreshed display string.
///
/// All commands are total: each is valid in every state and none can fail.
#[derive(Debug)]
pub struct TimerEngine {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
    refresh_interval: Duration,
}

impl TimerEngine {
    /// Create an idle engine at zero; the display starts at `"0.00"`
    pub fn new(
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
        refresh_interval: Duration,
    ) -> Self {
        let (display_tx, _) = watch::channel(format_elapsed(Duration::ZERO));

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    timer: TimerState::new(),
                    refresh: None,
                    generation: 0,
                    visible: true,
                }),
                clock,
                display_tx,
            }),
            scheduler,
            refresh_interval,
        }
    }

    /// Begin a session. No-op while already running.
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        if !inner.timer.start(self.shared.clock.now()) {
            debug!("Start ignored, stopwatch already running");
            return;
        }

        info!("Stopwatch started at {}", format_elapsed(inner.timer.accumulated));
        self.shared.publish(&inner);
        if inner.visible {
            self.launch_refresh(&mut inner);
        } else {
            debug!("Display hidden, deferring refresh loop");
        }
    }

    /// End the current session and freeze the display. No-op while idle.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        if !inner.timer.stop(self.shared.clock.now()) {
            debug!("Stop ignored, stopwatch not running");
            return;
        }

        Self::cancel_refresh(&mut inner);
        self.shared.publish(&inner);
        info!("Stopwatch stopped at {}", format_elapsed(inner.timer.accumulated));
    }

    /// Return to idle at zero from any state
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        Self::cancel_refresh(&mut inner);
        inner.timer.reset();
        self.shared.publish(&inner);
        info!("Stopwatch reset");
    }

    /// Total elapsed time, computed from raw state
    pub fn elapsed(&self) -> Duration {
        self.shared.lock().timer.elapsed(self.shared.clock.now())
    }

    /// Idle or Running
    pub fn state(&self) -> RunState {
        self.shared.lock().timer.run_state()
    }

    /// Read everything a host surface needs in one consistent pass
    pub fn snapshot(&self) -> TimerSnapshot {
        let inner = self.shared.lock();
        let elapsed = inner.timer.elapsed(self.shared.clock.now());
        let state = inner.timer.run_state();

        TimerSnapshot {
            state,
            running: inner.timer.running,
            elapsed_ms: millis_f64(elapsed),
            display: format_elapsed(elapsed),
            controls: Controls::for_state(state),
        }
    }

    /// The most recently published display string
    pub fn display(&self) -> String {
        self.shared.display_tx.borrow().clone()
    }

    /// Receive every display change
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.display_tx.subscribe()
    }

    /// Pause or resume display refreshing to follow host visibility.
    ///
    /// Timing is untouched; only the refresh loop is suspended.
    pub fn set_visible(&self, visible: bool) {
        let mut inner = self.shared.lock();
        if inner.visible == visible {
            return;
        }
        inner.visible = visible;

        if !visible {
            Self::cancel_refresh(&mut inner);
            debug!("Display hidden, refresh paused");
        } else if inner.timer.running {
            self.shared.publish(&inner);
            self.launch_refresh(&mut inner);
            debug!("Display visible, refresh resumed");
        }
    }

    /// Whether the host currently shows the display
    pub fn is_visible(&self) -> bool {
        self.shared.lock().visible
    }

    /// Whether a refresh loop is currently scheduled
    pub fn is_refreshing(&self) -> bool {
        self.shared.lock().refresh.is_some()
    }

    /// Which time source was selected at startup
    pub fn clock_kind(&self) -> ClockKind {
        self.shared.clock.kind()
    }

    /// Which refresh loop implementation was selected at startup
    pub fn scheduler_kind(&self) -> SchedulerKind {
        self.scheduler.kind()
    }

    fn launch_refresh(&self, inner: &mut Inner) {
        Self::cancel_refresh(inner);
        let generation = inner.generation;
        let shared = Arc::clone(&self.shared);

        inner.refresh = Some(self.scheduler.schedule(
            self.refresh_interval,
            Box::new(move || shared.refresh_tick(generation)),
        ));
        debug!("Refresh loop scheduled every {:?}", self.refresh_interval);
    }

    fn cancel_refresh(inner: &mut Inner) {
        inner.generation = inner.generation.wrapping_add(1);
        if let Some(mut refresh) = inner.refresh.take() {
            refresh.cancel();
            debug!("Refresh loop cancelled");
        }
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        // The loop holds a reference to the shared state; stop it explicitly.
        Self::cancel_refresh(&mut self.shared.lock());
    }
}
