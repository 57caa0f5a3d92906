//! Repeating refresh schedulers
//!
//! A scheduler runs a tick callback on a fixed cadence until the returned
//! [`RefreshHandle`] is cancelled or dropped.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokio::{runtime::Handle, time::MissedTickBehavior};
use tracing::{debug, error};

/// Callback invoked on every refresh
pub type Tick = Box<dyn FnMut() + Send + 'static>;

/// Which refresh loop implementation drives the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    /// Cadence-aligned ticks on the tokio runtime
    Frame,
    /// Fixed sleep between ticks on a dedicated thread
    Interval,
}

/// Cancellation handle for a scheduled refresh loop.
///
/// Cancelling is idempotent and dropping the handle cancels the loop.
pub struct RefreshHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl RefreshHandle {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A handle with nothing behind it
    fn inert() -> Self {
        Self { cancel: None }
    }

    /// Stop the loop; later calls do nothing
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Whether the loop has not been cancelled yet
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Something that can run a tick callback repeatedly
pub trait Scheduler: Send + Sync + fmt::Debug {
    fn schedule(&self, period: Duration, tick: Tick) -> RefreshHandle;

    fn kind(&self) -> SchedulerKind;
}

/// Runs ticks on the tokio runtime, aligned to the period.
///
/// Late ticks are skipped rather than replayed, so a stalled runtime never
/// produces a burst of catch-up refreshes.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    runtime: Handle,
}

impl FrameScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for FrameScheduler {
    fn schedule(&self, period: Duration, mut tick: Tick) -> RefreshHandle {
        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                tick();
            }
        });
        RefreshHandle::new(move || task.abort())
    }

    fn kind(&self) -> SchedulerKind {
        SchedulerKind::Frame
    }
}

/// Fallback loop on a plain thread: tick, then sleep for the period
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    fn schedule(&self, period: Duration, mut tick: Tick) -> RefreshHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let spawned = thread::Builder::new()
            .name("stopwatch-refresh".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    tick();
                    thread::sleep(period);
                }
            });

        match spawned {
            Ok(_) => RefreshHandle::new(move || cancelled.store(true, Ordering::Release)),
            Err(e) => {
                // The display stops refreshing; elapsed time is unaffected.
                error!("Failed to spawn refresh thread: {}", e);
                RefreshHandle::inert()
            }
        }
    }

    fn kind(&self) -> SchedulerKind {
        SchedulerKind::Interval
    }
}

/// Pick the scheduler for this process.
///
/// Frame scheduling needs a tokio runtime; without one this quietly falls
/// back to the interval scheduler.
pub fn select_scheduler(preferred: SchedulerKind) -> Arc<dyn Scheduler> {
    match preferred {
        SchedulerKind::Frame => match Handle::try_current() {
            Ok(runtime) => Arc::new(FrameScheduler::new(runtime)),
            Err(_) => {
                debug!("No tokio runtime available, falling back to interval scheduler");
                Arc::new(IntervalScheduler)
            }
        },
        SchedulerKind::Interval => Arc::new(IntervalScheduler),
    }
}
