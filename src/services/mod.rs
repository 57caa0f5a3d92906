//! Capability services module
//! 
//! Time sources and refresh schedulers, each with a primary and a fallback
//! implementation chosen once at startup.

pub mod clock;
pub mod scheduler;

// Re-export main types
pub use clock::{select_clock, Clock, ClockKind, MonotonicClock, WallClock};
pub use scheduler::{
    select_scheduler, FrameScheduler, IntervalScheduler, RefreshHandle, Scheduler, SchedulerKind,
    Tick,
};
