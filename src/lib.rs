//! Stopwatch - an elapsed-time counter with a continuously refreshed display
//! 
//! The timer engine owns the timing state machine and its refresh loop; the
//! HTTP API and the optional terminal console are thin surfaces over it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerEngine};
pub use api::create_router;
pub use utils::{format_elapsed, signals::shutdown_signal};
