//! State management module
//! 
//! The timing state machine, the engine that owns it, and the shared
//! application state handed to every host surface.

pub mod app_state;
pub mod engine;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, LastAction};
pub use engine::TimerEngine;
pub use timer_state::{Controls, RunState, TimerSnapshot, TimerState};
