//! Utility functions module
//! 
//! Display formatting and process signal handling.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_elapsed, millis_f64};
pub use signals::shutdown_signal;
