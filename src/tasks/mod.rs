//! Background tasks module
//! 
//! Console-mode tasks that run alongside the HTTP server.

pub mod console;
pub mod terminal_display;

// Re-export main functions
pub use console::console_task;
pub use terminal_display::terminal_display_task;
