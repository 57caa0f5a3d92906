//! Line-oriented command console on stdin

use std::sync::Arc;

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::state::AppState;

/// A command typed on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Reset,
    Status,
    Hide,
    Show,
}

impl ConsoleCommand {
    /// Parse one input line, ignoring case and surrounding whitespace
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" | "s" => Some(Self::Start),
            "stop" | "x" => Some(Self::Stop),
            "reset" | "r" => Some(Self::Reset),
            "status" => Some(Self::Status),
            "hide" => Some(Self::Hide),
            "show" => Some(Self::Show),
            _ => None,
        }
    }

    fn apply(self, state: &AppState) {
        let timer = match self {
            Self::Start => state.start(),
            Self::Stop => state.stop(),
            Self::Reset => state.reset(),
            Self::Hide => state.set_visible(false),
            Self::Show => state.set_visible(true),
            Self::Status => state.engine.snapshot(),
        };
        info!("{:?}: {:?} at {}", self, timer.state, timer.display);
    }
}

/// Background task that feeds stdin lines to the stopwatch
pub async fn console_task(state: Arc<AppState>) {
    info!("Starting console task (commands: start, stop, reset, status, hide, show)");

    if let Err(e) = run_console(&state, BufReader::new(io::stdin())).await {
        warn!("Console input failed: {}", e);
    }
}

/// Apply commands from `input` until end of input
pub async fn run_console<R>(state: &AppState, input: R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match ConsoleCommand::parse(&line) {
            Some(command) => command.apply(state),
            None => warn!("Unknown console command: {}", line.trim()),
        }
    }

    info!("Console input closed");
    Ok(())
}
