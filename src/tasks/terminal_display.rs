//! Terminal rendering of the display string

use tokio::{
    io::{self, AsyncWrite, AsyncWriteExt},
    sync::watch,
};
use tracing::{debug, info, warn};

/// Background task that redraws the stopwatch on stdout
pub async fn terminal_display_task(display_rx: watch::Receiver<String>) {
    info!("Starting terminal display task");

    if let Err(e) = render_display(display_rx, io::stdout()).await {
        warn!("Terminal display stopped: {}", e);
    }
}

/// Redraw every display change on one line until the channel closes
pub async fn render_display<W>(mut display_rx: watch::Receiver<String>, mut out: W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let line = format!("\r{:>12}", *display_rx.borrow_and_update());
        out.write_all(line.as_bytes()).await?;
        out.flush().await?;

        if display_rx.changed().await.is_err() {
            debug!("Display channel closed");
            out.write_all(b"\n").await?;
            return out.flush().await;
        }
    }
}
