//! Stopwatch - an elapsed-time counter with a continuously refreshed display
//! 
//! This is the main entry point for the stopwatch server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stopwatch::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{console_task, terminal_display_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the console display can own stdout
    tracing_subscriber::fmt()
        .with_env_filter(format!("stopwatch={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stopwatch server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, refresh={}ms, clock={:?}, scheduler={:?}",
          config.host, config.port, config.refresh_ms, config.clock, config.scheduler);

    let state = Arc::new(AppState::from_config(&config));

    if config.console {
        tokio::spawn(terminal_display_task(state.engine.subscribe()));

        let console_state = Arc::clone(&state);
        tokio::spawn(async move {
            console_task(console_state).await;
        });
    }

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start   - Start or resume the stopwatch");
    info!("  POST /stop    - Stop and freeze the elapsed time");
    info!("  POST /reset   - Reset to zero");
    info!("  POST /hide    - Pause display refresh");
    info!("  POST /show    - Resume display refresh");
    info!("  GET  /status  - Current timer snapshot");
    info!("  GET  /display - Current display string");
    info!("  GET  /health  - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.engine.stop();
    info!("Server shutdown complete at {}", state.engine.display());
    Ok(())
}
