//! HTTP endpoint handlers
//!
//! Every command is valid in every state, so command handlers always
//! succeed and report the resulting snapshot.

use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::info;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};
use crate::state::AppState;

/// Handle POST /start - Begin or resume timing
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.start();
    info!("Start endpoint called - stopwatch {:?} at {}", timer.state, timer.display);
    Json(ApiResponse::new("Stopwatch started", timer))
}

/// Handle POST /stop - Freeze the elapsed time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.stop();
    info!("Stop endpoint called - stopwatch {:?} at {}", timer.state, timer.display);
    Json(ApiResponse::new("Stopwatch stopped", timer))
}

/// Handle POST /reset - Back to zero
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.reset();
    info!("Reset endpoint called");
    Json(ApiResponse::new("Stopwatch reset", timer))
}

/// Handle POST /hide - Pause display refreshing
pub async fn hide_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    Json(ApiResponse::new("Display hidden", state.set_visible(false)))
}

/// Handle POST /show - Resume display refreshing
pub async fn show_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    Json(ApiResponse::new("Display visible", state.set_visible(true)))
}

/// Handle GET /status - Return the current snapshot and server details
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        timer: state.engine.snapshot(),
        visible: state.engine.is_visible(),
        refreshing: state.engine.is_refreshing(),
        clock: state.engine.clock_kind(),
        scheduler: state.engine.scheduler_kind(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action: state.get_last_action(),
    })
}

/// Handle GET /display - The last published display string as plain text
pub async fn display_handler(State(state): State<Arc<AppState>>) -> String {
    state.engine.display()
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
