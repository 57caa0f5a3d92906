//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::{ClockKind, SchedulerKind},
    state::{LastAction, RunState, TimerSnapshot},
};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: RunState,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a response carrying the snapshot taken after a command
    pub fn new(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self {
            status: timer.state,
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Full status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub visible: bool,
    pub refreshing: bool,
    pub clock: ClockKind,
    pub scheduler: SchedulerKind,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<LastAction>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
