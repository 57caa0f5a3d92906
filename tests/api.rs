use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tokio::runtime::Handle;
use tower::ServiceExt;

use stopwatch::{
    create_router,
    services::{FrameScheduler, MonotonicClock},
    AppState, TimerEngine,
};

fn router() -> Router {
    let engine = TimerEngine::new(
        Arc::new(MonotonicClock::new()),
        Arc::new(FrameScheduler::new(Handle::current())),
        Duration::from_millis(16),
    );
    create_router(Arc::new(AppState::new(20554, "127.0.0.1".to_string(), engine)))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn json(app: &Router, method: Method, uri: &str) -> Value {
    let (status, body) = call(app, method, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test(start_paused = true)]
async fn start_stop_reset_cycle() {
    let app = router();

    let started = json(&app, Method::POST, "/start").await;
    assert_eq!(started["status"], "running");
    assert_eq!(started["timer"]["controls"]["start_enabled"], false);
    assert_eq!(started["timer"]["controls"]["stop_enabled"], true);

    tokio::time::advance(Duration::from_millis(1_500)).await;

    let stopped = json(&app, Method::POST, "/stop").await;
    assert_eq!(stopped["status"], "idle");
    let elapsed = stopped["timer"]["elapsed_ms"].as_f64().unwrap();
    assert!((1_500.0..1_600.0).contains(&elapsed), "elapsed {elapsed}");

    let (status, display) = call(&app, Method::GET, "/display").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(display, stopped["timer"]["display"].as_str().unwrap().as_bytes());

    let reset = json(&app, Method::POST, "/reset").await;
    assert_eq!(reset["status"], "idle");
    assert_eq!(reset["timer"]["elapsed_ms"], 0.0);
    assert_eq!(reset["timer"]["display"], "0.00");
}

#[tokio::test(start_paused = true)]
async fn repeated_start_does_not_restart_session() {
    let app = router();

    json(&app, Method::POST, "/start").await;
    tokio::time::advance(Duration::from_millis(400)).await;
    json(&app, Method::POST, "/start").await;
    tokio::time::advance(Duration::from_millis(600)).await;

    let stopped = json(&app, Method::POST, "/stop").await;
    let elapsed = stopped["timer"]["elapsed_ms"].as_f64().unwrap();
    assert!((1_000.0..1_100.0).contains(&elapsed), "elapsed {elapsed}");
}

#[tokio::test(start_paused = true)]
async fn status_reports_engine_details() {
    let app = router();

    let idle = json(&app, Method::GET, "/status").await;
    assert_eq!(idle["timer"]["state"], "idle");
    assert_eq!(idle["timer"]["display"], "0.00");
    assert_eq!(idle["clock"], "monotonic");
    assert_eq!(idle["scheduler"], "frame");
    assert_eq!(idle["visible"], true);
    assert_eq!(idle["refreshing"], false);
    assert_eq!(idle["last_action"], Value::Null);

    json(&app, Method::POST, "/start").await;
    json(&app, Method::POST, "/hide").await;

    let hidden = json(&app, Method::GET, "/status").await;
    assert_eq!(hidden["timer"]["state"], "running");
    assert_eq!(hidden["visible"], false);
    assert_eq!(hidden["refreshing"], false);
    assert_eq!(hidden["last_action"]["action"], "hide");

    json(&app, Method::POST, "/show").await;
    let shown = json(&app, Method::GET, "/status").await;
    assert_eq!(shown["refreshing"], true);
}

#[tokio::test]
async fn health_check() {
    let app = router();
    let health = json(&app, Method::GET, "/health").await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn commands_require_post() {
    let app = router();
    let (status, _) = call(&app, Method::GET, "/start").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
