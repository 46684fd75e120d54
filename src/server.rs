use crate::config::ServerConfig;
use crate::data::{GenerateRequest, ScheduleEntry};
use crate::error::{AppError, InputError};
use crate::scheduler;
use crate::storage::SnapshotStore;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::CONTENT_TYPE},
    routing::{get, post},
};
use log::{info, warn};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

#[derive(Clone)]
pub struct AppState {
    pub store: SnapshotStore,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub ok: bool,
    pub schedule: Vec<ScheduleEntry>,
}

async fn generate_handler(
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let input = request.into_input().inspect_err(|e| {
        let InputError::MissingCollections(fields) = e;
        warn!("Rejecting generate request, missing: {}", fields.join(", "));
    })?;
    let schedule = scheduler::generate(&input);
    Ok(Json(GenerateResponse { ok: true, schedule }))
}

/// A body that is empty or not declared as JSON is stored as `{}`.
fn snapshot_from_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, AppError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json") || ct.contains("+json"));
    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn save_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let snapshot = snapshot_from_body(&headers, &body)?;
    state.store.save(&snapshot).await.map_err(AppError::Save)?;
    Ok(Json(json!({ "ok": true })))
}

async fn load_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.store.load().await.map(Json).map_err(AppError::Load)
}

/// API routes plus the static front-end; unknown paths serve `index.html`.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    let frontend = ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/save", post(save_handler))
        .route("/api/load", get(load_handler))
        .fallback_service(frontend)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let store = SnapshotStore::new(&config.data_dir);
    store.ensure_dir().await.map_err(std::io::Error::other)?;

    let app = router(AppState { store }, &config.public_dir);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    info!("Timetable generator running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
