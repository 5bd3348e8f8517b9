//! Status/inspection server
//!
//! A read-only companion to the crawl. It exposes the orchestrator's progress
//! counters and serves the persisted documents over HTTP so a deployment can
//! be watched (and its output collected) without shelling into the container.
//! It reads the same files the single worker writes; because document
//! rewrites are atomic replaces, a concurrent read always sees a complete
//! document.

use crate::config::Config;
use crate::model::WorkKey;
use crate::Result;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Progress counters as last reported by the orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub stage: String,
    /// Units of work processed this run (including skips-after-failure).
    pub processed: u64,
    pub last_key: Option<String>,
    /// Completed keys (clubs stage) or player records (players stage).
    pub saved: u64,
    pub started_at: DateTime<Utc>,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            stage: "idle".to_string(),
            processed: 0,
            last_key: None,
            saved: 0,
            started_at: Utc::now(),
        }
    }
}

/// Shared, thread-safe snapshot: written by the single crawl worker, read by
/// the status responder.
#[derive(Clone, Default)]
pub struct StatusHandle(Arc<RwLock<StatusSnapshot>>);

impl StatusHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stage(&self, stage: &str) {
        self.0.write().unwrap().stage = stage.to_string();
    }

    pub fn set_last_key(&self, key: &WorkKey) {
        self.0.write().unwrap().last_key = Some(key.to_string());
    }

    pub fn record_processed(&self) {
        self.0.write().unwrap().processed += 1;
    }

    pub fn set_saved(&self, saved: u64) {
        self.0.write().unwrap().saved = saved;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.0.read().unwrap().clone()
    }
}

#[derive(Clone)]
struct AppState {
    status: StatusHandle,
    clubs_path: PathBuf,
    players_path: PathBuf,
    error_log_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct FileInfo {
    exists: bool,
    size_bytes: u64,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    #[serde(flatten)]
    snapshot: StatusSnapshot,
    clubs: FileInfo,
    players: FileInfo,
    errors: FileInfo,
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    doc: Option<String>,
}

/// Builds the status router for the given configuration.
pub fn router(status: StatusHandle, config: &Config) -> Router {
    let state = AppState {
        status,
        clubs_path: config.output.clubs_path.clone(),
        players_path: config.output.players_path.clone(),
        error_log_path: config.output.error_log_path.clone(),
    };

    Router::new()
        .route("/status", get(get_status))
        .route("/download", get(get_download))
        .route("/errors", get(get_errors))
        .with_state(state)
}

/// Binds the configured port and serves until the process exits.
pub async fn serve(status: StatusHandle, config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let app = router(status, &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Status server listening on :{} (/status, /download, /errors)",
        config.server.port
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        snapshot: state.status.snapshot(),
        clubs: file_info(&state.clubs_path).await,
        players: file_info(&state.players_path).await,
        errors: file_info(&state.error_log_path).await,
    })
}

/// Streams the players document — the dataset deliverable — or the clubs
/// document when `?doc=clubs` is passed.
async fn get_download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let path = if query.doc.as_deref() == Some("clubs") {
        &state.clubs_path
    } else {
        &state.players_path
    };
    serve_file(path, "application/json").await
}

async fn get_errors(State(state): State<AppState>) -> Response {
    serve_file(&state.error_log_path, "application/x-ndjson").await
}

async fn file_info(path: &Path) -> FileInfo {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => FileInfo {
            exists: true,
            size_bytes: metadata.len(),
        },
        Err(_) => FileInfo {
            exists: false,
            size_bytes: 0,
        },
    }
}

async fn serve_file(path: &Path, content_type: &'static str) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_updates_are_visible_in_snapshot() {
        let handle = StatusHandle::new();

        handle.set_stage("clubs");
        handle.set_last_key(&WorkKey::league_season(2021, "GB1"));
        handle.record_processed();
        handle.record_processed();
        handle.set_saved(1);

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.stage, "clubs");
        assert_eq!(snapshot.last_key.as_deref(), Some("2021_GB1"));
        assert_eq!(snapshot.processed, 2);
        assert_eq!(snapshot.saved, 1);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = StatusHandle::new();
        let clone = handle.clone();

        clone.record_processed();
        assert_eq!(handle.snapshot().processed, 1);
    }
}
