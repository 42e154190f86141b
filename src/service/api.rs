use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::debug;

use super::catalog::TaskCatalog;
use crate::board::document::{BoardView, Document};
use crate::board::loader::BoardLoader;
use crate::board::models::CatalogTask;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub catalog: Arc<TaskCatalog>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(catalog: TaskCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(board_page))
        .route("/tasks", get(list_tasks))
        .route("/board", get(board_view))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn list_tasks(State(state): State<SharedState>) -> Json<Vec<CatalogTask>> {
    debug!(count = state.catalog.len(), "Serving task list");
    Json(state.catalog.tasks().to_vec())
}

async fn board_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let document = render_board(&state).await?;
    Ok(Html(document.to_page()))
}

async fn board_view(State(state): State<SharedState>) -> Result<Json<BoardView>, ApiError> {
    let document = render_board(&state).await?;
    Ok(Json(document.view()))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Run one board load against the catalog. Catalog statuses are already
/// validated, so the loader's unknown-status policy never applies here.
async fn render_board(state: &SharedState) -> Result<Document, ApiError> {
    let loader = BoardLoader::new(Arc::clone(&state.catalog));
    let mut document = Document::new();
    loader
        .load(&mut document)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(document)
}

// ── Tests ─────────────────────────────────────────────────────────────
