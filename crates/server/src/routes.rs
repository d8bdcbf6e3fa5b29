//! API routes for the FAQ assistant.
//!
//! None of the routes, including the admin ones, are authenticated.

use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use faq_core::AppError;
use faq_knowledge::{KnowledgeEntry, LogEntry};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

type AppStateArc = Arc<AppState>;

/// Message returned when an upload is missing a field.
pub const MISSING_FIELDS_MESSAGE: &str = "Both 'question' and 'answer' fields are required.";

/// Message returned when `query` is present but not a string.
pub const QUERY_TYPE_MESSAGE: &str = "The 'query' field must be a string.";

/// Message returned after a successful upload.
pub const UPLOAD_OK_MESSAGE: &str = "Knowledge base updated successfully.";

/// `AppError` rendered as an `{error}` JSON body.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct AskResponse {
    response: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UploadRequest {
    question: String,
    answer: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// Decode a JSON body, falling back to defaults when it is absent or
/// unreadable.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unreadable request body: {}", e);
        T::default()
    })
}

/// Read `query` from an `ask` body.
///
/// An absent field (or a body that is not a JSON object) means the empty
/// query; a field of any other type is rejected.
fn query_field(body: &Value) -> Result<String, AppError> {
    match body.get("query") {
        None => Ok(String::new()),
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(QUERY_TYPE_MESSAGE.to_string())),
    }
}

// ============================================================================
// Page Routes
// ============================================================================

pub fn page_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(home))
}

async fn home(State(state): State<AppStateArc>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.home.render()?))
}

// ============================================================================
// Ask Routes
// ============================================================================

pub fn ask_routes() -> Router<AppStateArc> {
    Router::new().route("/ask", post(ask))
}

async fn ask(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError> {
    let query = query_field(&parse_body::<Value>(&body))?;
    info!(query = %query, "Received question");

    let resolution = state.resolver.resolve_with_source(&query).await;
    tracing::debug!("Answer source: {:?}", resolution.source);

    if let Err(e) = state.log.record(&query, &resolution.answer) {
        warn!("Failed to log interaction: {}", e);
    }

    Ok(Json(AskResponse {
        response: resolution.answer,
    }))
}

// ============================================================================
// Admin Routes
// ============================================================================

pub fn admin_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/admin/upload", post(upload_knowledge))
        .route("/admin/logs", get(get_logs))
        .route("/admin/view_db", post(view_db))
}

async fn upload_knowledge(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req: UploadRequest = parse_body(&body);

    let entry = KnowledgeEntry::from_upload(&req.question, &req.answer)
        .ok_or_else(|| AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;

    state.knowledge.insert_entry(&entry)?;
    info!(question = %entry.question, "Knowledge base entry added");

    Ok(Json(MessageResponse {
        message: UPLOAD_OK_MESSAGE.to_string(),
    }))
}

async fn get_logs(State(state): State<AppStateArc>) -> Result<Json<Vec<LogEntry>>, ApiError> {
    Ok(Json(state.log.all_logs()?))
}

async fn view_db(
    State(state): State<AppStateArc>,
) -> Result<Json<Vec<KnowledgeEntry>>, ApiError> {
    Ok(Json(state.knowledge.all_entries()?))
}
