use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use second_brain_core::{Note, NoteUpdate, PublicNoteListing};
use second_brain_db::DbError;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::classifier::ClassificationOutcome;
use crate::ingest::{IngestError, IngestRequest};
use crate::state::AppState;

/// Chat request from HTTP API
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Chat response for HTTP API
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response to a note capture
#[derive(Debug, Serialize)]
pub struct CreatedNote {
    pub note: Note,
    /// `generated` or `fallback`
    pub classification: &'static str,
}

/// Query string of the public listing
#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    pub key: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error carrying the HTTP status to answer with.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NoteNotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            DbError::InvalidNote(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            other => {
                error!("Note store error: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::EmptyContent => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            IngestError::Store(db) => db.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/notes", get(list_notes_handler).post(create_note_handler))
        .route(
            "/notes/{id}",
            get(get_note_handler)
                .patch(update_note_handler)
                .delete(delete_note_handler),
        )
        .route("/chat", post(chat_handler))
        .route("/public/notes", get(public_notes_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /notes
async fn list_notes_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// POST /notes
async fn create_note_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestRequest>,
) -> Result<(StatusCode, Json<CreatedNote>), ApiError> {
    let stored = state
        .ingestor
        .ingest(state.store.as_ref(), request)
        .await?;

    let classification = match stored.outcome {
        ClassificationOutcome::Generated => "generated",
        ClassificationOutcome::Fallback { .. } => "fallback",
    };

    Ok((
        StatusCode::CREATED,
        Json(CreatedNote {
            note: stored.note,
            classification,
        }),
    ))
}

/// GET /notes/{id}
async fn get_note_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.store.get(&id).await?))
}

/// PATCH /notes/{id}
async fn update_note_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<NoteUpdate>,
) -> Result<Json<Note>, ApiError> {
    if update.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "title or content is required",
        ));
    }
    Ok(Json(state.store.update(&id, update).await?))
}

/// DELETE /notes/{id}
async fn delete_note_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /chat
///
/// Always answers with `{reply}`; soft failures use status 500.
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let answer = state
        .answerer
        .ask(state.store.as_ref(), &request.message)
        .await;

    let status = if answer.is_answered() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ChatResponse {
            reply: answer.reply,
        }),
    )
}

/// GET /public/notes?key=...
async fn public_notes_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicQuery>,
) -> Result<Json<PublicNoteListing>, ApiError> {
    if !state.public_key_matches(query.key.as_deref()) {
        warn!("Rejected public listing request with a bad key");
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let notes = state.store.list().await?;
    Ok(Json(PublicNoteListing::from_notes(&notes)))
}
