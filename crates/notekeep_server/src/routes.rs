//! Axum handlers for the `/api/notes` resource.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use notekeep_core::{
    core_version, Note, NoteDraft, NoteId, NotePatch, NoteService, NoteServiceError, NoteStore,
};
use serde_json::json;
use std::sync::Arc;

pub const NOTES_PATH: &str = "/api/notes";

/// Shared handler state; the store is chosen by whoever builds the router.
pub struct AppState<S: NoteStore> {
    pub notes: NoteService<S>,
}

impl<S: NoteStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            notes: NoteService::new(store),
        }
    }
}

type SharedState<S> = Arc<AppState<S>>;

/// Builds the router with every note route plus `/health`.
pub fn build_router<S>(state: SharedState<S>) -> Router
where
    S: NoteStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(NOTES_PATH, get(list_notes::<S>).post(create_note::<S>))
        .route(
            &format!("{NOTES_PATH}/:id"),
            get(get_note::<S>)
                .put(update_note::<S>)
                .patch(patch_note::<S>)
                .delete(delete_note::<S>),
        )
        .with_state(state)
}

/// Core failure rendered as a JSON error body.
pub struct ApiError(NoteServiceError);

impl From<NoteServiceError> for ApiError {
    fn from(value: NoteServiceError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            NoteServiceError::NoteNotFound(_) => StatusCode::NOT_FOUND,
            NoteServiceError::Repo(err) => {
                log::error!("event=http_request module=server status=error error={err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": core_version() }))
}

// GET /api/notes
async fn list_notes<S: NoteStore>(
    State(state): State<SharedState<S>>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(state.notes.list_notes()?))
}

// GET /api/notes/:id
async fn get_note<S: NoteStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<NoteId>,
) -> ApiResult<Json<Note>> {
    Ok(Json(state.notes.get_note(id)?))
}

// POST /api/notes -> 201 + Location
async fn create_note<S: NoteStore>(
    State(state): State<SharedState<S>>,
    Json(draft): Json<NoteDraft>,
) -> ApiResult<impl IntoResponse> {
    let created = state.notes.create_note(draft)?;
    let location = format!("{NOTES_PATH}/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/notes/:id
async fn update_note<S: NoteStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<NoteId>,
    Json(draft): Json<NoteDraft>,
) -> ApiResult<Json<Note>> {
    Ok(Json(state.notes.update_note(id, draft)?))
}

// PATCH /api/notes/:id
async fn patch_note<S: NoteStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<NoteId>,
    Json(patch): Json<NotePatch>,
) -> ApiResult<Json<Note>> {
    Ok(Json(state.notes.patch_note(id, patch)?))
}

// DELETE /api/notes/:id -> 204
async fn delete_note<S: NoteStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<NoteId>,
) -> ApiResult<StatusCode> {
    state.notes.delete_note(id)?;
    Ok(StatusCode::NO_CONTENT)
}
