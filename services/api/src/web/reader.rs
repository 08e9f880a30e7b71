//! services/api/src/web/reader.rs
//!
//! Endpoints for the paginated reader. Each opened document gets its own reader
//! model keyed by a session id; positions live only as long as the process, and
//! only `MAX_OPEN_READERS` sessions are kept at once.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use reading_tutor_core::{catalog, reader::PaginatedReaderModel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Everything the reader screen renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReaderView {
    pub session_id: Uuid,
    pub document_id: u32,
    pub title: String,
    pub author: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub content: String,
    pub font_size: u8,
    /// Completion percentage rounded for display.
    pub progress: f64,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl ReaderView {
    fn new(session_id: Uuid, reader: &PaginatedReaderModel) -> Self {
        let document = reader.document();
        Self {
            session_id,
            document_id: document.id,
            title: document.title.clone(),
            author: document.author.clone(),
            current_page: reader.current_page(),
            total_pages: reader.total_pages(),
            content: reader.current_content().to_string(),
            font_size: reader.font_size(),
            progress: reader.progress_display(),
            can_go_previous: reader.can_go_previous(),
            can_go_next: reader.can_go_next(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FontSizeRequest {
    /// Requested size in pixels; clamped to 12..=24.
    pub font_size: u8,
}

fn session_not_found(session_id: Uuid) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("Reader session {} not found", session_id),
    )
}

/// Runs `f` against one open reader and renders the result.
async fn with_reader<F>(
    state: &AppState,
    session_id: Uuid,
    f: F,
) -> Result<Json<ReaderView>, (StatusCode, String)>
where
    F: FnOnce(&mut PaginatedReaderModel),
{
    let mut readers = state.readers.lock().await;
    let reader = readers
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    f(reader);
    Ok(Json(ReaderView::new(session_id, reader)))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Open a library book in the reader, starting on page 1.
#[utoipa::path(
    post,
    path = "/reader/{document_id}",
    params(("document_id" = u32, Path, description = "Library book id")),
    responses(
        (status = 201, description = "Reader opened", body = ReaderView),
        (status = 404, description = "No such book")
    )
)]
pub async fn open_reader_handler(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<u32>,
) -> Result<(StatusCode, Json<ReaderView>), (StatusCode, String)> {
    let document = catalog::document(document_id).ok_or_else(|| {
        warn!("Reader requested for unknown document {}", document_id);
        (
            StatusCode::NOT_FOUND,
            format!("Document {} not found", document_id),
        )
    })?;

    let session_id = Uuid::new_v4();
    let reader = PaginatedReaderModel::new(document);
    let view = ReaderView::new(session_id, &reader);
    let evicted = state.readers.lock().await.insert(session_id, reader);
    if let Some(closed) = evicted {
        info!(%closed, "Reader limit reached, closed least recently used session");
    }

    info!(%session_id, document_id, "Reader opened");
    Ok((StatusCode::CREATED, Json(view)))
}

/// Current state of an open reader.
#[utoipa::path(
    get,
    path = "/reader/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "Reader session id")),
    responses(
        (status = 200, description = "Reader state", body = ReaderView),
        (status = 404, description = "Unknown reader session")
    )
)]
pub async fn get_reader_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ReaderView>, (StatusCode, String)> {
    with_reader(&state, session_id, |_| {}).await
}

/// Advance one page. On the last page this is a no-op.
#[utoipa::path(
    post,
    path = "/reader/sessions/{session_id}/next",
    params(("session_id" = Uuid, Path, description = "Reader session id")),
    responses(
        (status = 200, description = "Reader state", body = ReaderView),
        (status = 404, description = "Unknown reader session")
    )
)]
pub async fn next_page_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ReaderView>, (StatusCode, String)> {
    with_reader(&state, session_id, |reader| {
        reader.next();
    })
    .await
}

/// Go back one page. On the first page this is a no-op.
#[utoipa::path(
    post,
    path = "/reader/sessions/{session_id}/previous",
    params(("session_id" = Uuid, Path, description = "Reader session id")),
    responses(
        (status = 200, description = "Reader state", body = ReaderView),
        (status = 404, description = "Unknown reader session")
    )
)]
pub async fn previous_page_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ReaderView>, (StatusCode, String)> {
    with_reader(&state, session_id, |reader| {
        reader.previous();
    })
    .await
}

/// Change the reader font size.
#[utoipa::path(
    put,
    path = "/reader/sessions/{session_id}/font-size",
    params(("session_id" = Uuid, Path, description = "Reader session id")),
    request_body = FontSizeRequest,
    responses(
        (status = 200, description = "Reader state", body = ReaderView),
        (status = 404, description = "Unknown reader session")
    )
)]
pub async fn font_size_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<FontSizeRequest>,
) -> Result<Json<ReaderView>, (StatusCode, String)> {
    with_reader(&state, session_id, |reader| {
        reader.set_font_size(req.font_size);
    })
    .await
}

/// Close a reader. Its position is discarded.
#[utoipa::path(
    delete,
    path = "/reader/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "Reader session id")),
    responses(
        (status = 204, description = "Reader closed"),
        (status = 404, description = "Unknown reader session")
    )
)]
pub async fn close_reader_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .readers
        .lock()
        .await
        .remove(&session_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| session_not_found(session_id))
}
