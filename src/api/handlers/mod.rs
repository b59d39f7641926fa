use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::AppState;
use crate::models::*;
use crate::nlm::{NlmError, NotebookService};

// ============================================================
// Error Handling
// ============================================================

/// Map a service error to a status and a client-facing message.
///
/// Not-found errors become 404, rejected input 400, and everything else a
/// 500 carrying the nlm message. Messages never include credentials.
fn service_error(e: NlmError) -> (StatusCode, String) {
    let status = match &e {
        NlmError::NotebookNotFound(_) | NlmError::SourceNotFound(_) => StatusCode::NOT_FOUND,
        NlmError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("nlm error: {}", e);
    } else {
        tracing::warn!("Request rejected: {}", e);
    }
    (status, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.service.mode(),
    }))
}

// ============================================================
// Notebooks
// ============================================================

pub async fn list_notebooks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notebook>>, (StatusCode, String)> {
    state
        .service
        .list_notebooks()
        .await
        .map(Json)
        .map_err(service_error)
}

pub async fn create_notebook(
    State(state): State<AppState>,
    Json(input): Json<CreateNotebookInput>,
) -> Result<(StatusCode, Json<Notebook>), (StatusCode, String)> {
    state
        .service
        .create_notebook(&input)
        .await
        .map(|nb| (StatusCode::CREATED, Json(nb)))
        .map_err(service_error)
}

pub async fn get_notebook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notebook>, (StatusCode, String)> {
    state
        .service
        .get_notebook(&id)
        .await
        .map(Json)
        .map_err(service_error)
}

pub async fn delete_notebook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .delete_notebook(&id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Sources
// ============================================================

pub async fn list_sources(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Source>>, (StatusCode, String)> {
    state
        .service
        .list_sources(&id)
        .await
        .map(Json)
        .map_err(service_error)
}

pub async fn add_source(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AddSourceInput>,
) -> Result<(StatusCode, Json<Source>), (StatusCode, String)> {
    state
        .service
        .add_source(&id, &input)
        .await
        .map(|s| (StatusCode::CREATED, Json(s)))
        .map_err(service_error)
}

pub async fn delete_source(
    State(state): State<AppState>,
    Path((id, source_id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .delete_source(&id, &source_id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn rename_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    Json(input): Json<RenameSourceInput>,
) -> Result<StatusCode, (StatusCode, String)> {
    input.validate().map_err(service_error)?;
    state
        .service
        .rename_source(&source_id, &input.name)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Generated content
// ============================================================

pub async fn generate_content(
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
) -> Result<Json<GeneratedContent>, (StatusCode, String)> {
    let kind: GenerateKind = kind.parse().map_err(service_error)?;
    let content = state
        .service
        .generate(&id, kind)
        .await
        .map_err(service_error)?;

    Ok(Json(GeneratedContent {
        notebook_id: id,
        kind,
        content,
    }))
}

// ============================================================
// Audio overviews
// ============================================================

pub async fn create_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateAudioInput>,
) -> Result<(StatusCode, Json<AudioOverview>), (StatusCode, String)> {
    state
        .service
        .create_audio(&id, &input)
        .await
        .map(|a| (StatusCode::CREATED, Json(a)))
        .map_err(service_error)
}

pub async fn get_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AudioOverview>, (StatusCode, String)> {
    state
        .service
        .get_audio(&id)
        .await
        .map(Json)
        .map_err(service_error)
}

pub async fn list_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AudioOverview>>, (StatusCode, String)> {
    state
        .service
        .list_audio(&id)
        .await
        .map(Json)
        .map_err(service_error)
}

pub async fn delete_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .delete_audio(&id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Note>>, (StatusCode, String)> {
    state
        .service
        .list_notes(&id)
        .await
        .map(Json)
        .map_err(service_error)
}

pub async fn create_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateNoteInput>,
) -> Result<(StatusCode, Json<Note>), (StatusCode, String)> {
    state
        .service
        .create_note(&id, &input)
        .await
        .map(|n| (StatusCode::CREATED, Json(n)))
        .map_err(service_error)
}

pub async fn update_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
    Json(input): Json<UpdateNoteInput>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .update_note(&id, &note_id, &input)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .delete_note(&note_id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
