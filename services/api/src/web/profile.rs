//! services/api/src/web/profile.rs
//!
//! Endpoints for the profile form. The form model lives in `AppState`; its lock
//! is never held across the simulated save delay or an upload read, so the
//! screen stays responsive while those are in flight.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use reading_tutor_core::{
    domain::ProfileRecord,
    profile::{AvatarFile, ProfileError, ProfileField, ProfileFormModel},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::web::state::AppState;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// Everything the profile screen renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileView {
    #[schema(value_type = Object)]
    pub record: ProfileRecord,
    pub dirty: bool,
    pub is_loading: bool,
    pub is_saving: bool,
    pub is_uploading_avatar: bool,
    pub can_save: bool,
    /// A transient message for the client to show, e.g. after a fallback load.
    pub notice: Option<String>,
}

impl ProfileView {
    fn new(model: &ProfileFormModel, notice: Option<String>) -> Self {
        Self {
            record: model.record().clone(),
            dirty: model.is_dirty(),
            is_loading: model.is_loading(),
            is_saving: model.is_saving(),
            is_uploading_avatar: model.is_uploading_avatar(),
            can_save: model.can_save(),
            notice,
        }
    }
}

/// Maps a profile error to a status and the single message shown to the user.
fn error_response(e: ProfileError) -> (StatusCode, String) {
    match e {
        ProfileError::Validation(v) => (StatusCode::UNPROCESSABLE_ENTITY, v.first().to_string()),
        ProfileError::SaveInProgress
        | ProfileError::UploadInProgress
        | ProfileError::StaleUpload
        | ProfileError::NotLoaded
        | ProfileError::NoChanges => (StatusCode::CONFLICT, e.to_string()),
        ProfileError::AvatarRead(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        ProfileError::StorageRead(_) | ProfileError::Port(_) => {
            error!("Profile storage failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Loads the profile the first time the screen is shown.
///
/// Load failures never block the screen: the model falls back to the default
/// record and the failure is handed back once so the caller can surface it.
async fn ensure_loaded(model: &mut ProfileFormModel) -> Option<ProfileError> {
    if !model.is_loading() {
        return None;
    }
    match model.load().await {
        Ok(source) => {
            info!(?source, "Profile loaded");
            None
        }
        Err(e) => {
            warn!("Profile load fell back to defaults: {}", e);
            Some(e)
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// The profile form, loading it from storage on first access.
#[utoipa::path(
    get,
    path = "/profile",
    responses((status = 200, description = "Profile form state", body = ProfileView))
)]
pub async fn get_profile_handler(State(state): State<Arc<AppState>>) -> Json<ProfileView> {
    let mut profile = state.profile.lock().await;
    let notice = ensure_loaded(&mut profile).await.map(|e| e.to_string());
    Json(ProfileView::new(&profile, notice))
}

/// Apply field edits to the in-memory profile.
#[utoipa::path(
    patch,
    path = "/profile",
    request_body(
        content_type = "application/json",
        description = "A list of field updates, e.g. [{\"field\": \"name\", \"value\": \"Sam\"}]."
    ),
    responses((status = 200, description = "Profile form state", body = ProfileView))
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<Vec<ProfileField>>,
) -> Json<ProfileView> {
    let mut profile = state.profile.lock().await;
    let notice = ensure_loaded(&mut profile).await.map(|e| e.to_string());
    for field in fields {
        profile.apply(field);
    }
    Json(ProfileView::new(&profile, notice))
}

/// Validate and persist the profile after the simulated network delay.
#[utoipa::path(
    post,
    path = "/profile/save",
    responses(
        (status = 200, description = "Saved", body = ProfileView),
        (status = 409, description = "A save is already in progress, or nothing changed"),
        (status = 422, description = "First validation failure"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn save_profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProfileView>, (StatusCode, String)> {
    let pending = {
        let mut profile = state.profile.lock().await;
        // A fallback load must reach the user before anything overwrites storage.
        if let Some(load_error) = ensure_loaded(&mut profile).await {
            return Err(error_response(load_error));
        }
        profile.prepare_save().map_err(error_response)?
    };

    // The write runs in its own task so a dropped request cannot leave the
    // model stuck in its saving state.
    let task_state = state.clone();
    let finished = tokio::spawn(async move {
        tokio::time::sleep(task_state.config.save_delay).await;
        let written = pending.write(task_state.store.as_ref()).await;
        let mut profile = task_state.profile.lock().await;
        profile
            .finish_save(pending, written)
            .map(|()| ProfileView::new(&profile, None))
    })
    .await
    .map_err(|e| {
        error!("Profile save task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save profile".to_string())
    })?;

    finished.map(Json).map_err(error_response)
}

/// Revert unsaved edits.
#[utoipa::path(
    post,
    path = "/profile/discard",
    responses((status = 200, description = "Profile form state", body = ProfileView))
)]
pub async fn discard_profile_handler(State(state): State<Arc<AppState>>) -> Json<ProfileView> {
    let mut profile = state.profile.lock().await;
    profile.discard();
    Json(ProfileView::new(&profile, None))
}

async fn read_avatar(mut multipart: Multipart) -> Result<AvatarFile, String> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read multipart data: {}", e))?
        .ok_or_else(|| "Multipart form must include a file".to_string())?;

    let mime = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| format!("Failed to read file bytes: {}", e))?;

    Ok(AvatarFile {
        mime,
        bytes: bytes.to_vec(),
    })
}

/// Replace the avatar with an uploaded image, stored inline as a data URL.
#[utoipa::path(
    post,
    path = "/profile/avatar",
    request_body(content_type = "multipart/form-data", description = "A single image file."),
    responses(
        (status = 200, description = "Avatar replaced", body = ProfileView),
        (status = 400, description = "File could not be read or is not an image"),
        (status = 409, description = "Another upload is in progress")
    )
)]
pub async fn upload_avatar_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ProfileView>, (StatusCode, String)> {
    let (token, notice) = {
        let mut profile = state.profile.lock().await;
        let notice = ensure_loaded(&mut profile).await.map(|e| e.to_string());
        (profile.begin_avatar_upload().map_err(error_response)?, notice)
    };

    // Same reasoning as saving: the upload slot is always released.
    let task_state = state.clone();
    let view_notice = notice.clone();
    let finished = tokio::spawn(async move {
        let file = read_avatar(multipart).await;
        let mut profile = task_state.profile.lock().await;
        profile
            .complete_avatar_upload(token, file)
            .map(|()| ProfileView::new(&profile, view_notice))
    })
    .await
    .map_err(|e| {
        error!("Avatar upload task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to upload avatar".to_string())
    })?;

    finished.map(Json).map_err(|e| {
        let (status, message) = error_response(e);
        match notice {
            Some(notice) => (status, format!("{} ({})", message, notice)),
            None => (status, message),
        }
    })
}
