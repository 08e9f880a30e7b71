//! services/api/src/web/auth.rs
//!
//! Simulated login and registration. There is no credential store: after a fixed
//! delay the form is checked for shape only and the client is sent to the
//! dashboard.

use axum::{extract::State, http::StatusCode, Json};
use reading_tutor_core::routes::Route;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub redirect_to: String,
}

fn check_credentials(email: &str, password: &str) -> Result<(), (StatusCode, String)> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter a valid email address".to_string(),
        ));
    }
    if password.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Password is required".to_string()));
    }
    Ok(())
}

fn to_dashboard() -> Json<AuthResponse> {
    Json(AuthResponse {
        redirect_to: Route::Dashboard.path(),
    })
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Simulated sign-in
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Malformed email or missing password")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    tokio::time::sleep(state.config.auth_delay).await;

    check_credentials(&req.email, &req.password).inspect_err(|(_, message)| {
        warn!("Rejected login form: {}", message);
    })?;

    info!("Simulated login for {}", req.email.trim());
    Ok(to_dashboard())
}

/// POST /auth/register - Simulated account creation
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing name, malformed email or missing password")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, String)> {
    tokio::time::sleep(state.config.auth_delay).await;

    if req.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".to_string()));
    }
    check_credentials(&req.email, &req.password)?;

    info!("Simulated registration for {}", req.email.trim());
    Ok((StatusCode::CREATED, to_dashboard()))
}
