pub mod auth;
pub mod profile;
pub mod reader;
pub mod rest;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use state::AppState;

/// Builds the API router for every dashboard screen.
pub fn router(app_state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler));

    let dashboard_routes = Router::new()
        .route("/routes", get(rest::list_routes_handler))
        .route("/dashboard", get(rest::dashboard_handler))
        .route("/reading-list", get(rest::reading_list_handler))
        .route("/library", get(rest::library_handler))
        .route("/sessions", get(rest::session_history_handler));

    let reader_routes = Router::new()
        .route("/reader/{document_id}", post(reader::open_reader_handler))
        .route(
            "/reader/sessions/{session_id}",
            get(reader::get_reader_handler).delete(reader::close_reader_handler),
        )
        .route("/reader/sessions/{session_id}/next", post(reader::next_page_handler))
        .route(
            "/reader/sessions/{session_id}/previous",
            post(reader::previous_page_handler),
        )
        .route(
            "/reader/sessions/{session_id}/font-size",
            put(reader::font_size_handler),
        );

    let profile_routes = Router::new()
        .route(
            "/profile",
            get(profile::get_profile_handler).patch(profile::update_profile_handler),
        )
        .route("/profile/save", post(profile::save_profile_handler))
        .route("/profile/discard", post(profile::discard_profile_handler))
        .route("/profile/avatar", post(profile::upload_avatar_handler))
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024));

    Router::new()
        .merge(auth_routes)
        .merge(dashboard_routes)
        .merge(reader_routes)
        .merge(profile_routes)
        .with_state(app_state)
}
