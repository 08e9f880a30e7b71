//! services/api/src/web/rest.rs
//!
//! Contains the read-only dashboard endpoints (navigation, overview, reading
//! list, library, session history) and the master definition for the OpenAPI
//! specification.

use axum::{extract::Query, response::Json};
use reading_tutor_core::{
    catalog,
    domain::{Achievement, CatalogEntry, DashboardOverview, ReadingSession, SessionSummary},
    list_query::{derive_view, ListQueryModel, SortKey},
    routes::Route,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_routes_handler,
        dashboard_handler,
        reading_list_handler,
        library_handler,
        session_history_handler,
        crate::web::auth::login_handler,
        crate::web::auth::register_handler,
        crate::web::reader::open_reader_handler,
        crate::web::reader::get_reader_handler,
        crate::web::reader::next_page_handler,
        crate::web::reader::previous_page_handler,
        crate::web::reader::font_size_handler,
        crate::web::reader::close_reader_handler,
        crate::web::profile::get_profile_handler,
        crate::web::profile::update_profile_handler,
        crate::web::profile::save_profile_handler,
        crate::web::profile::discard_profile_handler,
        crate::web::profile::upload_avatar_handler,
    ),
    components(
        schemas(
            RouteView,
            ReadingListView,
            LibraryView,
            SessionHistoryView,
            crate::web::auth::LoginRequest,
            crate::web::auth::RegisterRequest,
            crate::web::auth::AuthResponse,
            crate::web::reader::ReaderView,
            crate::web::reader::FontSizeRequest,
            crate::web::profile::ProfileView,
        )
    ),
    tags(
        (
            name = "Reading Tutor API",
            description = "View state for the reading tutor dashboard screens."
        )
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Query Structs
//=========================================================================================

/// A navigable screen and its path.
#[derive(Serialize, ToSchema)]
pub struct RouteView {
    #[schema(value_type = Object)]
    pub route: Route,
    pub path: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadingListQuery {
    /// Case-insensitive search over title and author.
    pub q: Option<String>,
    /// `by-last-read` (default), `by-progress`, `by-title`, `by-author` or `by-level`.
    #[param(value_type = Option<String>)]
    pub sort: Option<SortKey>,
}

/// The reading list tabs, all derived from one filter and sort pass.
#[derive(Serialize, ToSchema)]
pub struct ReadingListView {
    pub query: String,
    #[schema(value_type = String)]
    pub sort: SortKey,
    #[schema(value_type = Vec<Object>)]
    pub all: Vec<CatalogEntry>,
    #[schema(value_type = Vec<Object>)]
    pub in_progress: Vec<CatalogEntry>,
    #[schema(value_type = Vec<Object>)]
    pub completed: Vec<CatalogEntry>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LibraryQuery {
    /// Case-insensitive search over title and author.
    pub q: Option<String>,
    /// `fiction`, `non-fiction`, `science`, `history`, a genre name, or `all`.
    pub category: Option<String>,
    /// Same keys as the reading list; `by-last-read` stands in for "recently added".
    #[param(value_type = Option<String>)]
    pub sort: Option<SortKey>,
}

#[derive(Serialize, ToSchema)]
pub struct LibraryView {
    pub category: String,
    #[schema(value_type = String)]
    pub sort: SortKey,
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<CatalogEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct SessionHistoryView {
    #[schema(value_type = Vec<Object>)]
    pub sessions: Vec<ReadingSession>,
    #[schema(value_type = Object)]
    pub summary: SessionSummary,
    #[schema(value_type = Vec<Object>)]
    pub achievements: Vec<Achievement>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the application's navigable screens.
#[utoipa::path(
    get,
    path = "/routes",
    responses((status = 200, description = "Named routes", body = [RouteView]))
)]
pub async fn list_routes_handler() -> Json<Vec<RouteView>> {
    let readers = catalog::library()
        .into_iter()
        .map(|entry| Route::Reader { document_id: entry.id });

    let routes = Route::STATIC
        .into_iter()
        .chain(readers)
        .map(|route| RouteView {
            path: route.path(),
            route,
        })
        .collect();
    Json(routes)
}

/// The dashboard overview: weekly charts and current shelves.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = 200, description = "Dashboard overview"))
)]
pub async fn dashboard_handler() -> Json<DashboardOverview> {
    Json(catalog::overview())
}

/// The reading list, filtered and sorted.
#[utoipa::path(
    get,
    path = "/reading-list",
    params(ReadingListQuery),
    responses(
        (status = 200, description = "Reading list tabs", body = ReadingListView),
        (status = 400, description = "Unknown sort key")
    )
)]
pub async fn reading_list_handler(
    Query(params): Query<ReadingListQuery>,
) -> Json<ReadingListView> {
    let mut model = ListQueryModel::new(catalog::reading_list());
    if let Some(q) = params.q {
        model.set_query(q);
    }
    if let Some(sort) = params.sort {
        model.set_sort_key(sort);
    }

    let parts = model.partitions();
    let owned = |entries: &[&CatalogEntry]| -> Vec<CatalogEntry> {
        entries.iter().map(|e| (*e).clone()).collect()
    };
    let view = ReadingListView {
        query: model.query().to_string(),
        sort: model.sort_key(),
        all: owned(parts.all()),
        in_progress: owned(parts.in_progress()),
        completed: owned(parts.completed()),
    };
    debug!(
        query = %view.query,
        sort = ?view.sort,
        matches = view.all.len(),
        "Reading list derived"
    );
    Json(view)
}

/// The personal library, narrowed by search text and category, then sorted.
#[utoipa::path(
    get,
    path = "/library",
    params(LibraryQuery),
    responses(
        (status = 200, description = "Library entries", body = LibraryView),
        (status = 400, description = "Unknown sort key")
    )
)]
pub async fn library_handler(Query(params): Query<LibraryQuery>) -> Json<LibraryView> {
    let books = catalog::library();
    let category = params.category.unwrap_or_else(|| "all".to_string());
    let query = params.q.unwrap_or_default();
    let sort = params.sort.unwrap_or_default();

    let shelf: Vec<CatalogEntry> = catalog::filter_by_category(&books, &category)
        .into_iter()
        .cloned()
        .collect();
    let entries = derive_view(&shelf, &query, sort).into_iter().cloned().collect();
    Json(LibraryView {
        category,
        sort,
        entries,
    })
}

/// Reading session history with totals and achievements.
#[utoipa::path(
    get,
    path = "/sessions",
    responses((status = 200, description = "Session history", body = SessionHistoryView))
)]
pub async fn session_history_handler() -> Json<SessionHistoryView> {
    let sessions = catalog::recent_sessions();
    let summary = SessionSummary::from_sessions(&sessions);
    Json(SessionHistoryView {
        sessions,
        summary,
        achievements: catalog::achievements(),
    })
}
