//! crates/reading_tutor_core/src/routes.rs
//!
//! The named screens of the application and their paths.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    ReadingList,
    Library,
    Profile,
    Reader { document_id: u32 },
    Sessions,
}

impl Route {
    /// Every parameterless route, in navigation order.
    pub const STATIC: [Route; 8] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::ReadingList,
        Route::Library,
        Route::Profile,
        Route::Sessions,
    ];

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::ReadingList => "/dashboard/reading-list".to_string(),
            Route::Library => "/dashboard/library".to_string(),
            Route::Profile => "/dashboard/profile".to_string(),
            Route::Reader { document_id } => format!("/dashboard/reader/{}", document_id),
            Route::Sessions => "/dashboard/sessions".to_string(),
        }
    }

    /// Resolves a path to a route. A trailing slash is ignored; query strings are not accepted.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        let route = match trimmed {
            "/" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/dashboard/reading-list" => Route::ReadingList,
            "/dashboard/library" => Route::Library,
            "/dashboard/profile" => Route::Profile,
            "/dashboard/sessions" => Route::Sessions,
            other => {
                let id = other.strip_prefix("/dashboard/reader/")?;
                Route::Reader {
                    document_id: id.parse().ok()?,
                }
            }
        };
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes_round_trip_through_their_paths() {
        for route in Route::STATIC {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn reader_route_carries_the_document_id() {
        assert_eq!(
            Route::parse("/dashboard/reader/42/"),
            Some(Route::Reader { document_id: 42 })
        );
        assert_eq!(Route::Reader { document_id: 7 }.path(), "/dashboard/reader/7");
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert_eq!(Route::parse("/dashboard/reader/abc"), None);
        assert_eq!(Route::parse("/dashboard/settings"), None);
        assert_eq!(Route::parse("/dashboard/reader/"), None);
    }
}
