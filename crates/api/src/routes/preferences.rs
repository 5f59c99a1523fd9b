//! Route definitions for per-user preferences.
//!
//! Mounted at `/user/preferences` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// Preference routes -- mounted at `/user/preferences`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{key}",
        get(preferences::get_preference).put(preferences::put_preference),
    )
}
