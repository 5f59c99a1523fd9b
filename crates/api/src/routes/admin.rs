//! Route definitions for the admin console.
//!
//! Mounted at `/admin` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes -- mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(admin::list_users))
}
