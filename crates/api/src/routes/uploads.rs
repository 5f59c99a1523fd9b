//! Route definitions for uploads.
//!
//! Mounted at `/uploads` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload routes -- mounted at `/uploads`.
pub fn router() -> Router<AppState> {
    Router::new().route("/avatar", post(uploads::upload_avatar))
}
