//! Route definitions for progress records.
//!
//! Mounted at `/progress` by `api_routes()`.
//!
//! ```text
//! GET    /    get_progress (?email, ?all=true)
//! POST   /    save_progress
//! DELETE /    delete_progress (?email, ?all=true)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Progress routes -- mounted at `/progress`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(progress::get_progress)
            .post(progress::save_progress)
            .delete(progress::delete_progress),
    )
}
