//! Route definitions for onboarding flow sessions.
//!
//! Mounted at `/onboarding` by `api_routes()`.
//!
//! ```text
//! POST   /sessions                   mount_session
//! GET    /sessions/{email}           get_session
//! DELETE /sessions/{email}           unmount_session
//! PUT    /sessions/{email}/values    set_value
//! POST   /sessions/{email}/next      next_page
//! POST   /sessions/{email}/previous  previous_page
//! POST   /sessions/{email}/submit    submit
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Flow session routes -- mounted at `/onboarding`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(onboarding::mount_session))
        .route(
            "/sessions/{email}",
            get(onboarding::get_session).delete(onboarding::unmount_session),
        )
        .route("/sessions/{email}/values", put(onboarding::set_value))
        .route("/sessions/{email}/next", post(onboarding::next_page))
        .route("/sessions/{email}/previous", post(onboarding::previous_page))
        .route("/sessions/{email}/submit", post(onboarding::submit))
}
