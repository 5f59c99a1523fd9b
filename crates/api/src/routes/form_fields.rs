//! Route definitions for the field catalog.
//!
//! Mounted at `/form-fields` by `api_routes()`.
//!
//! ```text
//! GET    /              list_fields
//! POST   /              create_field
//! PUT    /{id}          update_field
//! DELETE /{id}          delete_field
//! POST   /{id}/move     move_field
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::form_fields;
use crate::state::AppState;

/// Field catalog routes -- mounted at `/form-fields`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(form_fields::list_fields).post(form_fields::create_field),
        )
        .route(
            "/{id}",
            put(form_fields::update_field).delete(form_fields::delete_field),
        )
        .route("/{id}/move", post(form_fields::move_field))
}
