pub mod admin;
pub mod auth;
pub mod form_fields;
pub mod health;
pub mod onboarding;
pub mod preferences;
pub mod progress;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public, 409 on duplicate)
/// /auth/login                             login (public)
///
/// /form-fields                            list, create
/// /form-fields/{id}                       update, delete
/// /form-fields/{id}/move                  move to another page (POST)
///
/// /progress                               get one or all, save, delete
///
/// /onboarding/sessions                    mount (POST)
/// /onboarding/sessions/{email}            snapshot, unmount
/// /onboarding/sessions/{email}/values     record a value change (PUT)
/// /onboarding/sessions/{email}/next       advance (POST)
/// /onboarding/sessions/{email}/previous   go back (POST)
/// /onboarding/sessions/{email}/submit     submit final page (POST)
///
/// /admin/users                            list users (auth required)
///
/// /user/preferences/{key}                 get, set (auth required)
///
/// /uploads/avatar                         placeholder avatar upload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/form-fields", form_fields::router())
        .nest("/progress", progress::router())
        .nest("/onboarding", onboarding::router())
        .nest("/admin", admin::router())
        .nest("/user/preferences", preferences::router())
        .nest("/uploads", uploads::router())
}
