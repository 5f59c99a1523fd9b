//! Handlers for the `/user/preferences` resource.
//!
//! A small per-user key-value store for UI preferences (the dark-mode
//! flag, for one), deliberately decoupled from onboarding progress so an
//! administrative progress wipe never resets a user's theme.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use onboard_core::error::CoreError;
use onboard_db::models::preference::UpsertPreference;
use onboard_db::repositories::PreferenceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user/preferences/{key}
///
/// Read one preference. A key that was never set is a 404; clients apply
/// their own default.
pub async fn get_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pref = PreferenceRepo::get(&state.pool, &auth.email, &key)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Preference",
                id: key,
            })
        })?;

    Ok(Json(DataResponse { data: pref }))
}

/// PUT /api/v1/user/preferences/{key}
///
/// Set one preference value (insert or overwrite).
pub async fn put_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    Json(body): Json<UpsertPreference>,
) -> AppResult<impl IntoResponse> {
    let pref = PreferenceRepo::upsert(&state.pool, &auth.email, &key, &body.value).await?;

    tracing::debug!(email = %auth.email, key = %pref.pref_key, "Preference saved");

    Ok(Json(DataResponse { data: pref }))
}
