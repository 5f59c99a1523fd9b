//! Handlers for the `/progress` resource.
//!
//! Raw access to per-user progress records: the administrative console
//! lists and deletes them, and clients without a live flow session can
//! load and save directly. Saves are wholesale upserts -- last write wins.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use onboard_core::error::CoreError;
use onboard_core::progress::{reconcile_status, INITIAL_PAGE};
use onboard_db::models::progress::{DefaultProgress, SaveProgress};
use onboard_db::repositories::ProgressRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters shared by progress reads and deletes.
#[derive(Debug, Deserialize)]
pub struct ProgressParams {
    pub email: Option<String>,
    pub all: Option<bool>,
}

// ---------------------------------------------------------------------------
// GET /progress
// ---------------------------------------------------------------------------

/// Get one user's progress, or every record with `?all=true`.
///
/// An email that has never saved gets the zero-value record -- loading is
/// never an error. The full listing is ordered most recently updated
/// first.
pub async fn get_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressParams>,
) -> AppResult<Response> {
    let fetch_all = params.all.unwrap_or(false);
    let Some(email) = params.email.filter(|_| !fetch_all) else {
        let items = ProgressRepo::list_all(&state.pool).await?;
        tracing::debug!(count = items.len(), "Listed progress records");
        return Ok(Json(DataResponse { data: items }).into_response());
    };

    match ProgressRepo::find_by_email(&state.pool, &email).await? {
        Some(record) => Ok(Json(DataResponse { data: record }).into_response()),
        None => Ok(Json(DataResponse {
            data: DefaultProgress::for_email(&email),
        })
        .into_response()),
    }
}

// ---------------------------------------------------------------------------
// POST /progress
// ---------------------------------------------------------------------------

/// Save (upsert) a user's progress.
///
/// `status` defaults to whatever `completed` implies when not supplied
/// explicitly; a completed status always forces the completed flag.
pub async fn save_progress(
    State(state): State<AppState>,
    Json(body): Json<SaveProgress>,
) -> AppResult<impl IntoResponse> {
    if body.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let current_page = body.current_page.unwrap_or(INITIAL_PAGE);
    if current_page < 1 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "current_page must be a positive integer, got {current_page}"
        ))));
    }

    let form_data = body.form_data.unwrap_or_else(|| serde_json::json!({}));
    if !form_data.is_object() {
        return Err(AppError::Core(CoreError::Validation(
            "form_data must be a JSON object".to_string(),
        )));
    }

    let (completed, status) = reconcile_status(body.completed, body.status.as_deref())?;

    let record = ProgressRepo::upsert(
        &state.pool,
        &body.email,
        current_page,
        &form_data,
        completed,
        status.as_str(),
    )
    .await?;

    tracing::info!(
        email = %record.email,
        page = record.current_page,
        completed = record.completed,
        status = %record.status,
        "Progress saved"
    );

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// DELETE /progress
// ---------------------------------------------------------------------------

/// Delete one user's progress (`?email=`) or every record (`?all=true`).
pub async fn delete_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressParams>,
) -> AppResult<impl IntoResponse> {
    if params.all.unwrap_or(false) {
        let deleted = ProgressRepo::delete_all(&state.pool).await?;
        tracing::info!(deleted, "Deleted all progress records");
        return Ok(Json(DataResponse {
            data: serde_json::json!({ "deleted": deleted }),
        }));
    }

    let Some(email) = params.email else {
        return Err(AppError::BadRequest(
            "Email parameter or all=true is required".to_string(),
        ));
    };

    let deleted = ProgressRepo::delete_by_email(&state.pool, &email).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Progress",
            id: email,
        }));
    }

    tracing::info!(email = %email, "Deleted progress record");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": 1 }),
    }))
}
