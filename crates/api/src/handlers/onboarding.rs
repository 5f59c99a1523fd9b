//! Handlers for the `/onboarding/sessions` resource.
//!
//! The server-side flow controller: mounting a session loads saved
//! progress, value changes autosave after a quiet period, and the
//! `next`/`previous`/`submit` transitions drive the flow state machine.
//! This module is the only place user-facing flow messages are composed;
//! everything below it reports structured errors.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use onboard_core::error::CoreError;
use onboard_core::field::{self, FieldDefinition};
use onboard_core::flow::FlowError;
use onboard_db::repositories::FormFieldRepo;
use onboard_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::flow::manager::FlowActionError;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for mounting a session.
#[derive(Debug, Deserialize)]
pub struct MountRequest {
    pub email: String,
}

/// Request body for recording one field value change.
#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub label: String,
    pub value: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the field catalog as core definitions.
///
/// Every call hits the store; catalog reads are deliberately uncached so
/// admin edits are visible to the next request.
async fn load_catalog(pool: &DbPool) -> AppResult<Vec<FieldDefinition>> {
    let rows = FormFieldRepo::list(pool).await?;
    let mut catalog = rows
        .iter()
        .map(|row| row.to_definition())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::InternalError(format!("Invalid field row in catalog: {e}")))?;
    field::sort_catalog(&mut catalog);
    Ok(catalog)
}

/// Turn a refused flow action into the message shown to the user.
fn map_flow_error(err: FlowActionError) -> AppError {
    match err {
        FlowActionError::Flow(FlowError::MissingRequired(labels)) => {
            AppError::Core(CoreError::Validation(format!(
                "Please fill in the following required fields: {}",
                labels.join(", ")
            )))
        }
        FlowActionError::Flow(FlowError::AlreadySubmitted) => AppError::Core(
            CoreError::Validation("Onboarding has already been submitted".to_string()),
        ),
        FlowActionError::Flow(FlowError::NotOnFinalPage { current, max }) => {
            AppError::Core(CoreError::Validation(format!(
                "Submit is only available on the final step (currently on step {current} of {max})"
            )))
        }
        FlowActionError::Core(e) => AppError::Core(e),
    }
}

// ---------------------------------------------------------------------------
// POST /onboarding/sessions
// ---------------------------------------------------------------------------

/// Mount a flow session for an email, resuming any saved progress.
///
/// The response carries `welcome_back = true` exactly once when saved
/// form data was restored.
pub async fn mount_session(
    State(state): State<AppState>,
    Json(body): Json<MountRequest>,
) -> AppResult<impl IntoResponse> {
    if body.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let catalog = load_catalog(&state.pool).await?;
    let snapshot = state.flows.mount(&body.email, &catalog).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}

// ---------------------------------------------------------------------------
// GET /onboarding/sessions/{email}
// ---------------------------------------------------------------------------

/// Current snapshot of a mounted session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let catalog = load_catalog(&state.pool).await?;
    let snapshot = state.flows.snapshot(&email, &catalog).await?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// PUT /onboarding/sessions/{email}/values
// ---------------------------------------------------------------------------

/// Record one field value change and (re)schedule the debounced autosave.
///
/// No validation runs here; invalid values only block page transitions.
pub async fn set_value(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<SetValueRequest>,
) -> AppResult<impl IntoResponse> {
    state.flows.set_value(&email, &body.label, body.value).await?;

    let catalog = load_catalog(&state.pool).await?;
    let snapshot = state.flows.snapshot(&email, &catalog).await?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/sessions/{email}/next
// ---------------------------------------------------------------------------

/// Advance one page. Missing required fields refuse the transition and
/// leave the session unchanged.
pub async fn next_page(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let catalog = load_catalog(&state.pool).await?;
    let snapshot = state
        .flows
        .next(&email, &catalog)
        .await
        .map_err(map_flow_error)?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/sessions/{email}/previous
// ---------------------------------------------------------------------------

/// Go back one page without validation.
pub async fn previous_page(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let catalog = load_catalog(&state.pool).await?;
    let snapshot = state
        .flows
        .previous(&email, &catalog)
        .await
        .map_err(map_flow_error)?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/sessions/{email}/submit
// ---------------------------------------------------------------------------

/// Submit from the final page, marking the flow completed.
pub async fn submit(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let catalog = load_catalog(&state.pool).await?;
    let snapshot = state
        .flows
        .submit(&email, &catalog)
        .await
        .map_err(map_flow_error)?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// DELETE /onboarding/sessions/{email}
// ---------------------------------------------------------------------------

/// Unmount a session: stop autosave timers and drop the in-memory state.
/// The stored progress record is untouched.
pub async fn unmount_session(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let found = state.flows.unmount(&email).await;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "FlowSession",
            id: email,
        }));
    }
    Ok(Json(DataResponse {
        data: serde_json::json!({ "unmounted": true }),
    }))
}
