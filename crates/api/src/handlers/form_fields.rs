//! Handlers for the `/form-fields` resource.
//!
//! The field catalog is authored by administrators and read by every
//! onboarding session. `order` is always computed server-side as
//! append-to-page; deletes leave gaps (siblings are never renumbered).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use onboard_core::error::CoreError;
use onboard_core::field::{self, ValidationRule};
use onboard_core::types::DbId;
use onboard_db::models::form_field::{
    CreateFormField, FormField, FormFieldWrite, MoveFormField, UpdateFormField,
};
use onboard_db::repositories::FormFieldRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a form field exists, returning the full row.
async fn ensure_field_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<FormField> {
    FormFieldRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "FormField",
            id: id.to_string(),
        })
    })
}

/// Validate and assemble the write model shared by create and update.
fn build_write(
    field_type: Option<String>,
    label: Option<String>,
    required: bool,
    placeholder: Option<String>,
    options: Vec<String>,
    page: Option<i32>,
    validation: Option<ValidationRule>,
) -> AppResult<FormFieldWrite> {
    field::validate_definition(field_type.as_deref(), label.as_deref(), page)?;
    let (Some(field_type), Some(label), Some(page)) = (field_type, label, page) else {
        return Err(AppError::InternalError(
            "field definition parts missing after validation".to_string(),
        ));
    };
    Ok(FormFieldWrite {
        field_type,
        label,
        required,
        placeholder,
        options,
        page,
        validation,
    })
}

// ---------------------------------------------------------------------------
// GET /form-fields
// ---------------------------------------------------------------------------

/// List the whole catalog, ordered by `(page, order)`.
pub async fn list_fields(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = FormFieldRepo::list(&state.pool).await?;
    tracing::debug!(count = items.len(), "Listed form fields");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /form-fields
// ---------------------------------------------------------------------------

/// Create a field, appending it to its page.
///
/// Rejects with 400 when `type`, `label`, or `page` is missing.
pub async fn create_field(
    State(state): State<AppState>,
    Json(body): Json<CreateFormField>,
) -> AppResult<impl IntoResponse> {
    let write = build_write(
        body.field_type,
        body.label,
        body.required,
        body.placeholder,
        body.options,
        body.page,
        body.validation,
    )?;

    let created = FormFieldRepo::create(&state.pool, &write).await?;

    tracing::info!(
        field_id = created.id,
        label = %created.label,
        page = created.page,
        order = created.sort_order,
        "Form field created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /form-fields/{id}
// ---------------------------------------------------------------------------

/// Update a field. The partial body is merged onto the stored definition
/// and the result must still carry `type`, `label`, and `page`.
pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateFormField>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_field_exists(&state.pool, id).await?;

    let write = build_write(
        body.field_type.or(Some(existing.field_type)),
        body.label.or(Some(existing.label)),
        body.required.unwrap_or(existing.required),
        body.placeholder.or(existing.placeholder),
        body.options.unwrap_or_else(|| existing.options.0.clone()),
        body.page.or(Some(existing.page)),
        body.validation
            .or_else(|| existing.validation.as_ref().map(|v| v.0.clone())),
    )?;

    let updated = FormFieldRepo::update(&state.pool, id, &write)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "FormField",
                id: id.to_string(),
            })
        })?;

    tracing::info!(field_id = id, label = %updated.label, "Form field updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /form-fields/{id}
// ---------------------------------------------------------------------------

/// Delete a field. Remaining fields keep their order values.
pub async fn delete_field(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = FormFieldRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "FormField",
            id: id.to_string(),
        }));
    }

    tracing::info!(field_id = id, "Form field deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": true }),
    }))
}

// ---------------------------------------------------------------------------
// POST /form-fields/{id}/move
// ---------------------------------------------------------------------------

/// Move a field to another page, placing it last among that page's fields.
pub async fn move_field(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<MoveFormField>,
) -> AppResult<impl IntoResponse> {
    if body.page < 1 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Page must be a positive integer, got {}",
            body.page
        ))));
    }

    ensure_field_exists(&state.pool, id).await?;

    let moved = FormFieldRepo::move_to_page(&state.pool, id, body.page)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "FormField",
                id: id.to_string(),
            })
        })?;

    tracing::info!(
        field_id = id,
        page = moved.page,
        order = moved.sort_order,
        "Form field moved"
    );

    Ok(Json(DataResponse { data: moved }))
}
