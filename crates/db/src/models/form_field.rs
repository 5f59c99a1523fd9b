//! Form field entity model and DTOs.

use onboard_core::error::CoreError;
use onboard_core::field::{FieldDefinition, FieldType, ValidationRule};
use onboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `form_fields` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormField {
    pub id: DbId,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Json<Vec<String>>,
    pub page: i32,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub validation: Option<Json<ValidationRule>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FormField {
    /// Convert the row into the core catalog type, parsing the stored
    /// type string. Fails only if the row holds an unknown field type.
    pub fn to_definition(&self) -> Result<FieldDefinition, CoreError> {
        Ok(FieldDefinition {
            id: self.id,
            field_type: FieldType::from_str_db(&self.field_type)?,
            label: self.label.clone(),
            required: self.required,
            placeholder: self.placeholder.clone(),
            options: self.options.0.clone(),
            page: self.page,
            order: self.sort_order,
            validation: self.validation.as_ref().map(|v| v.0.clone()),
        })
    }
}

/// DTO for creating a form field. `type`, `label`, and `page` are
/// validated by the handler before the insert; `order` is always computed
/// server-side as append-to-page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormField {
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub page: Option<i32>,
    pub validation: Option<ValidationRule>,
}

/// DTO for updating a form field. All fields optional; the handler merges
/// onto the stored definition and re-validates the result.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFormField {
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub page: Option<i32>,
    pub validation: Option<ValidationRule>,
}

/// DTO for moving a field to another page.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveFormField {
    pub page: i32,
}

/// Validated write model handed to the repository for insert/update.
#[derive(Debug, Clone)]
pub struct FormFieldWrite {
    pub field_type: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
    pub page: i32,
    pub validation: Option<ValidationRule>,
}
