//! Field catalog model: typed form field definitions grouped into pages.
//!
//! Administrators author [`FieldDefinition`]s; end users only ever read
//! them. The catalog drives both rendering order and validation, so the
//! helpers here are the single source of truth for page grouping,
//! within-page ordering, and the derived terminal page number.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Reserved form-data key holding the uploaded avatar URL.
///
/// The upload service returns an opaque URL; the flow stores it under this
/// key without validating or processing the image.
pub const FORM_DATA_KEY_PROFILE_IMAGE: &str = "profileImage";

// ---------------------------------------------------------------------------
// Field type
// ---------------------------------------------------------------------------

/// The input control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Password,
    Select,
    Textarea,
    Date,
}

impl FieldType {
    /// Parse a field type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "text" => Ok(Self::Text),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "select" => Ok(Self::Select),
            "textarea" => Ok(Self::Textarea),
            "date" => Ok(Self::Date),
            _ => Err(CoreError::Validation(format!(
                "Invalid field type '{s}'. Must be one of: text, email, password, select, textarea, date"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Date => "date",
        }
    }

    /// Whether the `min`/`max` length bounds of a validation rule apply.
    ///
    /// Length bounds are only meaningful for free-text input.
    pub fn supports_length_bounds(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }
}

// ---------------------------------------------------------------------------
// Validation rule
// ---------------------------------------------------------------------------

/// Optional per-field validation rule authored alongside the field.
///
/// `pattern` applies to any field type; `min`/`max` bound the character
/// length of text/textarea values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown when `pattern` fails; falls back to a generic one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

// ---------------------------------------------------------------------------
// Field definition
// ---------------------------------------------------------------------------

/// One administrator-authored onboarding input.
///
/// The `label` doubles as the storage key for submitted values, so it must
/// be unique within its page. `page` groups fields into onboarding steps
/// and `order` fixes the render position within a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: DbId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for `select` fields; empty for every other type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub page: i32,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

// ---------------------------------------------------------------------------
// Catalog helpers
// ---------------------------------------------------------------------------

/// Sort a catalog ascending by `(page, order)`.
///
/// The sort is stable, so ties on `(page, order)` keep insertion order.
pub fn sort_catalog(catalog: &mut [FieldDefinition]) {
    catalog.sort_by_key(|f| (f.page, f.order));
}

/// Fields assigned to `page`, sorted ascending by `order`.
pub fn fields_for_page(catalog: &[FieldDefinition], page: i32) -> Vec<&FieldDefinition> {
    let mut fields: Vec<&FieldDefinition> = catalog.iter().filter(|f| f.page == page).collect();
    fields.sort_by_key(|f| f.order);
    fields
}

/// The terminal page number: the highest page in the catalog, or 1 when
/// the catalog is empty.
pub fn max_page(catalog: &[FieldDefinition]) -> i32 {
    catalog.iter().map(|f| f.page).max().unwrap_or(1).max(1)
}

/// The order a field appended to `page` receives: `count(fields) + 1`.
pub fn next_order(catalog: &[FieldDefinition], page: i32) -> i32 {
    catalog.iter().filter(|f| f.page == page).count() as i32 + 1
}

/// Validate the mandatory parts of a field definition.
///
/// `type`, `label`, and `page` must all be present (on update, after the
/// merge with the stored definition), and `page` must be positive.
pub fn validate_definition(
    field_type: Option<&str>,
    label: Option<&str>,
    page: Option<i32>,
) -> Result<(), CoreError> {
    let mut missing = Vec::new();
    if field_type.map_or(true, str::is_empty) {
        missing.push("type");
    }
    if label.map_or(true, str::is_empty) {
        missing.push("label");
    }
    if page.is_none() {
        missing.push("page");
    }
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    if let Some(p) = page {
        if p < 1 {
            return Err(CoreError::Validation(format!(
                "Page must be a positive integer, got {p}"
            )));
        }
    }
    if let Some(t) = field_type {
        FieldType::from_str_db(t)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: DbId, label: &str, page: i32, order: i32) -> FieldDefinition {
        FieldDefinition {
            id,
            field_type: FieldType::Text,
            label: label.to_string(),
            required: false,
            placeholder: None,
            options: Vec::new(),
            page,
            order,
            validation: None,
        }
    }

    // -- FieldType --

    #[test]
    fn field_type_from_str_valid() {
        assert_eq!(FieldType::from_str_db("text").unwrap(), FieldType::Text);
        assert_eq!(FieldType::from_str_db("select").unwrap(), FieldType::Select);
        assert_eq!(FieldType::from_str_db("date").unwrap(), FieldType::Date);
    }

    #[test]
    fn field_type_from_str_invalid() {
        assert!(FieldType::from_str_db("checkbox").is_err());
        assert!(FieldType::from_str_db("").is_err());
    }

    #[test]
    fn field_type_as_str_roundtrip() {
        for ty in [
            FieldType::Text,
            FieldType::Email,
            FieldType::Password,
            FieldType::Select,
            FieldType::Textarea,
            FieldType::Date,
        ] {
            assert_eq!(FieldType::from_str_db(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn length_bounds_apply_to_free_text_only() {
        assert!(FieldType::Text.supports_length_bounds());
        assert!(FieldType::Textarea.supports_length_bounds());
        assert!(!FieldType::Email.supports_length_bounds());
        assert!(!FieldType::Select.supports_length_bounds());
    }

    // -- fields_for_page --

    #[test]
    fn fields_for_page_filters_and_sorts() {
        let catalog = vec![
            field(1, "City", 3, 2),
            field(2, "Name", 2, 1),
            field(3, "Street", 3, 1),
            field(4, "Bio", 2, 2),
        ];
        let page3: Vec<&str> = fields_for_page(&catalog, 3)
            .iter()
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(page3, vec!["Street", "City"]);

        for f in fields_for_page(&catalog, 3) {
            assert_eq!(f.page, 3);
        }
    }

    #[test]
    fn fields_for_page_empty_for_unassigned_page() {
        let catalog = vec![field(1, "Name", 2, 1)];
        assert!(fields_for_page(&catalog, 1).is_empty());
        assert!(fields_for_page(&catalog, 5).is_empty());
    }

    // -- sort_catalog --

    #[test]
    fn sort_catalog_orders_by_page_then_order() {
        let mut catalog = vec![
            field(1, "C", 3, 1),
            field(2, "A", 2, 2),
            field(3, "B", 2, 1),
        ];
        sort_catalog(&mut catalog);
        let labels: Vec<&str> = catalog.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    // -- max_page --

    #[test]
    fn max_page_of_empty_catalog_is_one() {
        assert_eq!(max_page(&[]), 1);
    }

    #[test]
    fn max_page_is_highest_assigned_page() {
        let catalog = vec![field(1, "A", 2, 1), field(2, "B", 4, 1)];
        assert_eq!(max_page(&catalog), 4);
    }

    // -- next_order --

    #[test]
    fn next_order_appends_to_page() {
        let catalog = vec![field(1, "A", 2, 1), field(2, "B", 2, 2), field(3, "C", 3, 1)];
        assert_eq!(next_order(&catalog, 2), 3);
        assert_eq!(next_order(&catalog, 3), 2);
        assert_eq!(next_order(&catalog, 7), 1);
    }

    // -- validate_definition --

    #[test]
    fn definition_requires_type_label_page() {
        assert!(validate_definition(Some("text"), Some("Name"), Some(2)).is_ok());
        assert!(validate_definition(None, Some("Name"), Some(2)).is_err());
        assert!(validate_definition(Some("text"), None, Some(2)).is_err());
        assert!(validate_definition(Some("text"), Some("Name"), None).is_err());
        assert!(validate_definition(Some(""), Some(""), None).is_err());
    }

    #[test]
    fn definition_rejects_non_positive_page() {
        assert!(validate_definition(Some("text"), Some("Name"), Some(0)).is_err());
        assert!(validate_definition(Some("text"), Some("Name"), Some(-3)).is_err());
    }

    #[test]
    fn definition_rejects_unknown_type() {
        assert!(validate_definition(Some("slider"), Some("Name"), Some(2)).is_err());
    }
}
