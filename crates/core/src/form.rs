//! Per-field and per-page validation against the field catalog.
//!
//! The renderer/validator never touches storage: it takes the catalog and
//! the accumulated form data and reports what is wrong, as inline message
//! strings the UI can place next to the offending field.

use serde_json::Value;

use crate::field::{fields_for_page, FieldDefinition};

/// Validate a single submitted value against its field definition.
///
/// Checks run in order and short-circuit: required first, then the regex
/// pattern, then length bounds (text/textarea only). Returns `None` when
/// the value is acceptable. An empty value on an optional field is always
/// acceptable; pattern and length checks only apply once a value exists.
pub fn validate_value(field: &FieldDefinition, value: Option<&str>) -> Option<String> {
    let value = value.unwrap_or("");

    if value.is_empty() {
        if field.required {
            return Some(format!("{} is required", field.label));
        }
        return None;
    }

    let Some(rule) = &field.validation else {
        return None;
    };

    if let Some(pattern) = &rule.pattern {
        let matched = regex::Regex::new(pattern)
            .map(|re| re.is_match(value))
            .unwrap_or(false);
        if !matched {
            return Some(
                rule.message
                    .clone()
                    .unwrap_or_else(|| "Invalid format".to_string()),
            );
        }
    }

    if field.field_type.supports_length_bounds() {
        let len = value.chars().count();
        if let Some(min) = rule.min {
            if len < min {
                return Some(format!("Minimum {min} characters required"));
            }
        }
        if let Some(max) = rule.max {
            if len > max {
                return Some(format!("Maximum {max} characters allowed"));
            }
        }
    }

    None
}

/// Labels of required fields on `page` that have no non-empty value.
///
/// An empty result permits page advancement. Non-string JSON values count
/// as present unless they are `null`.
pub fn validate_page(catalog: &[FieldDefinition], page: i32, form_data: &Value) -> Vec<String> {
    fields_for_page(catalog, page)
        .into_iter()
        .filter(|f| f.required && !value_present(form_data, &f.label))
        .map(|f| f.label.clone())
        .collect()
}

/// Whether page 1 should render as the static welcome screen.
///
/// Page 1 is reserved for a welcome screen when no fields are assigned to
/// it; no validation applies there.
pub fn is_welcome_page(catalog: &[FieldDefinition], page: i32) -> bool {
    page == 1 && fields_for_page(catalog, 1).is_empty()
}

/// Whether `form_data` holds a usable value under `label`.
fn value_present(form_data: &Value, label: &str) -> bool {
    match form_data.get(label) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldType, ValidationRule};
    use serde_json::json;

    fn text_field(label: &str, required: bool, page: i32, order: i32) -> FieldDefinition {
        FieldDefinition {
            id: 1,
            field_type: FieldType::Text,
            label: label.to_string(),
            required,
            placeholder: None,
            options: Vec::new(),
            page,
            order,
            validation: None,
        }
    }

    fn with_rule(mut field: FieldDefinition, rule: ValidationRule) -> FieldDefinition {
        field.validation = Some(rule);
        field
    }

    // -- validate_value --

    #[test]
    fn required_field_rejects_empty_value() {
        let field = text_field("Name", true, 2, 1);
        assert_eq!(
            validate_value(&field, None),
            Some("Name is required".to_string())
        );
        assert_eq!(
            validate_value(&field, Some("")),
            Some("Name is required".to_string())
        );
    }

    #[test]
    fn optional_field_accepts_empty_value() {
        let field = text_field("Bio", false, 2, 1);
        assert_eq!(validate_value(&field, None), None);
        assert_eq!(validate_value(&field, Some("")), None);
    }

    #[test]
    fn required_check_short_circuits_pattern() {
        let field = with_rule(
            text_field("Zip", true, 2, 1),
            ValidationRule {
                pattern: Some(r"^\d{5}$".to_string()),
                message: Some("Five digits".to_string()),
                ..Default::default()
            },
        );
        // Empty value reports the required message, not the pattern one.
        assert_eq!(
            validate_value(&field, Some("")),
            Some("Zip is required".to_string())
        );
    }

    #[test]
    fn pattern_mismatch_uses_custom_message() {
        let field = with_rule(
            text_field("Zip", false, 2, 1),
            ValidationRule {
                pattern: Some(r"^\d{5}$".to_string()),
                message: Some("Five digits".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            validate_value(&field, Some("abc")),
            Some("Five digits".to_string())
        );
        assert_eq!(validate_value(&field, Some("12345")), None);
    }

    #[test]
    fn pattern_mismatch_falls_back_to_generic_message() {
        let field = with_rule(
            text_field("Zip", false, 2, 1),
            ValidationRule {
                pattern: Some(r"^\d+$".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            validate_value(&field, Some("abc")),
            Some("Invalid format".to_string())
        );
    }

    #[test]
    fn unparseable_pattern_is_a_validation_error() {
        let field = with_rule(
            text_field("Code", false, 2, 1),
            ValidationRule {
                pattern: Some("(unclosed".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            validate_value(&field, Some("anything")),
            Some("Invalid format".to_string())
        );
    }

    #[test]
    fn min_length_violation_message() {
        let field = with_rule(
            text_field("About", false, 2, 1),
            ValidationRule {
                min: Some(5),
                ..Default::default()
            },
        );
        assert_eq!(
            validate_value(&field, Some("ab")),
            Some("Minimum 5 characters required".to_string())
        );
        assert_eq!(validate_value(&field, Some("abcde")), None);
    }

    #[test]
    fn max_length_violation_message() {
        let field = with_rule(
            text_field("About", false, 2, 1),
            ValidationRule {
                max: Some(3),
                ..Default::default()
            },
        );
        assert_eq!(
            validate_value(&field, Some("abcd")),
            Some("Maximum 3 characters allowed".to_string())
        );
        assert_eq!(validate_value(&field, Some("abc")), None);
    }

    #[test]
    fn length_bounds_ignored_for_non_text_types() {
        let mut field = with_rule(
            text_field("Email", false, 2, 1),
            ValidationRule {
                min: Some(10),
                ..Default::default()
            },
        );
        field.field_type = FieldType::Email;
        assert_eq!(validate_value(&field, Some("a@b.c")), None);
    }

    // -- validate_page --

    #[test]
    fn missing_required_labels_reported() {
        let catalog = vec![text_field("Name", true, 2, 1)];
        assert_eq!(validate_page(&catalog, 2, &json!({})), vec!["Name"]);
        assert!(validate_page(&catalog, 2, &json!({"Name": "Ann"})).is_empty());
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let catalog = vec![text_field("Name", true, 2, 1)];
        assert_eq!(
            validate_page(&catalog, 2, &json!({"Name": ""})),
            vec!["Name"]
        );
        assert_eq!(
            validate_page(&catalog, 2, &json!({"Name": null})),
            vec!["Name"]
        );
    }

    #[test]
    fn optional_fields_never_block_a_page() {
        let catalog = vec![text_field("Bio", false, 2, 1), text_field("Name", true, 2, 2)];
        assert_eq!(
            validate_page(&catalog, 2, &json!({"Name": "Ann"})),
            Vec::<String>::new()
        );
    }

    #[test]
    fn other_pages_do_not_leak_into_validation() {
        let catalog = vec![text_field("Name", true, 2, 1), text_field("City", true, 3, 1)];
        assert_eq!(validate_page(&catalog, 2, &json!({})), vec!["Name"]);
    }

    // -- is_welcome_page --

    #[test]
    fn page_one_without_fields_is_welcome_screen() {
        let catalog = vec![text_field("Name", true, 2, 1)];
        assert!(is_welcome_page(&catalog, 1));
    }

    #[test]
    fn page_one_with_fields_is_a_form_page() {
        let catalog = vec![text_field("Name", true, 1, 1)];
        assert!(!is_welcome_page(&catalog, 1));
    }

    #[test]
    fn later_pages_are_never_welcome_screens() {
        assert!(!is_welcome_page(&[], 2));
    }
}
