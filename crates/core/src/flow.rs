//! Onboarding flow state machine.
//!
//! The flow over pages `1..max_page` is an explicit machine with named
//! transitions rather than page arithmetic scattered through UI handlers.
//! Transitions are pure: they take the catalog and the accumulated form
//! data and return the new state plus the save the caller must persist.
//! User-facing messages are composed by the API layer from the structured
//! [`FlowError`] data, never here.

use serde_json::Value;

use crate::field::{max_page, FieldDefinition};
use crate::form::validate_page;

/// Where a user currently is in the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// On page `n` (1-based, clamped to the catalog's page range).
    Page(i32),
    /// Terminal: the final page was submitted.
    Submitted,
}

impl FlowState {
    /// Construct a state from a persisted page number, clamping into
    /// `1..=max_page` so a stale record never lands out of range.
    pub fn from_page(page: i32, max_page: i32) -> Self {
        Self::Page(page.clamp(1, max_page.max(1)))
    }

    /// The page number, or `None` once submitted.
    pub fn page(&self) -> Option<i32> {
        match self {
            Self::Page(n) => Some(*n),
            Self::Submitted => None,
        }
    }
}

/// Why a transition was refused. The state is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Required fields on the current page have no value.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// The flow already reached the terminal state.
    #[error("Onboarding has already been submitted")]
    AlreadySubmitted,

    /// Submit is only reachable from the final page.
    #[error("Cannot submit from page {current}; final page is {max}")]
    NotOnFinalPage { current: i32, max: i32 },
}

/// The write the caller must persist after a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persist {
    pub page: i32,
    pub completed: bool,
}

/// Advance one page.
///
/// Validates the current page first; missing required fields refuse the
/// transition. On success the new page is clamped at the terminal page and
/// progress is persisted with `completed = false`.
pub fn next(
    state: FlowState,
    catalog: &[FieldDefinition],
    form_data: &Value,
) -> Result<(FlowState, Persist), FlowError> {
    let current = state.page().ok_or(FlowError::AlreadySubmitted)?;

    let missing = validate_page(catalog, current, form_data);
    if !missing.is_empty() {
        return Err(FlowError::MissingRequired(missing));
    }

    let target = (current + 1).min(max_page(catalog));
    Ok((
        FlowState::Page(target),
        Persist {
            page: target,
            completed: false,
        },
    ))
}

/// Go back one page, floored at page 1. No validation, no persistence.
pub fn previous(state: FlowState) -> Result<FlowState, FlowError> {
    let current = state.page().ok_or(FlowError::AlreadySubmitted)?;
    Ok(FlowState::Page((current - 1).max(1)))
}

/// Submit the flow from the final page.
///
/// Validates the final page; on success the flow reaches the terminal
/// state and progress is persisted with `completed = true`.
pub fn submit(
    state: FlowState,
    catalog: &[FieldDefinition],
    form_data: &Value,
) -> Result<(FlowState, Persist), FlowError> {
    let current = state.page().ok_or(FlowError::AlreadySubmitted)?;
    let max = max_page(catalog);

    if current != max {
        return Err(FlowError::NotOnFinalPage { current, max });
    }

    let missing = validate_page(catalog, current, form_data);
    if !missing.is_empty() {
        return Err(FlowError::MissingRequired(missing));
    }

    Ok((
        FlowState::Submitted,
        Persist {
            page: max,
            completed: true,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use serde_json::json;

    fn required_field(label: &str, page: i32) -> FieldDefinition {
        FieldDefinition {
            id: 1,
            field_type: FieldType::Text,
            label: label.to_string(),
            required: true,
            placeholder: None,
            options: Vec::new(),
            page,
            order: 1,
            validation: None,
        }
    }

    fn catalog() -> Vec<FieldDefinition> {
        vec![required_field("Name", 2), required_field("City", 3)]
    }

    // -- from_page --

    #[test]
    fn from_page_clamps_into_range() {
        assert_eq!(FlowState::from_page(0, 3), FlowState::Page(1));
        assert_eq!(FlowState::from_page(2, 3), FlowState::Page(2));
        assert_eq!(FlowState::from_page(9, 3), FlowState::Page(3));
    }

    // -- next --

    #[test]
    fn next_advances_when_page_is_satisfied() {
        let (state, persist) = next(FlowState::Page(2), &catalog(), &json!({"Name": "Ann"}))
            .expect("page 2 is satisfied");
        assert_eq!(state, FlowState::Page(3));
        assert_eq!(
            persist,
            Persist {
                page: 3,
                completed: false
            }
        );
    }

    #[test]
    fn next_refuses_on_missing_required_fields() {
        let err = next(FlowState::Page(2), &catalog(), &json!({})).unwrap_err();
        assert_eq!(err, FlowError::MissingRequired(vec!["Name".to_string()]));
    }

    #[test]
    fn next_from_welcome_page_needs_no_values() {
        // Page 1 has no fields, so nothing blocks advancement.
        let (state, _) = next(FlowState::Page(1), &catalog(), &json!({})).unwrap();
        assert_eq!(state, FlowState::Page(2));
    }

    #[test]
    fn next_clamps_at_terminal_page() {
        let (state, persist) = next(FlowState::Page(3), &catalog(), &json!({"City": "Oslo"}))
            .expect("page 3 is satisfied");
        assert_eq!(state, FlowState::Page(3));
        assert_eq!(persist.page, 3);
        assert!(!persist.completed);
    }

    // -- previous --

    #[test]
    fn previous_goes_back_without_validation() {
        // Page 2's required field is unfilled; previous must not care.
        assert_eq!(previous(FlowState::Page(2)).unwrap(), FlowState::Page(1));
    }

    #[test]
    fn previous_floors_at_page_one() {
        assert_eq!(previous(FlowState::Page(1)).unwrap(), FlowState::Page(1));
    }

    // -- submit --

    #[test]
    fn submit_only_from_final_page() {
        let err = submit(FlowState::Page(2), &catalog(), &json!({"Name": "Ann"})).unwrap_err();
        assert_eq!(err, FlowError::NotOnFinalPage { current: 2, max: 3 });
    }

    #[test]
    fn submit_validates_final_page() {
        let err = submit(FlowState::Page(3), &catalog(), &json!({"Name": "Ann"})).unwrap_err();
        assert_eq!(err, FlowError::MissingRequired(vec!["City".to_string()]));
    }

    #[test]
    fn submit_reaches_terminal_state() {
        let (state, persist) = submit(
            FlowState::Page(3),
            &catalog(),
            &json!({"Name": "Ann", "City": "Oslo"}),
        )
        .expect("final page is satisfied");
        assert_eq!(state, FlowState::Submitted);
        assert_eq!(
            persist,
            Persist {
                page: 3,
                completed: true
            }
        );
    }

    // -- terminal state --

    #[test]
    fn submitted_state_refuses_every_transition() {
        let data = json!({});
        assert_eq!(
            next(FlowState::Submitted, &catalog(), &data).unwrap_err(),
            FlowError::AlreadySubmitted
        );
        assert_eq!(
            previous(FlowState::Submitted).unwrap_err(),
            FlowError::AlreadySubmitted
        );
        assert_eq!(
            submit(FlowState::Submitted, &catalog(), &data).unwrap_err(),
            FlowError::AlreadySubmitted
        );
    }

    #[test]
    fn empty_catalog_keeps_flow_on_page_one() {
        let (state, persist) = next(FlowState::Page(1), &[], &json!({})).unwrap();
        assert_eq!(state, FlowState::Page(1));
        assert_eq!(persist.page, 1);
    }
}
