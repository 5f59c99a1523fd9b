//! Progress record status rules.
//!
//! A progress record tracks one user's advancement through the onboarding
//! pages: the last page they were on, the accumulated form values, and
//! whether they finished. The status string is stored alongside the
//! `completed` flag but must never contradict it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The default page for a brand-new progress record.
pub const INITIAL_PAGE: i32 = 1;

/// Status values for a progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    InProgress,
    Completed,
}

impl ProgressStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid progress status '{s}'. Must be one of: in_progress, completed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Reconcile the `completed` flag with an optionally explicit status.
///
/// The explicit status wins when supplied; otherwise the status is derived
/// from the flag. A completed status forces `completed = true` so the two
/// can never disagree.
pub fn reconcile_status(
    completed: bool,
    explicit: Option<&str>,
) -> Result<(bool, ProgressStatus), CoreError> {
    let status = match explicit {
        Some(s) => ProgressStatus::from_str_db(s)?,
        None => {
            if completed {
                ProgressStatus::Completed
            } else {
                ProgressStatus::InProgress
            }
        }
    };
    let completed = completed || status == ProgressStatus::Completed;
    Ok((completed, status))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_str_valid() {
        assert_eq!(
            ProgressStatus::from_str_db("in_progress").unwrap(),
            ProgressStatus::InProgress
        );
        assert_eq!(
            ProgressStatus::from_str_db("completed").unwrap(),
            ProgressStatus::Completed
        );
    }

    #[test]
    fn status_from_str_invalid() {
        assert!(ProgressStatus::from_str_db("abandoned").is_err());
        assert!(ProgressStatus::from_str_db("").is_err());
    }

    #[test]
    fn status_as_str_roundtrip() {
        for status in [ProgressStatus::InProgress, ProgressStatus::Completed] {
            assert_eq!(ProgressStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_derived_from_completed_flag() {
        assert_eq!(
            reconcile_status(false, None).unwrap(),
            (false, ProgressStatus::InProgress)
        );
        assert_eq!(
            reconcile_status(true, None).unwrap(),
            (true, ProgressStatus::Completed)
        );
    }

    #[test]
    fn explicit_status_wins() {
        assert_eq!(
            reconcile_status(true, Some("in_progress")).unwrap(),
            (true, ProgressStatus::InProgress)
        );
    }

    #[test]
    fn completed_status_forces_completed_flag() {
        // status = completed must imply completed = true.
        assert_eq!(
            reconcile_status(false, Some("completed")).unwrap(),
            (true, ProgressStatus::Completed)
        );
    }

    #[test]
    fn unknown_explicit_status_rejected() {
        assert!(reconcile_status(false, Some("paused")).is_err());
    }
}
