//! Onboarding progress entity model and DTOs.

use onboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `onboarding_progress` table. At most one row exists per
/// email; `form_data` accumulates submitted values across all pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingProgress {
    pub id: DbId,
    pub email: String,
    pub current_page: i32,
    pub form_data: serde_json::Value,
    pub completed: bool,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The progress shape returned for an email with no stored record.
///
/// Loading progress never errors: an unknown email gets this zero-value
/// record so a fresh session starts on page 1 with empty data.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultProgress {
    pub email: String,
    pub current_page: i32,
    pub form_data: serde_json::Value,
    pub completed: bool,
    pub status: &'static str,
}

impl DefaultProgress {
    pub fn for_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            current_page: onboard_core::progress::INITIAL_PAGE,
            form_data: serde_json::json!({}),
            completed: false,
            status: onboard_core::progress::ProgressStatus::InProgress.as_str(),
        }
    }
}

/// DTO for saving progress (upsert).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveProgress {
    pub email: String,
    pub current_page: Option<i32>,
    pub form_data: Option<serde_json::Value>,
    #[serde(default)]
    pub completed: bool,
    pub status: Option<String>,
}
