//! Per-user key-value preference model.

use onboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_preferences` table. One value per `(email, key)`;
/// deliberately decoupled from onboarding progress so UI preferences (dark
/// mode, etc.) survive progress deletion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreference {
    pub id: DbId,
    pub email: String,
    pub pref_key: String,
    pub pref_value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting a preference value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPreference {
    pub value: String,
}
