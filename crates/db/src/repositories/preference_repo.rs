//! Repository for the `user_preferences` table.

use sqlx::PgPool;

use crate::models::preference::UserPreference;

/// Column list for `user_preferences` queries.
const COLUMNS: &str = "id, email, pref_key, pref_value, created_at, updated_at";

/// Provides data access for per-user UI preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Get one preference value for a user.
    ///
    /// Returns `None` if the user has never set this key.
    pub async fn get(
        pool: &PgPool,
        email: &str,
        key: &str,
    ) -> Result<Option<UserPreference>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM user_preferences WHERE email = $1 AND pref_key = $2");
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(email)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a preference value.
    pub async fn upsert(
        pool: &PgPool,
        email: &str,
        key: &str,
        value: &str,
    ) -> Result<UserPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences (email, pref_key, pref_value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (email, pref_key) DO UPDATE SET \
                 pref_value = $3, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(email)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
