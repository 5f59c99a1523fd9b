//! Repository for the `onboarding_progress` table.
//!
//! One record per email, maintained with upsert semantics: autosaves and
//! page transitions overwrite `form_data` wholesale (last write wins, no
//! field-level merge).

use sqlx::PgPool;

use crate::models::progress::OnboardingProgress;

/// Column list for `onboarding_progress` queries.
const COLUMNS: &str =
    "id, email, current_page, form_data, completed, status, created_at, updated_at";

/// Provides data access for per-user onboarding progress.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Find the progress record for an email.
    ///
    /// Returns `None` for an email that has never saved; callers fall back
    /// to the zero-value default record.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<OnboardingProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_progress WHERE email = $1");
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite the progress record for an email.
    ///
    /// Creates the record on first save; afterwards every save replaces
    /// `current_page`, `form_data`, `completed`, and `status`, and
    /// refreshes `updated_at`.
    pub async fn upsert(
        pool: &PgPool,
        email: &str,
        current_page: i32,
        form_data: &serde_json::Value,
        completed: bool,
        status: &str,
    ) -> Result<OnboardingProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_progress \
                 (email, current_page, form_data, completed, status) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (email) DO UPDATE SET \
                 current_page = $2, form_data = $3, completed = $4, \
                 status = $5, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .bind(email)
            .bind(current_page)
            .bind(form_data)
            .bind(completed)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// List every progress record, most recently updated first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<OnboardingProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_progress ORDER BY updated_at DESC");
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete one record by email. Returns whether a row was removed.
    pub async fn delete_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM onboarding_progress WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every progress record. Returns the number removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM onboarding_progress")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
