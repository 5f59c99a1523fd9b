//! Persistence seam for onboarding progress.
//!
//! The flow manager talks to storage through [`ProgressStore`] so tests
//! can substitute an in-memory backend. The production implementation
//! delegates to [`ProgressRepo`] and translates storage failures into
//! [`CoreError::Storage`], the only error the flow layer ever sees from
//! persistence.

use async_trait::async_trait;
use serde_json::Value;

use onboard_core::error::CoreError;
use onboard_core::progress::ProgressStatus;
use onboard_db::repositories::ProgressRepo;
use onboard_db::DbPool;

/// The persisted slice of a progress record the flow manager needs.
#[derive(Debug, Clone)]
pub struct StoredProgress {
    pub current_page: i32,
    pub form_data: Value,
    pub completed: bool,
}

/// Backend-agnostic progress persistence.
#[async_trait]
pub trait ProgressStore: Send + Sync + 'static {
    /// Load the stored progress for an email, `None` if never saved.
    async fn load(&self, email: &str) -> Result<Option<StoredProgress>, CoreError>;

    /// Overwrite the stored progress for an email (upsert).
    async fn save(
        &self,
        email: &str,
        current_page: i32,
        form_data: &Value,
        completed: bool,
        status: ProgressStatus,
    ) -> Result<(), CoreError>;
}

/// [`ProgressStore`] backed by the `onboarding_progress` table.
pub struct SqlProgressStore {
    pool: DbPool,
}

impl SqlProgressStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for SqlProgressStore {
    async fn load(&self, email: &str) -> Result<Option<StoredProgress>, CoreError> {
        let record = ProgressRepo::find_by_email(&self.pool, email)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        Ok(record.map(|r| StoredProgress {
            current_page: r.current_page,
            form_data: r.form_data,
            completed: r.completed,
        }))
    }

    async fn save(
        &self,
        email: &str,
        current_page: i32,
        form_data: &Value,
        completed: bool,
        status: ProgressStatus,
    ) -> Result<(), CoreError> {
        ProgressRepo::upsert(
            &self.pool,
            email,
            current_page,
            form_data,
            completed,
            status.as_str(),
        )
        .await
        .map_err(|e| CoreError::Storage(e.to_string()))?;
        Ok(())
    }
}
