//! Repository for the `form_fields` table.

use sqlx::types::Json;
use sqlx::PgPool;

use onboard_core::types::DbId;

use crate::models::form_field::{FormField, FormFieldWrite};

/// Column list for `form_fields` queries.
const COLUMNS: &str = "id, field_type, label, required, placeholder, options, \
     page, sort_order, validation, created_at, updated_at";

/// Provides CRUD operations for the field catalog.
pub struct FormFieldRepo;

impl FormFieldRepo {
    /// List the whole catalog, ordered by `(page, sort_order)`.
    ///
    /// Ties on `(page, sort_order)` fall back to `id`, i.e. insertion
    /// order, so rendering stays deterministic after deletes leave gaps.
    pub async fn list(pool: &PgPool) -> Result<Vec<FormField>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_fields ORDER BY page ASC, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, FormField>(&query).fetch_all(pool).await
    }

    /// Find a field by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FormField>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_fields WHERE id = $1");
        sqlx::query_as::<_, FormField>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new field, appending it to its page.
    ///
    /// `sort_order` is computed inside the statement as
    /// `count(fields on page) + 1` so callers cannot bypass the invariant.
    pub async fn create(pool: &PgPool, field: &FormFieldWrite) -> Result<FormField, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_fields \
                 (field_type, label, required, placeholder, options, page, sort_order, validation) \
             VALUES ($1, $2, $3, $4, $5, $6, \
                 (SELECT COUNT(*) + 1 FROM form_fields WHERE page = $6), $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormField>(&query)
            .bind(&field.field_type)
            .bind(&field.label)
            .bind(field.required)
            .bind(&field.placeholder)
            .bind(Json(&field.options))
            .bind(field.page)
            .bind(field.validation.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Replace a field's definition columns. `sort_order` is left alone;
    /// use [`Self::move_to_page`] to change page assignment.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        field: &FormFieldWrite,
    ) -> Result<Option<FormField>, sqlx::Error> {
        let query = format!(
            "UPDATE form_fields SET \
                 field_type = $2, label = $3, required = $4, placeholder = $5, \
                 options = $6, page = $7, validation = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormField>(&query)
            .bind(id)
            .bind(&field.field_type)
            .bind(&field.label)
            .bind(field.required)
            .bind(&field.placeholder)
            .bind(Json(&field.options))
            .bind(field.page)
            .bind(field.validation.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a field. Returns whether a row was removed. Siblings keep
    /// their order values; gaps are tolerated.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM form_fields WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a field to another page, appending it after that page's
    /// existing fields (`sort_order = count + 1`).
    pub async fn move_to_page(
        pool: &PgPool,
        id: DbId,
        target_page: i32,
    ) -> Result<Option<FormField>, sqlx::Error> {
        let query = format!(
            "UPDATE form_fields SET \
                 page = $2, \
                 sort_order = (SELECT COUNT(*) + 1 FROM form_fields WHERE page = $2), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormField>(&query)
            .bind(id)
            .bind(target_page)
            .fetch_optional(pool)
            .await
    }
}
