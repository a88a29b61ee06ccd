//! Repository for the `programs` table.

use healthtrack_core::pagination::PageRequest;
use healthtrack_core::types::{DbId, Timestamp};
use healthtrack_core::validation::contains_pattern;
use sqlx::PgPool;

use crate::models::program::{
    NewProgram, Program, ProgramChanges, ProgramFilter, ProgramOption, ProgramSummary,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, start_date, end_date, status, is_deleted, deleted_at";

const LIST_FILTER: &str = "($1::text IS NULL OR name ILIKE $1)
     AND ($2::text IS NULL OR status = $2)
     AND ($3::boolean IS NULL OR is_deleted = $3)";

/// Provides CRUD, search and soft-delete operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program. New programs always start live.
    pub async fn create(pool: &PgPool, input: &NewProgram) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs (name, description, start_date, end_date, status, is_deleted, deleted_at)
             VALUES ($1, $2, $3, $4, $5, FALSE, NULL)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_deref())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a program by ID. Soft-deleted programs are included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of programs plus the total number matching `filter`.
    pub async fn list_page(
        pool: &PgPool,
        filter: &ProgramFilter,
        page: PageRequest,
    ) -> Result<(Vec<Program>, i64), sqlx::Error> {
        let pattern = filter.q.as_deref().filter(|s| !s.is_empty()).map(contains_pattern);
        let status = filter.status.as_deref().filter(|s| !s.is_empty());

        let count_query = format!("SELECT COUNT(*) FROM programs WHERE {LIST_FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .bind(status)
            .bind(filter.is_deleted)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM programs WHERE {LIST_FILTER}
             ORDER BY id
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, Program>(&query)
            .bind(&pattern)
            .bind(status)
            .bind(filter.is_deleted)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Unpaginated case-insensitive name search.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<ProgramSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProgramSummary>(
            "SELECT id, name, description FROM programs WHERE name ILIKE $1 ORDER BY name",
        )
        .bind(contains_pattern(q))
        .fetch_all(pool)
        .await
    }

    /// Every program as `{ id, name }`, for enrollment pickers.
    pub async fn list_options(pool: &PgPool) -> Result<Vec<ProgramOption>, sqlx::Error> {
        sqlx::query_as::<_, ProgramOption>("SELECT id, name FROM programs ORDER BY name, id")
            .fetch_all(pool)
            .await
    }

    /// Number of programs, soft-deleted ones included.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM programs")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update a program. Only non-`None` fields in `input` are applied, and
    /// `description: Some(None)` clears the description. The lifecycle
    /// columns are never touched here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProgramChanges,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                status = COALESCE($7, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Move a live program to the soft-deleted state, stamped with `at`.
    ///
    /// Returns `None` if the program does not exist or is already deleted.
    pub async fn mark_deleted(
        pool: &PgPool,
        id: DbId,
        at: Timestamp,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET is_deleted = TRUE, deleted_at = $2, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(pool)
            .await
    }
}
