//! Repository for the `enrollments` table, including the eligibility view.

use healthtrack_core::enrollment::{
    eligible_clients, group_enrollment_rows, EligibleClient, EnrollmentPair,
    UNIQUE_PAIR_CONSTRAINT,
};
use healthtrack_core::types::{ClientId, Date, DbId};
use sqlx::PgPool;

use crate::models::enrollment::{Enrollment, NewEnrollment};
use crate::repositories::ProgramRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, program_id, enrollment_date";

/// Provides CRUD, search and eligibility queries for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert an enrollment, defaulting its date to today.
    ///
    /// Returns `None` when the (client, program) pair is already enrolled;
    /// the unique constraint makes this race-free.
    pub async fn create(
        pool: &PgPool,
        input: &NewEnrollment,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (client_id, program_id, enrollment_date)
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
             ON CONFLICT ON CONSTRAINT {UNIQUE_PAIR_CONSTRAINT} DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.client_id)
            .bind(input.program_id)
            .bind(input.enrollment_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the enrollment for a (client, program) pair, if any.
    pub async fn find_by_pair(
        pool: &PgPool,
        pair: EnrollmentPair,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM enrollments WHERE client_id = $1 AND program_id = $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(pair.client_id)
            .bind(pair.program_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments ORDER BY id");
        sqlx::query_as::<_, Enrollment>(&query).fetch_all(pool).await
    }

    /// Enrollments matching the optional client and program filters.
    pub async fn search(
        pool: &PgPool,
        client_id: Option<ClientId>,
        program_id: Option<DbId>,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE ($1::uuid IS NULL OR client_id = $1)
               AND ($2::bigint IS NULL OR program_id = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(client_id)
            .bind(program_id)
            .fetch_all(pool)
            .await
    }

    /// Point an enrollment at `pair`, optionally replacing its date.
    /// `Some(None)` clears the date.
    ///
    /// Returns `None` if no row with the given `id` exists. Moving onto a
    /// pair that is already enrolled fails with a unique violation on
    /// `uq_enrollments_client_program`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        pair: EnrollmentPair,
        enrollment_date: Option<Option<Date>>,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET
                client_id = $2,
                program_id = $3,
                enrollment_date = CASE WHEN $4 THEN $5 ELSE enrollment_date END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(pair.client_id)
            .bind(pair.program_id)
            .bind(enrollment_date.is_some())
            .bind(enrollment_date.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an enrollment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM enrollments")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Clients not yet enrolled in every program, ordered by name.
    ///
    /// Recomputed on each call from one LEFT JOIN over clients and
    /// enrollments; the filtering itself is the pure rule in
    /// `healthtrack_core::enrollment`.
    pub async fn eligible_clients(pool: &PgPool) -> Result<Vec<EligibleClient>, sqlx::Error> {
        let total_programs = ProgramRepo::count(pool).await?;

        let rows: Vec<(ClientId, String, Option<DbId>)> = sqlx::query_as(
            "SELECT c.id, c.full_name, e.program_id
             FROM clients c
             LEFT JOIN enrollments e ON e.client_id = c.id
             ORDER BY c.full_name, c.id, e.program_id",
        )
        .fetch_all(pool)
        .await?;

        let total = usize::try_from(total_programs).unwrap_or(0);
        Ok(eligible_clients(group_enrollment_rows(rows), total))
    }
}
