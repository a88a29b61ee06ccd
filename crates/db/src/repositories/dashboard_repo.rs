//! Aggregate queries for the dashboard and the enrollment report.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardSummary, ProgramEnrollmentCount, ReportRow};
use crate::repositories::{ClientRepo, EnrollmentRepo, ProgramRepo};

/// Read-only aggregate queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Totals for each table plus enrollment counts for every program that
    /// has at least one enrollment.
    pub async fn summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
        let total_programs = ProgramRepo::count(pool).await?;
        let total_clients = ClientRepo::count(pool).await?;
        let total_enrollments = EnrollmentRepo::count(pool).await?;

        let enrollment_data = sqlx::query_as::<_, ProgramEnrollmentCount>(
            "SELECT p.name AS program_name, COUNT(e.id) AS enrollment_count
             FROM programs p
             JOIN enrollments e ON e.program_id = p.id
             GROUP BY p.id, p.name
             ORDER BY p.name",
        )
        .fetch_all(pool)
        .await?;

        Ok(DashboardSummary {
            total_programs,
            total_clients,
            total_enrollments,
            enrollment_data,
        })
    }

    /// One row per enrollment, ordered by client then program.
    pub async fn report_rows(pool: &PgPool) -> Result<Vec<ReportRow>, sqlx::Error> {
        sqlx::query_as::<_, ReportRow>(
            "SELECT c.id AS client_id, c.full_name AS client_name, c.phone_number,
                    p.name AS program_name, p.status AS program_status, e.enrollment_date
             FROM enrollments e
             JOIN clients c ON c.id = e.client_id
             JOIN programs p ON p.id = e.program_id
             ORDER BY c.full_name, c.id, p.name",
        )
        .fetch_all(pool)
        .await
    }
}
