//! Aggregate shapes for the dashboard and the enrollment report.

use healthtrack_core::types::{ClientId, Date};
use serde::Serialize;
use sqlx::FromRow;

/// Enrollment count for one program.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEnrollmentCount {
    pub program_name: String,
    pub enrollment_count: i64,
}

/// Totals and per-program distribution shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_programs: i64,
    pub total_clients: i64,
    pub total_enrollments: i64,
    pub enrollment_data: Vec<ProgramEnrollmentCount>,
}

/// One line of the CSV enrollment report.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub client_id: ClientId,
    pub client_name: String,
    pub phone_number: Option<String>,
    pub program_name: String,
    pub program_status: String,
    pub enrollment_date: Option<Date>,
}
