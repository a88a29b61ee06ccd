//! CSV enrollment report.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use healthtrack_core::dates::format_date;
use healthtrack_db::models::dashboard::ReportRow;
use healthtrack_db::repositories::DashboardRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const REPORT_FILENAME: &str = "enrollment_report.csv";

const HEADER: [&str; 5] = ["Client", "Phone", "Program", "Status", "Enrollment Date"];

/// Render report rows as CSV, header first.
pub fn render_csv(rows: &[ReportRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(csv_error)?;

    for row in rows {
        let date = row.enrollment_date.map(format_date).unwrap_or_default();
        writer
            .write_record([
                row.client_name.as_str(),
                row.phone_number.as_deref().unwrap_or_default(),
                row.program_name.as_str(),
                row.program_status.as_str(),
                date.as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV flush failed: {e}")))
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::InternalError(format!("CSV write failed: {err}"))
}

/// GET /api/reports/generate
pub async fn generate(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = DashboardRepo::report_rows(&state.pool).await?;
    let body = render_csv(&rows)?;
    tracing::info!(rows = rows.len(), "Enrollment report generated");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn row(name: &str, phone: Option<&str>, date: Option<NaiveDate>) -> ReportRow {
        ReportRow {
            client_id: Uuid::new_v4(),
            client_name: name.to_string(),
            phone_number: phone.map(str::to_string),
            program_name: "Maternal Health".to_string(),
            program_status: "Active".to_string(),
            enrollment_date: date,
        }
    }

    #[test]
    fn empty_report_has_only_header() {
        let csv = String::from_utf8(render_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Client,Phone,Program,Status,Enrollment Date\n");
    }

    #[test]
    fn rows_follow_header() {
        let rows = [
            row("Alice Mwangi", Some("0712345678"), NaiveDate::from_ymd_opt(2025, 4, 24)),
            row("Otieno, James", None, None),
        ];
        let csv = String::from_utf8(render_csv(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Alice Mwangi,0712345678,Maternal Health,Active,2025-04-24");
        // Names containing commas are quoted.
        assert_eq!(lines[2], "\"Otieno, James\",,Maternal Health,Active,");
    }
}
