//! Handler for the dashboard aggregates.

use axum::extract::State;
use axum::Json;
use healthtrack_db::models::dashboard::DashboardSummary;
use healthtrack_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let summary = DashboardRepo::summary(&state.pool).await?;
    Ok(Json(summary))
}
