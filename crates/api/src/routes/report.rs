use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", get(report::generate))
}
