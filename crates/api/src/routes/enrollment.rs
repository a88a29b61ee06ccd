//! Route definitions for the `/enrollments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::enrollment;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// Static segments are matched before `/{id}`.
///
/// ```text
/// GET    /                       -> list
/// POST   /create                 -> create
/// GET    /search                 -> search
/// GET    /eligible-clients       -> eligible_clients
/// GET    /available-programs     -> available_programs
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(enrollment::list))
        .route("/create", post(enrollment::create))
        .route("/search", get(enrollment::search))
        .route("/eligible-clients", get(enrollment::eligible_clients))
        .route("/available-programs", get(enrollment::available_programs))
        .route(
            "/{id}",
            get(enrollment::get_by_id)
                .put(enrollment::update)
                .delete(enrollment::delete),
        )
}
