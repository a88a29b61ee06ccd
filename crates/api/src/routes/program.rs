//! Route definitions for the `/programs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::program;
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /search    -> search
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(program::list).post(program::create))
        .route("/search", get(program::search))
        .route(
            "/{id}",
            get(program::get_by_id)
                .put(program::update)
                .delete(program::delete),
        )
}
