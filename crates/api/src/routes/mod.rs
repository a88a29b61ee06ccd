pub mod client;
pub mod dashboard;
pub mod enrollment;
pub mod health;
pub mod program;
pub mod report;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clients                                 list, create
/// /clients/search                          unpaginated search
/// /clients/{id}                            get, update, delete
///
/// /programs                                list, create
/// /programs/search                         search by name
/// /programs/{id}                           get, update, soft delete
///
/// /enrollments                             list
/// /enrollments/create                      create
/// /enrollments/search                      filter by client / program
/// /enrollments/eligible-clients            clients with programs left
/// /enrollments/available-programs          program picker
/// /enrollments/{id}                        get, update, delete
///
/// /dashboard                               totals and distribution
/// /reports/generate                        CSV download
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", client::router())
        .nest("/programs", program::router())
        .nest("/enrollments", enrollment::router())
        .nest("/dashboard", dashboard::router())
        .nest("/reports", report::router())
}
