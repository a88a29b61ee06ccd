//! Handlers for the `/enrollments` resource.
//!
//! Every write resolves the referenced client and program first, then checks
//! the (client, program) pair for an existing enrollment. The unique
//! constraint behind [`EnrollmentRepo::create`] catches anything that races
//! past the pre-check.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use healthtrack_core::enrollment::{already_enrolled, EligibleClient, EnrollmentPair};
use healthtrack_core::error::CoreError;
use healthtrack_core::types::{parse_db_id, ClientId, DbId};
use healthtrack_db::models::enrollment::{CreateEnrollment, Enrollment, UpdateEnrollment};
use healthtrack_db::models::program::ProgramOption;
use healthtrack_db::repositories::{ClientRepo, EnrollmentRepo, ProgramRepo};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::{EnrollmentSearchParams, Filter};
use crate::state::AppState;

fn enrollment_id(raw: &str) -> Result<DbId, CoreError> {
    parse_db_id(raw).ok_or_else(|| CoreError::not_found("Enrollment", raw))
}

async fn ensure_client(pool: &PgPool, id: ClientId) -> AppResult<()> {
    match ClientRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::not_found("Client", id).into()),
    }
}

async fn ensure_program(pool: &PgPool, id: DbId) -> AppResult<()> {
    match ProgramRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::not_found("Program", id).into()),
    }
}

/// POST /api/enrollments/create
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEnrollment>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    let new = input.into_new()?;
    ensure_client(&state.pool, new.client_id).await?;
    ensure_program(&state.pool, new.program_id).await?;

    let pair = EnrollmentPair {
        client_id: new.client_id,
        program_id: new.program_id,
    };
    if EnrollmentRepo::find_by_pair(&state.pool, pair).await?.is_some() {
        return Err(already_enrolled().into());
    }

    let enrollment = EnrollmentRepo::create(&state.pool, &new)
        .await?
        .ok_or_else(already_enrolled)?;
    tracing::info!(
        enrollment_id = enrollment.id,
        client_id = %enrollment.client_id,
        program_id = enrollment.program_id,
        "Client enrolled",
    );
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/enrollments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Enrollment>>> {
    let enrollments = EnrollmentRepo::list(&state.pool).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/search?client_id=&program_id=
///
/// A filter value that cannot name a row yields an empty list.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentSearchParams>,
) -> AppResult<Json<Vec<Enrollment>>> {
    let client = params.client_filter();
    let program = params.program_filter();
    if client == Filter::Unmatchable || program == Filter::Unmatchable {
        return Ok(Json(Vec::new()));
    }
    let enrollments = EnrollmentRepo::search(&state.pool, client.exact(), program.exact()).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/eligible-clients
pub async fn eligible_clients(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EligibleClient>>> {
    let clients = EnrollmentRepo::eligible_clients(&state.pool).await?;
    tracing::debug!(count = clients.len(), "Computed eligible clients");
    Ok(Json(clients))
}

/// GET /api/enrollments/available-programs
pub async fn available_programs(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProgramOption>>> {
    let programs = ProgramRepo::list_options(&state.pool).await?;
    Ok(Json(programs))
}

/// GET /api/enrollments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id(&id)?)
        .await?
        .ok_or_else(|| CoreError::not_found("Enrollment", &id))?;
    Ok(Json(enrollment))
}

/// PUT /api/enrollments/{id}
///
/// Replaced references are re-resolved, and moving onto a pair that is
/// already enrolled is a conflict.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateEnrollment>,
) -> AppResult<Json<Enrollment>> {
    let enrollment_id = enrollment_id(&id)?;
    let changes = input.into_changes()?;

    let current = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Enrollment", &id))?;

    if let Some(client_id) = changes.client_id {
        ensure_client(&state.pool, client_id).await?;
    }
    if let Some(program_id) = changes.program_id {
        ensure_program(&state.pool, program_id).await?;
    }

    let pair = EnrollmentPair {
        client_id: current.client_id,
        program_id: current.program_id,
    }
    .with_changes(changes.client_id, changes.program_id);

    if let Some(existing) = EnrollmentRepo::find_by_pair(&state.pool, pair).await? {
        if existing.id != enrollment_id {
            return Err(already_enrolled().into());
        }
    }

    let enrollment = EnrollmentRepo::update(&state.pool, enrollment_id, pair, changes.enrollment_date)
        .await?
        .ok_or_else(|| CoreError::not_found("Enrollment", &id))?;
    Ok(Json(enrollment))
}

/// DELETE /api/enrollments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let enrollment_id = enrollment_id(&id)?;
    if EnrollmentRepo::delete(&state.pool, enrollment_id).await? {
        tracing::info!(enrollment_id, "Enrollment removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Enrollment", &id).into())
    }
}
