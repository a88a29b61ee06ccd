//! Handlers for the `/programs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use healthtrack_core::error::CoreError;
use healthtrack_core::pagination::PageMeta;
use healthtrack_core::program_lifecycle::SoftDelete;
use healthtrack_core::types::{parse_db_id, DbId};
use healthtrack_db::models::program::{CreateProgram, Program, ProgramSummary, UpdateProgram};
use healthtrack_db::repositories::ProgramRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::{ProgramListParams, SearchParams};
use crate::state::AppState;

/// One page of programs.
#[derive(Debug, Serialize)]
pub struct ProgramPage {
    pub programs: Vec<Program>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

fn program_id(raw: &str) -> Result<DbId, CoreError> {
    parse_db_id(raw).ok_or_else(|| CoreError::not_found("Program", raw))
}

/// POST /api/programs
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProgram>,
) -> AppResult<(StatusCode, Json<Program>)> {
    let new = input.into_new()?;
    let program = ProgramRepo::create(&state.pool, &new).await?;
    tracing::info!(program_id = program.id, name = %program.name, "Program created");
    Ok((StatusCode::CREATED, Json(program)))
}

/// GET /api/programs?q=&status=&is_deleted=&page=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProgramListParams>,
) -> AppResult<Json<ProgramPage>> {
    let page = params.page.page_request();
    let (programs, total) = ProgramRepo::list_page(&state.pool, &params.filter(), page).await?;
    Ok(Json(ProgramPage {
        programs,
        meta: PageMeta::new(total, page),
    }))
}

/// GET /api/programs/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ProgramSummary>>> {
    let programs = ProgramRepo::search(&state.pool, &params.q).await?;
    Ok(Json(programs))
}

/// GET /api/programs/{id}
///
/// Soft-deleted programs are still returned.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Program>> {
    let program = ProgramRepo::find_by_id(&state.pool, program_id(&id)?)
        .await?
        .ok_or_else(|| CoreError::not_found("Program", &id))?;
    Ok(Json(program))
}

/// PUT /api/programs/{id}
///
/// `is_deleted` and `deleted_at` are rejected by the payload type before
/// anything is written.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateProgram>,
) -> AppResult<Json<Program>> {
    let program_id = program_id(&id)?;
    let changes = input.into_changes()?;
    let program = ProgramRepo::update(&state.pool, program_id, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("Program", &id))?;
    Ok(Json(program))
}

/// DELETE /api/programs/{id}
///
/// Soft delete. Deleting an already deleted program keeps its original
/// `deleted_at` and returns it unchanged.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Program>> {
    let program_id = program_id(&id)?;
    let program = ProgramRepo::find_by_id(&state.pool, program_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Program", &id))?;

    match program.state().soft_delete(Utc::now()) {
        SoftDelete::Apply { at } => {
            // `None` means a concurrent request deleted it first; report
            // the stored state.
            let deleted = match ProgramRepo::mark_deleted(&state.pool, program_id, at).await? {
                Some(deleted) => deleted,
                None => ProgramRepo::find_by_id(&state.pool, program_id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Program", &id))?,
            };
            tracing::info!(program_id, "Program soft-deleted");
            Ok(Json(deleted))
        }
        SoftDelete::AlreadyDeleted { .. } => Ok(Json(program)),
    }
}
