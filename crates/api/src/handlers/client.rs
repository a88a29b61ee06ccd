//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use healthtrack_core::error::CoreError;
use healthtrack_core::pagination::PageMeta;
use healthtrack_core::types::{parse_client_id, ClientId};
use healthtrack_db::models::client::{Client, CreateClient, UpdateClient};
use healthtrack_db::repositories::{ClientDeletion, ClientRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::{ClientListParams, SearchParams};
use crate::state::AppState;

/// One page of clients.
#[derive(Debug, Serialize)]
pub struct ClientPage {
    pub clients: Vec<Client>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// Path ids that are not UUIDs cannot exist, so they are reported as 404.
fn client_id(raw: &str) -> Result<ClientId, CoreError> {
    parse_client_id(raw).ok_or_else(|| CoreError::not_found("Client", raw))
}

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let new = input.into_new()?;
    let client = ClientRepo::create(&state.pool, &new).await?;
    tracing::info!(client_id = %client.id, "Client registered");
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/clients?q=&page=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ClientListParams>,
) -> AppResult<Json<ClientPage>> {
    let page = params.page.page_request();
    let (clients, total) = ClientRepo::list_page(&state.pool, params.q.as_deref(), page).await?;
    Ok(Json(ClientPage {
        clients,
        meta: PageMeta::new(total, page),
    }))
}

/// GET /api/clients/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::search(&state.pool, &params.q).await?;
    Ok(Json(clients))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Client>> {
    let client_id = client_id(&id)?;
    let client = ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", &id))?;
    Ok(Json(client))
}

/// PUT /api/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateClient>,
) -> AppResult<Json<Client>> {
    let client_id = client_id(&id)?;
    let changes = input.into_changes()?;
    let client = ClientRepo::update(&state.pool, client_id, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", &id))?;
    Ok(Json(client))
}

/// DELETE /api/clients/{id}
///
/// Refused with 409 while the client still has enrollments.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let client_id = client_id(&id)?;
    match ClientRepo::delete(&state.pool, client_id).await? {
        ClientDeletion::Deleted => {
            tracing::info!(%client_id, "Client deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        ClientDeletion::NotFound => Err(CoreError::not_found("Client", &id).into()),
        ClientDeletion::HasEnrollments(count) => Err(CoreError::Conflict(format!(
            "Client has {count} enrollment(s); remove them before deleting the client."
        ))
        .into()),
    }
}
