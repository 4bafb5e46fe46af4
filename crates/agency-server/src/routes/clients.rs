use axum::extract::{Path, Query, State};
use axum::Json;

use agency_core::client::{Client, ClientPatch, NewClient};
use agency_core::types::ClientStatus;
use agency_core::AgencyError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub status: Option<ClientStatus>,
}

/// GET /api/clients?status= — list clients, optionally filtered by status.
pub async fn list_clients(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Client>>, AppError> {
    let store = app.store.clone();
    let clients = tokio::task::spawn_blocking(move || match params.status {
        Some(status) => store.clients_by_status(status),
        None => store.list_clients(),
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(clients))
}

/// POST /api/clients — create a client.
pub async fn create_client(
    State(app): State<AppState>,
    Json(body): Json<NewClient>,
) -> Result<Json<Client>, AppError> {
    let store = app.store.clone();
    let client = tokio::task::spawn_blocking(move || store.create_client(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(client))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>, AppError> {
    let store = app.store.clone();
    let client = tokio::task::spawn_blocking(move || store.get_client(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(client))
}

/// PATCH /api/clients/{id} — partial update; an empty body is rejected.
pub async fn update_client(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ClientPatch>,
) -> Result<Json<Client>, AppError> {
    let store = app.store.clone();
    let client = tokio::task::spawn_blocking(move || store.update_client(&id, body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(client))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || {
        store.delete_client(&id)?;
        Ok::<_, AgencyError>(())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
