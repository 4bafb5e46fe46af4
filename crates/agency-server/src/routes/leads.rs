use axum::extract::{Path, Query, State};
use axum::Json;

use agency_core::lead::{Lead, LeadPatch, NewLead};
use agency_core::types::LeadStatus;
use agency_core::AgencyError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub status: Option<LeadStatus>,
}

/// GET /api/leads?status= — list leads, optionally filtered by pipeline stage.
pub async fn list_leads(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let store = app.store.clone();
    let leads = tokio::task::spawn_blocking(move || match params.status {
        Some(status) => store.leads_by_status(status),
        None => store.list_leads(),
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(leads))
}

/// POST /api/leads
pub async fn create_lead(
    State(app): State<AppState>,
    Json(body): Json<NewLead>,
) -> Result<Json<Lead>, AppError> {
    let store = app.store.clone();
    let lead = tokio::task::spawn_blocking(move || store.create_lead(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(lead))
}

/// GET /api/leads/{id}
pub async fn get_lead(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, AppError> {
    let store = app.store.clone();
    let lead = tokio::task::spawn_blocking(move || store.get_lead(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(lead))
}

/// PATCH /api/leads/{id}
pub async fn update_lead(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<LeadPatch>,
) -> Result<Json<Lead>, AppError> {
    let store = app.store.clone();
    let lead = tokio::task::spawn_blocking(move || store.update_lead(&id, body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(lead))
}

/// DELETE /api/leads/{id}
pub async fn delete_lead(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || {
        store.delete_lead(&id)?;
        Ok::<_, AgencyError>(())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/leads/{id}/convert — convert a lead into an active client.
pub async fn convert_lead(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let client = tokio::task::spawn_blocking(move || store.convert_lead(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "client_id": client.id })))
}
