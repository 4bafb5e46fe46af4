use axum::extract::{Path, Query, State};
use axum::Json;

use agency_core::project::{NewProject, Project, ProjectPatch};
use agency_core::types::ProjectStatus;
use agency_core::AgencyError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub status: Option<ProjectStatus>,
    /// Filter to one client's projects.
    pub client: Option<String>,
}

/// GET /api/projects?status=&client= — list projects with optional filters.
pub async fn list_projects(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Project>>, AppError> {
    let store = app.store.clone();
    let projects = tokio::task::spawn_blocking(move || {
        let mut projects = match params.client {
            Some(client_id) => store.projects_by_client(&client_id)?,
            None => store.list_projects()?,
        };
        if let Some(status) = params.status {
            projects.retain(|p| p.status == status);
        }
        Ok::<_, AgencyError>(projects)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create_project(
    State(app): State<AppState>,
    Json(body): Json<NewProject>,
) -> Result<Json<Project>, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || store.create_project(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(project))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || store.get_project(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(project))
}

/// PATCH /api/projects/{id}
pub async fn update_project(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProjectPatch>,
) -> Result<Json<Project>, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || store.update_project(&id, body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || {
        store.delete_project(&id)?;
        Ok::<_, AgencyError>(())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
