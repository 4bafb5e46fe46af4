use axum::extract::{Path, Query, State};
use axum::Json;

use agency_core::task::{NewTask, Task, TaskPatch};
use agency_core::types::TaskStatus;
use agency_core::AgencyError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub status: Option<TaskStatus>,
    /// Filter to one project's tasks.
    pub project: Option<String>,
}

/// GET /api/tasks?status=&project= — list tasks with optional filters.
pub async fn list_tasks(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, AppError> {
    let store = app.store.clone();
    let tasks = tokio::task::spawn_blocking(move || {
        let mut tasks = match params.project {
            Some(project_id) => store.tasks_by_project(&project_id)?,
            None => store.list_tasks()?,
        };
        if let Some(status) = params.status {
            tasks.retain(|t| t.status == status);
        }
        Ok::<_, AgencyError>(tasks)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create_task(
    State(app): State<AppState>,
    Json(body): Json<NewTask>,
) -> Result<Json<Task>, AppError> {
    let store = app.store.clone();
    let task = tokio::task::spawn_blocking(move || store.create_task(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(task))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let store = app.store.clone();
    let task = tokio::task::spawn_blocking(move || store.get_task(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(task))
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TaskPatch>,
) -> Result<Json<Task>, AppError> {
    let store = app.store.clone();
    let task = tokio::task::spawn_blocking(move || store.update_task(&id, body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || {
        store.delete_task(&id)?;
        Ok::<_, AgencyError>(())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
