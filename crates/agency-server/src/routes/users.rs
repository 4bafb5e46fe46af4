use axum::extract::{Path, State};
use axum::Json;

use agency_core::user::{User, UserSync};
use agency_core::AgencyError;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/users — list mirrored identity-provider profiles.
pub async fn list_users(State(app): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let store = app.store.clone();
    let users = tokio::task::spawn_blocking(move || store.list_users())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(users))
}

/// PUT /api/users/{external_id} — upsert a profile pushed by the identity
/// provider (sign-up or profile update event).
pub async fn sync_user(
    State(app): State<AppState>,
    Path(external_id): Path<String>,
    Json(body): Json<UserSync>,
) -> Result<Json<User>, AppError> {
    let store = app.store.clone();
    let user = tokio::task::spawn_blocking(move || store.upsert_user(&external_id, body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(user))
}

/// DELETE /api/users/{external_id}
pub async fn remove_user(
    State(app): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || {
        store.remove_user(&external_id)?;
        Ok::<_, AgencyError>(())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
