use axum::extract::{Path, State};
use axum::Json;

use agency_core::client::Client;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/client-portal/{client_id} — public client-portal lookup.
/// Returns the client record as JSON; 404 when the id does not resolve.
pub async fn client_portal(
    State(app): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Client>, AppError> {
    let store = app.store.clone();
    let client = tokio::task::spawn_blocking(move || store.get_client(&client_id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(client))
}
