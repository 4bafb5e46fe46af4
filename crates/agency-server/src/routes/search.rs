use axum::extract::{Query, State};
use axum::Json;

use agency_core::search::{search, SearchHit, DEFAULT_LIMIT};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<usize>,
}

/// GET /api/search?q=&limit= — substring search over clients, projects,
/// leads, and tasks; combined results capped at `limit` (default 10).
pub async fn dashboard_search(
    State(app): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let store = app.store.clone();
    let hits = tokio::task::spawn_blocking(move || {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        search(&store, &params.q, limit)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(hits))
}
