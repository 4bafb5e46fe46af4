use axum::extract::{Query, State};
use axum::Json;

use agency_core::analytics::{AnalyticsEntry, NewAnalyticsEntry, NewRevenue};
use agency_core::metrics::{LeadMetrics, ProjectMetrics, RevenueMetrics};
use agency_core::types::AnalyticsType;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    /// One of the four event types; anything else falls back to all rows.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/analytics?type= — analytics rows, filtered when the type param
/// is one of the known literals. An unknown type is not an error.
pub async fn list_analytics(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<AnalyticsEntry>>, AppError> {
    let store = app.store.clone();
    let entries = tokio::task::spawn_blocking(move || {
        match params.kind.as_deref().map(str::parse::<AnalyticsType>) {
            Some(Ok(kind)) => store.analytics_by_type(kind),
            _ => store.list_analytics(),
        }
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(entries))
}

/// POST /api/analytics — record a business event.
pub async fn record_analytics(
    State(app): State<AppState>,
    Json(body): Json<NewAnalyticsEntry>,
) -> Result<Json<AnalyticsEntry>, AppError> {
    let store = app.store.clone();
    let entry = tokio::task::spawn_blocking(move || store.record_analytics(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(entry))
}

/// POST /api/analytics/revenue — record a revenue event.
pub async fn record_revenue(
    State(app): State<AppState>,
    Json(body): Json<NewRevenue>,
) -> Result<Json<AnalyticsEntry>, AppError> {
    let store = app.store.clone();
    let entry = tokio::task::spawn_blocking(move || store.record_revenue(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(entry))
}

/// GET /api/metrics/revenue
pub async fn revenue_metrics(
    State(app): State<AppState>,
) -> Result<Json<RevenueMetrics>, AppError> {
    let store = app.store.clone();
    let metrics = tokio::task::spawn_blocking(move || store.revenue_metrics())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(metrics))
}

/// GET /api/metrics/projects
pub async fn project_metrics(
    State(app): State<AppState>,
) -> Result<Json<ProjectMetrics>, AppError> {
    let store = app.store.clone();
    let metrics = tokio::task::spawn_blocking(move || store.project_metrics())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(metrics))
}

/// GET /api/metrics/leads
pub async fn lead_metrics(State(app): State<AppState>) -> Result<Json<LeadMetrics>, AppError> {
    let store = app.store.clone();
    let metrics = tokio::task::spawn_blocking(move || store.lead_metrics())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(metrics))
}
