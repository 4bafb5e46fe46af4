use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::state::AppState;

/// GET /health — liveness probe. Always 200 with a fixed-shape payload.
pub async fn health(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": app.service_name,
    }))
}
