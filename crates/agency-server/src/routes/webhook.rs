use axum::Json;

/// POST /api/webhook — accept and log arbitrary JSON from external
/// integrations (payments, identity provider events). No verification or
/// processing; the payload is recorded in the log and acknowledged.
pub async fn webhook(Json(payload): Json<serde_json::Value>) -> Json<serde_json::Value> {
    tracing::info!(payload = %payload, "webhook received");
    Json(serde_json::json!({ "received": true }))
}
