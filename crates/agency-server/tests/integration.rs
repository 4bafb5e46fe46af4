use std::sync::Arc;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open a fresh store in a temp directory and build the router over it.
fn test_app(dir: &TempDir) -> (axum::Router, Arc<agency_core::Store>) {
    let store = Arc::new(agency_core::Store::open(&dir.path().join("agency.db")).unwrap());
    let app = agency_server::build_router(store.clone(), "agency-workflow");
    (app, store)
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(app, "GET", uri, None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "POST", uri, Some(body)).await
}

async fn patch_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "PATCH", uri, Some(body)).await
}

fn sample_client() -> serde_json::Value {
    serde_json::json!({
        "name": "Acme Corp",
        "email": "ops@acme.test",
        "phone": "+1 555 0100",
        "company": "Acme",
        "status": "active",
    })
}

fn sample_lead() -> serde_json::Value {
    serde_json::json!({
        "name": "Jordan Reyes",
        "email": "jordan@prospect.test",
        "company": "Prospect Ltd",
        "status": "proposal",
        "estimated_value": 8000.0,
        "currency": "GBP",
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_always_returns_fixed_payload() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (status, json) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "agency-workflow");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn create_client_persists_fields_and_stamps_timestamps() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (status, created) = post_json(app.clone(), "/api/clients", sample_client()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Acme Corp");
    assert_eq!(created["status"], "active");
    assert_eq!(created["created_at"], created["updated_at"]);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = get(app, &format!("/api/clients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "ops@acme.test");
    assert_eq!(fetched["phone"], "+1 555 0100");
}

#[tokio::test]
async fn empty_patch_is_rejected_with_400() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (_, created) = post_json(app.clone(), "/api/clients", sample_client()).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) =
        patch_json(app, &format!("/api/clients/{id}"), serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "no valid fields to update");
}

#[tokio::test]
async fn patch_changes_only_given_field() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (_, created) = post_json(app.clone(), "/api/clients", sample_client()).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = patch_json(
        app.clone(),
        &format!("/api/clients/{id}"),
        serde_json::json!({ "status": "inactive" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["name"], "Acme Corp");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn leads_filter_by_status() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    post_json(app.clone(), "/api/leads", sample_lead()).await;
    post_json(
        app.clone(),
        "/api/leads",
        serde_json::json!({
            "name": "Ana", "email": "ana@test.test", "status": "new",
        }),
    )
    .await;

    let (status, json) = get(app.clone(), "/api/leads?status=new").await;
    assert_eq!(status, StatusCode::OK);
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Ana");

    let (_, all) = get(app, "/api/leads").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn lead_conversion_creates_client_and_analytics_entry() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (_, lead) = post_json(app.clone(), "/api/leads", sample_lead()).await;
    let lead_id = lead["id"].as_str().unwrap();

    let (status, result) =
        post_json(app.clone(), &format!("/api/leads/{lead_id}/convert"), serde_json::json!({}))
            .await;
    assert_eq!(status, StatusCode::OK);
    let client_id = result["client_id"].as_str().unwrap();

    // Contact fields copied onto exactly one new client.
    let (_, clients) = get(app.clone(), "/api/clients").await;
    let clients = clients.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["id"], client_id);
    assert_eq!(clients[0]["email"], "jordan@prospect.test");
    assert_eq!(clients[0]["status"], "active");

    // Lead is now won.
    let (_, won) = get(app.clone(), &format!("/api/leads/{lead_id}")).await;
    assert_eq!(won["status"], "won");

    // Exactly one lead_converted entry referencing both.
    let (_, entries) = get(app, "/api/analytics?type=lead_converted").await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["lead_id"], lead_id);
    assert_eq!(entries[0]["client_id"], client_id);
    assert_eq!(entries[0]["value"], 8000.0);
}

#[tokio::test]
async fn converting_unknown_lead_returns_404() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (status, _) =
        post_json(app, "/api/leads/missing/convert", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_client_leaves_project_reference_dangling() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (_, client) = post_json(app.clone(), "/api/clients", sample_client()).await;
    let client_id = client["id"].as_str().unwrap();

    let (_, project) = post_json(
        app.clone(),
        "/api/projects",
        serde_json::json!({
            "title": "Rebrand",
            "client_id": client_id,
            "status": "planning",
        }),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();

    let (status, _) = request(app.clone(), "DELETE", &format!("/api/clients/{client_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(app.clone(), &format!("/api/clients/{client_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, orphan) = get(app, &format!("/api/projects/{project_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orphan["client_id"], client_id);
}

#[tokio::test]
async fn client_portal_returns_client_or_404() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (_, client) = post_json(app.clone(), "/api/clients", sample_client()).await;
    let id = client["id"].as_str().unwrap();

    let (status, json) = get(app.clone(), &format!("/api/client-portal/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Acme Corp");

    let (status, _) = get(app, "/api/client-portal/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_unknown_type_falls_back_to_all_rows() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    post_json(
        app.clone(),
        "/api/analytics/revenue",
        serde_json::json!({ "amount": 500.0, "currency": "USD" }),
    )
    .await;
    post_json(
        app.clone(),
        "/api/analytics",
        serde_json::json!({ "type": "client_acquired", "value": 1.0 }),
    )
    .await;

    let (status, filtered) = get(app.clone(), "/api/analytics?type=revenue_generated").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let (status, all) = get(app, "/api/analytics?type=quarterly_forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn webhook_acknowledges_arbitrary_json() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (status, json) = post_json(
        app,
        "/api/webhook",
        serde_json::json!({ "event": "payment.settled", "amount": 42 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["received"], true);
}

#[tokio::test]
async fn search_spans_collections_and_respects_limit() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    post_json(app.clone(), "/api/clients", sample_client()).await;
    post_json(
        app.clone(),
        "/api/tasks",
        serde_json::json!({
            "title": "Acme kickoff deck",
            "status": "todo",
            "priority": "high",
        }),
    )
    .await;

    let (status, hits) = get(app.clone(), "/api/search?q=acme").await;
    assert_eq!(status, StatusCode::OK);
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["kind"], "client");
    assert_eq!(hits[1]["kind"], "task");

    let (_, capped) = get(app, "/api/search?q=acme&limit=1").await;
    assert_eq!(capped.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn metrics_endpoints_aggregate() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    post_json(
        app.clone(),
        "/api/analytics/revenue",
        serde_json::json!({ "amount": 1200.0, "currency": "USD" }),
    )
    .await;
    let (_, lead) = post_json(app.clone(), "/api/leads", sample_lead()).await;
    let lead_id = lead["id"].as_str().unwrap();
    post_json(app.clone(), &format!("/api/leads/{lead_id}/convert"), serde_json::json!({})).await;

    let (status, revenue) = get(app.clone(), "/api/metrics/revenue").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(revenue["total_revenue"], 1200.0);
    assert_eq!(revenue["entries"], 1);

    let (status, leads) = get(app, "/api/metrics/leads").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leads["total"], 1);
    assert_eq!(leads["converted"], 1);
    assert_eq!(leads["conversion_rate"], 100.0);
}

#[tokio::test]
async fn user_sync_upserts_and_removes() {
    let dir = TempDir::new().unwrap();
    let (app, _store) = test_app(&dir);

    let (status, user) = request(
        app.clone(),
        "PUT",
        "/api/users/ext_1",
        Some(serde_json::json!({
            "first_name": "Robin",
            "email": "robin@agency.test",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["user_id"], "ext_1");

    let (_, users) = get(app.clone(), "/api/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);

    let (status, _) = request(app.clone(), "DELETE", "/api/users/ext_1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, users) = get(app, "/api/users").await;
    assert!(users.as_array().unwrap().is_empty());
}
