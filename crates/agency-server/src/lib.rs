pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use agency_core::Store;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(store: Arc<Store>, service_name: &str) -> Router {
    let app_state = state::AppState::new(store, service_name);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness
        .route("/health", get(routes::health::health))
        // External integrations
        .route("/api/webhook", post(routes::webhook::webhook))
        .route(
            "/api/client-portal/{client_id}",
            get(routes::portal::client_portal),
        )
        // Clients
        .route("/api/clients", get(routes::clients::list_clients))
        .route("/api/clients", post(routes::clients::create_client))
        .route("/api/clients/{id}", get(routes::clients::get_client))
        .route("/api/clients/{id}", patch(routes::clients::update_client))
        .route("/api/clients/{id}", delete(routes::clients::delete_client))
        // Projects
        .route("/api/projects", get(routes::projects::list_projects))
        .route("/api/projects", post(routes::projects::create_project))
        .route("/api/projects/{id}", get(routes::projects::get_project))
        .route(
            "/api/projects/{id}",
            patch(routes::projects::update_project),
        )
        .route(
            "/api/projects/{id}",
            delete(routes::projects::delete_project),
        )
        // Leads
        .route("/api/leads", get(routes::leads::list_leads))
        .route("/api/leads", post(routes::leads::create_lead))
        .route("/api/leads/{id}", get(routes::leads::get_lead))
        .route("/api/leads/{id}", patch(routes::leads::update_lead))
        .route("/api/leads/{id}", delete(routes::leads::delete_lead))
        .route("/api/leads/{id}/convert", post(routes::leads::convert_lead))
        // Tasks
        .route("/api/tasks", get(routes::tasks::list_tasks))
        .route("/api/tasks", post(routes::tasks::create_task))
        .route("/api/tasks/{id}", get(routes::tasks::get_task))
        .route("/api/tasks/{id}", patch(routes::tasks::update_task))
        .route("/api/tasks/{id}", delete(routes::tasks::delete_task))
        // Analytics
        .route("/api/analytics", get(routes::analytics::list_analytics))
        .route("/api/analytics", post(routes::analytics::record_analytics))
        .route(
            "/api/analytics/revenue",
            post(routes::analytics::record_revenue),
        )
        .route(
            "/api/metrics/revenue",
            get(routes::analytics::revenue_metrics),
        )
        .route(
            "/api/metrics/projects",
            get(routes::analytics::project_metrics),
        )
        .route("/api/metrics/leads", get(routes::analytics::lead_metrics))
        // Users (identity-provider mirror)
        .route("/api/users", get(routes::users::list_users))
        .route("/api/users/{external_id}", put(routes::users::sync_user))
        .route(
            "/api/users/{external_id}",
            delete(routes::users::remove_user),
        )
        // Search
        .route("/api/search", get(routes::search::dashboard_search))
        .layer(cors)
        .with_state(app_state)
}

/// Start the agency API server.
pub async fn serve(store: Arc<Store>, service_name: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(store, service_name);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("agency API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
