use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Uploads are capped well above any realistic resume.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/process-resume", post(handlers::resume::process_resume))
        .route("/chat", post(handlers::chat::chat))
        .route("/agent-plan", post(handlers::agent::agent_plan))
        .route("/agent-query", post(handlers::agent::agent_query))
        .route("/predict-success", post(handlers::agent::predict_success))
        .route("/save-plan", post(handlers::plans::save_plan))
        .route("/load-plan", get(handlers::plans::load_plan))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/compare-profile", get(handlers::profile::compare_profile));

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
