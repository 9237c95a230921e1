pub mod agent;
pub mod auth;
pub mod chat;
pub mod plans;
pub mod profile;
pub mod resume;

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// `user_id` passed as a query parameter, accepted by every route that
/// resolves an identity.
#[derive(Debug, Default, Deserialize)]
pub struct IdentityQuery {
    pub user_id: Option<String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
