use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{resolve_user_id, AppState};
use crate::error::{KareerError, Result};

use super::IdentityQuery;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    message: Option<String>,
    user_id: Option<String>,
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdentityQuery>,
    Json(body): Json<ChatBody>,
) -> Result<Json<Value>> {
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| KareerError::Validation("Message is required".to_string()))?;

    let user_id = resolve_user_id(
        &headers,
        body.user_id.as_deref().or(query.user_id.as_deref()),
        &state.config.auth,
    );

    let reply = state.chat.chat(&user_id, &message).await?;

    Ok(Json(json!({ "reply": reply })))
}
