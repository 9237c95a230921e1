use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{resolve_user_id, AppState};
use crate::error::{KareerError, Result};

use super::IdentityQuery;

#[derive(Debug, Deserialize)]
pub struct SavePlanBody {
    plan: Option<Value>,
    user_id: Option<String>,
}

/// `POST /api/save-plan`
pub async fn save_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdentityQuery>,
    Json(body): Json<SavePlanBody>,
) -> Result<Json<Value>> {
    let plan = body
        .plan
        .filter(|p| !p.is_null())
        .ok_or_else(|| KareerError::Validation("Plan is required".to_string()))?;

    let user_id = resolve_user_id(
        &headers,
        body.user_id.as_deref().or(query.user_id.as_deref()),
        &state.config.auth,
    );

    state.plans.save(&user_id, &plan)?;

    Ok(Json(json!({ "status": "saved" })))
}

/// `GET /api/load-plan`
pub async fn load_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdentityQuery>,
) -> Result<Json<Value>> {
    let user_id = resolve_user_id(&headers, query.user_id.as_deref(), &state.config.auth);

    let plan = state
        .plans
        .load(&user_id)?
        .ok_or_else(|| KareerError::NotFound("No saved plan found".to_string()))?;

    Ok(Json(json!({ "plan": plan })))
}
