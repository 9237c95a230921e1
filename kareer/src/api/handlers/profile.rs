use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use crate::api::{resolve_user_id, AppState};
use crate::error::Result;

use super::IdentityQuery;

/// `GET /api/compare-profile`
pub async fn compare_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdentityQuery>,
) -> Result<Json<Value>> {
    let user_id = resolve_user_id(&headers, query.user_id.as_deref(), &state.config.auth);

    let (analysis, ingested_count) = state.coach.compare_profile(&user_id).await?;

    Ok(Json(json!({
        "analysis": analysis,
        "ingested_count": ingested_count,
    })))
}
