use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{resolve_user_id, AppState};
use crate::error::{KareerError, Result};

use super::IdentityQuery;

#[derive(Debug, Deserialize)]
pub struct AgentPlanBody {
    goal: Option<String>,
}

/// `POST /api/agent-plan`
pub async fn agent_plan(
    State(state): State<AppState>,
    Json(body): Json<AgentPlanBody>,
) -> Result<Json<Value>> {
    let goal = body
        .goal
        .filter(|g| !g.trim().is_empty())
        .ok_or_else(|| KareerError::Validation("Goal is required".to_string()))?;

    let plan = state.coach.plan(&goal).await?;

    Ok(Json(json!({ "plan": plan })))
}

#[derive(Debug, Deserialize)]
pub struct AgentQueryBody {
    query: Option<String>,
    chat_history: Option<Value>,
    persona: Option<String>,
    user_id: Option<String>,
}

/// `POST /api/agent-query`
pub async fn agent_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(identity): Query<IdentityQuery>,
    Json(body): Json<AgentQueryBody>,
) -> Result<Json<Value>> {
    let query = body
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| KareerError::Validation("Query is required".to_string()))?;

    let user_id = resolve_user_id(
        &headers,
        body.user_id.as_deref().or(identity.user_id.as_deref()),
        &state.config.auth,
    );

    let chat_history = body.chat_history.map(render_history);

    let reply = state
        .coach
        .agent_query(
            &user_id,
            &query,
            chat_history.as_deref(),
            body.persona.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "reply": reply })))
}

/// Frontends send history either as a plain string or as a list of
/// `{role, content}` turns; both flatten to one transcript block.
fn render_history(history: Value) -> String {
    match history {
        Value::String(s) => s,
        Value::Array(turns) => turns
            .iter()
            .map(|turn| {
                let role = turn["role"].as_str().unwrap_or("user");
                let content = turn["content"].as_str().unwrap_or_default();
                format!("{role}: {content}")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictBody {
    #[serde(rename = "resumeText")]
    resume_text: Option<String>,
    goal: Option<String>,
}

/// `POST /api/predict-success`
pub async fn predict_success(
    State(state): State<AppState>,
    Json(body): Json<PredictBody>,
) -> Result<Json<Value>> {
    let (Some(resume_text), Some(goal)) = (body.resume_text, body.goal) else {
        return Err(KareerError::Validation(
            "resumeText and goal are required".to_string(),
        ));
    };

    let prediction = state.coach.predict_success(&resume_text, &goal).await?;

    Ok(Json(json!({ "prediction": prediction })))
}
