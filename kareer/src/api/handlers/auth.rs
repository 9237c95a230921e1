use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::error::{KareerError, Result};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    contact: Option<String>,
    password: Option<String>,
    username: Option<String>,
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<Value>> {
    let (Some(contact), Some(password)) = (body.contact, body.password) else {
        return Err(KareerError::Validation(
            "contact and password are required".to_string(),
        ));
    };

    let outcome = state
        .accounts
        .register(&contact, &password, body.username)
        .await?;

    Ok(Json(json!({
        "status": "registered",
        "user_id": outcome.user_id,
        "token": outcome.token,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    contact: Option<String>,
    password: Option<String>,
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>> {
    let (Some(contact), Some(password)) = (body.contact, body.password) else {
        return Err(KareerError::Validation(
            "contact and password are required".to_string(),
        ));
    };

    let outcome = state.accounts.login(&contact, &password).await?;

    Ok(Json(json!({
        "status": "ok",
        "user_id": outcome.user_id,
        "token": outcome.token,
    })))
}
