use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KareerError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Please upload your resume first.")]
    MissingIngestion,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Model output error: {0}")]
    ModelOutput(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for KareerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            KareerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            KareerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            KareerError::UnsupportedFormat(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            KareerError::MissingIngestion => (StatusCode::BAD_REQUEST, self.to_string()),
            KareerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            KareerError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            KareerError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            KareerError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            KareerError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            KareerError::Embedding(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            KareerError::Processing(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            KareerError::ModelOutput(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            KareerError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            KareerError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            KareerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, KareerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let resp = KareerError::Validation("Message is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_ingestion_maps_to_400_with_fixed_message() {
        let err = KareerError::MissingIngestion;
        assert_eq!(err.to_string(), "Please upload your resume first.");
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_maps_to_401() {
        let resp = KareerError::Auth("Invalid password".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn conflict_maps_to_409() {
        let resp = KareerError::Conflict("email taken".into()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn model_output_maps_to_500() {
        let resp = KareerError::ModelOutput("no JSON object found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn llm_maps_to_502_and_unavailable_to_503() {
        let resp = KareerError::Llm("upstream refused".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = KareerError::LlmUnavailable("no model configured".into()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
