use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{resolve_user_id, AppState};
use crate::error::{KareerError, Result};
use crate::models::SOURCE_INLINE_TEXT;
use crate::processing::extract_resume_text;

use super::IdentityQuery;

#[derive(Debug, Deserialize)]
struct ProcessResumeBody {
    text: Option<String>,
    user_id: Option<String>,
}

/// `POST /api/process-resume`
///
/// Accepts either a multipart upload (`file` field, PDF or DOCX, plus
/// optional `text`/`user_id` fields) or a JSON body `{text, user_id?}`.
pub async fn process_resume(
    State(state): State<AppState>,
    Query(query): Query<IdentityQuery>,
    req: Request,
) -> Result<Json<Value>> {
    let headers = req.headers().clone();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let (source, resume_text, body_user_id) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &()).await.map_err(|e| {
            KareerError::Validation(format!("Invalid multipart body: {e}"))
        })?;
        read_multipart(multipart).await?
    } else {
        let Json(body) = Json::<ProcessResumeBody>::from_request(req, &())
            .await
            .map_err(|e| KareerError::Validation(format!("Invalid JSON body: {e}")))?;
        let text = body.text.unwrap_or_default();
        (SOURCE_INLINE_TEXT.to_string(), text, body.user_id)
    };

    let user_id = resolve_user_id(
        &headers,
        body_user_id.as_deref().or(query.user_id.as_deref()),
        &state.config.auth,
    );

    let outcome = state.resume.process(&user_id, &source, &resume_text).await?;

    let mut payload = json!({
        "feedback": outcome.feedback,
        "resume_text": outcome.resume_text,
    });
    if outcome.duplicate {
        payload["note"] = json!("duplicate");
    }

    Ok(Json(payload))
}

async fn read_multipart(mut multipart: Multipart) -> Result<(String, String, Option<String>)> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut inline_text: Option<String> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| KareerError::Validation(format!("Invalid multipart field: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| KareerError::Validation(format!("Failed to read upload: {e}")))?;
                // A file input submitted empty arrives with no name.
                if !filename.is_empty() && !data.is_empty() {
                    file = Some((filename, content_type, data.to_vec()));
                }
            }
            Some("text") => {
                inline_text = Some(field.text().await.map_err(|e| {
                    KareerError::Validation(format!("Failed to read text field: {e}"))
                })?);
            }
            Some("user_id") => {
                user_id = Some(field.text().await.map_err(|e| {
                    KareerError::Validation(format!("Failed to read user_id field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    if let Some((filename, content_type, data)) = file {
        let text = extract_resume_text(&data, content_type.as_deref(), Some(&filename))?;
        return Ok((filename, text, user_id));
    }

    if let Some(text) = inline_text.filter(|t| !t.trim().is_empty()) {
        return Ok((SOURCE_INLINE_TEXT.to_string(), text, user_id));
    }

    Err(KareerError::Validation(
        "No resume file or text provided.".to_string(),
    ))
}
