use axum::http::{header, HeaderMap};

use crate::auth::verify_token;
use crate::config::AuthConfig;

/// Fallback identity for anonymous callers.
pub const DEFAULT_USER_ID: &str = "default";

/// Resolve the acting user, in order: bearer token, then an explicit
/// `user_id` from the body or query string, then `"default"`.
///
/// An invalid or expired bearer token is logged and ignored rather
/// than rejected: uploads and chat stay usable without an account.
pub fn resolve_user_id(headers: &HeaderMap, explicit: Option<&str>, auth: &AuthConfig) -> String {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            match verify_token(token, auth) {
                Ok(claims) => return claims.sub,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring invalid bearer token");
                }
            }
        }
    }

    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}
