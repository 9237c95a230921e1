mod account;
mod chat;
mod coach;
mod plans;
mod resume;

pub use account::{AccountService, AuthOutcome};
pub use chat::ChatService;
pub use coach::CoachService;
pub use plans::PlanStore;
pub use resume::{ResumeOutcome, ResumeService};

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{KareerError, Result};

/// Salvage a JSON object from a free-text model reply.
///
/// Strict parse of the whole reply first, then strip code fences and
/// grab the outermost brace-delimited span, with one second pass that
/// normalizes smart quotes. Anything beyond that is a model-output
/// error.
pub(crate) fn lenient_json_object(reply: &str) -> Result<Value> {
    let trimmed = reply.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let defenced = trimmed.replace("```json", "").replace("```", "");

    static BRACED: OnceLock<Regex> = OnceLock::new();
    let braced = BRACED.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"));

    if let Some(candidate) = braced.find(&defenced) {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(candidate.as_str()) {
            return Ok(value);
        }

        // Second chance: quote artifacts from chat-tuned models.
        let normalized = candidate
            .as_str()
            .replace(['\u{2018}', '\u{2019}'], "'")
            .replace(['\u{201c}', '\u{201d}'], "\"");
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&normalized) {
            return Ok(value);
        }
    }

    Err(KareerError::ModelOutput(
        "Could not find a valid JSON object in the model reply".to_string(),
    ))
}
