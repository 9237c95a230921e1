use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::content_hash;

/// Source sentinel for text supplied inline instead of as a file upload.
pub const SOURCE_INLINE_TEXT: &str = "inline-text";

/// Source sentinel for skill entries derived from chat messages.
pub const SOURCE_CHAT_SKILL: &str = "chat-skill";

/// One record in a user's append-only ingest ledger.
///
/// Records are created on successful upload or skill capture, never
/// mutated and never deleted. Equal `text` always produces an equal
/// `content_hash`, which is what the upload path dedups on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestedDocument {
    pub source: String,
    pub text: String,
    pub content_hash: String,
    pub timestamp: DateTime<Utc>,
}

impl IngestedDocument {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let content_hash = content_hash(&text);
        Self {
            source: source.into(),
            text,
            content_hash,
            timestamp: Utc::now(),
        }
    }

    /// Synthetic ledger entry for a skill mentioned in chat.
    pub fn chat_skill(skill: impl Into<String>) -> Self {
        Self::new(SOURCE_CHAT_SKILL, skill)
    }
}
