mod document;
mod feedback;
mod user;

pub use document::{IngestedDocument, SOURCE_CHAT_SKILL, SOURCE_INLINE_TEXT};
pub use feedback::ResumeFeedback;
pub use user::{ContactKind, UserAccount};
