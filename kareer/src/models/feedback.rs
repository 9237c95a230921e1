use serde::{Deserialize, Serialize};

/// Structured resume feedback returned by the review model.
///
/// The prompt asks for exactly three of each; the parser only insists
/// on non-empty lists so a slightly off-count reply still renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl ResumeFeedback {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.improvements.is_empty()
    }
}
