use std::sync::Arc;

use crate::error::{KareerError, Result};
use crate::ingest::IngestLedger;
use crate::llm::{prompts, LlmProvider};
use crate::models::IngestedDocument;
use crate::skills::SkillCaptureFilter;
use crate::vector::VectorStoreManager;

/// Retrieval-augmented chat over the user's ingested resume, plus the
/// skill-capture side channel: skills mentioned in the message are
/// written back into the ledger and vector store as synthetic
/// documents.
pub struct ChatService {
    ledger: IngestLedger,
    vectors: Arc<VectorStoreManager>,
    skills: SkillCaptureFilter,
    llm: LlmProvider,
    top_k: usize,
}

impl ChatService {
    pub fn new(
        ledger: IngestLedger,
        vectors: Arc<VectorStoreManager>,
        skills: SkillCaptureFilter,
        llm: LlmProvider,
        top_k: usize,
    ) -> Self {
        Self {
            ledger,
            vectors,
            skills,
            llm,
            top_k,
        }
    }

    pub async fn chat(&self, user_id: &str, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(KareerError::Validation("Message is required".to_string()));
        }

        // No collection means no prior upload: the caller gets the
        // upload-first error, never an empty-context answer.
        let retriever = self.vectors.retriever(user_id)?;
        let hits = retriever.query(message, self.top_k).await?;
        let context = hits
            .iter()
            .map(|hit| hit.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = prompts::chat_answer_prompt(&context, message);
        let reply = self.llm.complete(&prompt, None).await?;

        self.capture_skills(user_id, message).await;

        Ok(reply)
    }

    /// Best-effort: a failed capture never fails the chat reply.
    async fn capture_skills(&self, user_id: &str, message: &str) {
        let skills = self.skills.extract(message).await;
        if skills.is_empty() {
            return;
        }

        for skill in skills {
            // Derived entries dedup on exact text, not content hash.
            if self.ledger.contains_text(user_id, &skill) {
                continue;
            }

            if let Err(e) = self.vectors.ingest(user_id, &[skill.clone()]).await {
                tracing::warn!(user_id, skill = %skill, error = %e, "Skill capture: vector ingest failed");
                continue;
            }

            let doc = IngestedDocument::chat_skill(&skill);
            if let Err(e) = self.ledger.append(user_id, doc) {
                tracing::warn!(user_id, skill = %skill, error = %e, "Skill capture: ledger append failed");
            } else {
                tracing::info!(user_id, skill = %skill, "Captured skill from chat");
            }
        }
    }
}
