use std::sync::Arc;

use crate::error::{KareerError, Result};
use crate::ingest::{content_hash, ChunkingPolicy, IngestLedger};
use crate::llm::{prompts, LlmProvider};
use crate::models::{IngestedDocument, ResumeFeedback};
use crate::services::lenient_json_object;
use crate::vector::VectorStoreManager;

/// Outcome of one resume ingestion.
pub struct ResumeOutcome {
    pub feedback: ResumeFeedback,
    pub resume_text: String,
    pub duplicate: bool,
}

/// The upload pipeline: hash, dedup against the ledger, chunk, embed
/// into the user's collection, record in the ledger, then ask the
/// model for structured feedback.
///
/// Duplicate content (same hash already in the ledger) skips
/// re-chunking, re-embedding, and the ledger append, but feedback is
/// still generated fresh; the caller gets a `duplicate` marker to
/// surface.
pub struct ResumeService {
    ledger: IngestLedger,
    vectors: Arc<VectorStoreManager>,
    chunker: ChunkingPolicy,
    llm: LlmProvider,
}

impl ResumeService {
    pub fn new(
        ledger: IngestLedger,
        vectors: Arc<VectorStoreManager>,
        chunker: ChunkingPolicy,
        llm: LlmProvider,
    ) -> Self {
        Self {
            ledger,
            vectors,
            chunker,
            llm,
        }
    }

    pub async fn process(
        &self,
        user_id: &str,
        source: &str,
        resume_text: &str,
    ) -> Result<ResumeOutcome> {
        if resume_text.trim().is_empty() {
            return Err(KareerError::Validation(
                "No resume file or text provided.".to_string(),
            ));
        }

        let hash = content_hash(resume_text);
        let duplicate = self.ledger.contains_hash(user_id, &hash);

        if duplicate {
            tracing::info!(user_id, "Duplicate resume content, skipping re-ingestion");
        } else {
            let chunks = self.chunker.split(resume_text);
            tracing::info!(user_id, chunk_count = chunks.len(), "Ingesting resume");
            self.vectors.ingest(user_id, &chunks).await?;
            self.ledger
                .append(user_id, IngestedDocument::new(source, resume_text))?;
        }

        let feedback = self.generate_feedback(resume_text).await?;

        Ok(ResumeOutcome {
            feedback,
            resume_text: resume_text.to_string(),
            duplicate,
        })
    }

    async fn generate_feedback(&self, resume_text: &str) -> Result<ResumeFeedback> {
        let prompt = prompts::resume_feedback_prompt(resume_text);
        let reply = self.llm.complete(&prompt, None).await?;
        parse_feedback(&reply)
    }
}

fn parse_feedback(reply: &str) -> Result<ResumeFeedback> {
    let value = lenient_json_object(reply)?;
    let feedback: ResumeFeedback = serde_json::from_value(value).map_err(|e| {
        KareerError::ModelOutput(format!("Feedback reply did not match schema: {e}"))
    })?;

    if feedback.is_empty() {
        return Err(KareerError::ModelOutput(
            "Feedback reply contained no strengths or improvements".to_string(),
        ));
    }

    Ok(feedback)
}
