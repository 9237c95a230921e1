use std::sync::Arc;

use serde_json::Value;

use crate::error::{KareerError, Result};
use crate::ingest::IngestLedger;
use crate::llm::{prompts, LlmProvider};
use crate::services::lenient_json_object;
use crate::vector::VectorStoreManager;

/// The coaching features that sit next to the resume chat: structured
/// career plans, the persona-driven agent, success prediction, and the
/// ledger-wide profile comparison.
pub struct CoachService {
    ledger: IngestLedger,
    vectors: Arc<VectorStoreManager>,
    llm: LlmProvider,
    top_k: usize,
}

impl CoachService {
    pub fn new(
        ledger: IngestLedger,
        vectors: Arc<VectorStoreManager>,
        llm: LlmProvider,
        top_k: usize,
    ) -> Self {
        Self {
            ledger,
            vectors,
            llm,
            top_k,
        }
    }

    /// Structured plan toward a goal. The model reply must contain a
    /// JSON object; anything else surfaces as a model-output error.
    pub async fn plan(&self, goal: &str) -> Result<Value> {
        if goal.trim().is_empty() {
            return Err(KareerError::Validation("Goal is required".to_string()));
        }

        let prompt = prompts::career_plan_prompt(goal);
        let reply = self.llm.complete(&prompt, None).await?;
        lenient_json_object(&reply)
    }

    /// Search-enabled agent turn. Resume context is included when the
    /// user has a collection; without one the agent answers from the
    /// model alone.
    pub async fn agent_query(
        &self,
        user_id: &str,
        query: &str,
        chat_history: Option<&str>,
        persona: Option<&str>,
    ) -> Result<String> {
        if query.trim().is_empty() {
            return Err(KareerError::Validation("Query is required".to_string()));
        }

        let context = match self.vectors.retriever(user_id) {
            Ok(retriever) => {
                let hits = retriever.query(query, self.top_k).await?;
                Some(
                    hits.iter()
                        .map(|hit| hit.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                )
            }
            Err(KareerError::MissingIngestion) => None,
            Err(e) => return Err(e),
        };

        let system = prompts::agent_system_prompt(persona);
        let prompt = prompts::agent_query_prompt(query, chat_history, context.as_deref());
        self.llm.complete(&prompt, Some(&system)).await
    }

    /// Free-text likelihood assessment of a resume against a goal.
    pub async fn predict_success(&self, resume_text: &str, goal: &str) -> Result<String> {
        if resume_text.trim().is_empty() || goal.trim().is_empty() {
            return Err(KareerError::Validation(
                "resumeText and goal are required".to_string(),
            ));
        }

        let prompt = prompts::success_prediction_prompt(resume_text, goal);
        self.llm.complete(&prompt, None).await
    }

    /// Compare everything the user has ingested (uploads plus captured
    /// skills) and return the analysis with the entry count.
    pub async fn compare_profile(&self, user_id: &str) -> Result<(String, usize)> {
        let docs = self.ledger.load(user_id);
        if docs.is_empty() {
            return Err(KareerError::NotFound(
                "No ingested documents for this user".to_string(),
            ));
        }

        let formatted = docs
            .iter()
            .map(|doc| format!("[{}] {}", doc.source, doc.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = prompts::profile_comparison_prompt(&formatted);
        let analysis = self.llm.complete(&prompt, None).await?;
        Ok((analysis, docs.len()))
    }
}
