use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{KareerError, Result};
use crate::llm::api::LlmApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// Free-text completion, optionally steered by a system prompt.
    pub async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let client = self.client()?;
        client.complete(prompt, system_prompt).await
    }

    /// Completion expected to be a JSON document. Parsing is strict at
    /// this layer; lenient salvage of messy replies lives with the
    /// callers that tolerate it.
    pub async fn complete_json(&self, prompt: &str) -> Result<Value> {
        let client = self.client()?;
        client.complete_json(prompt).await
    }

    /// JSON completion deserialized into a typed payload. A reply that
    /// does not match the schema is a model-output error, not a
    /// transport error.
    pub async fn complete_structured<T: DeserializeOwned>(&self, prompt: &str) -> Result<T> {
        let json_value = self.complete_json(prompt).await?;

        serde_json::from_value(json_value)
            .map_err(|e| KareerError::ModelOutput(format!("Response did not match schema: {e}")))
    }

    fn client(&self) -> Result<LlmApiClient> {
        if !self.is_available() {
            return Err(KareerError::LlmUnavailable(self.unavailable_reason()));
        }
        let config = self
            .config()
            .ok_or_else(|| KareerError::LlmUnavailable("No config available".to_string()))?;
        LlmApiClient::new(config)
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM completion unavailable".to_string(),
        }
    }
}
