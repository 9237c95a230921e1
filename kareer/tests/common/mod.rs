#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wiremock::{Request, Respond, ResponseTemplate};

use kareer::api::AppState;
use kareer::config::{
    AuthConfig, Config, DatabaseConfig, EmbeddingsConfig, LlmConfig, ProcessingConfig,
    RetrievalConfig, ServerConfig, StorageConfig,
};
use kareer::db::Database;
use kareer::embeddings::Embedder;
use kareer::error::Result;
use kareer::llm::LlmProvider;

pub const STUB_DIMENSIONS: usize = 64;

/// Deterministic stand-in for the embedding model: hashes words into a
/// fixed number of buckets so identical text always lands on the same
/// vector and shared words land nearby.
pub struct StubEmbedder {
    pub dimensions: usize,
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self {
            dimensions: STUB_DIMENSIONS,
        }
    }
}

impl StubEmbedder {
    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for word in text.to_lowercase().split_whitespace() {
            let mut bucket = 0usize;
            for b in word.bytes() {
                bucket = (bucket * 31 + b as usize) % self.dimensions;
            }
            v[bucket] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed_passages(&self, passages: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(passages.iter().map(|p| self.vector(p)).collect())
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        Ok(self.vector(query))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

pub fn test_config(data_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            token_ttl_secs: 3600,
        },
        storage: StorageConfig {
            data_dir: data_dir.to_path_buf(),
            strict_ledger: false,
        },
        embeddings: EmbeddingsConfig {
            model: "BAAI/bge-small-en-v1.5".to_string(),
            dimensions: STUB_DIMENSIONS,
            batch_size: 32,
        },
        processing: ProcessingConfig {
            chunk_size: 1000,
            chunk_overlap: 200,
        },
        retrieval: RetrievalConfig { top_k: 4 },
        llm: None,
    }
}

pub fn mock_llm_config(base_url: String) -> LlmConfig {
    LlmConfig {
        model: "openai/gpt-4o-mini".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: 5,
        max_retries: 0,
    }
}

pub async fn build_state(data_dir: &Path, llm: LlmProvider) -> AppState {
    let config = test_config(data_dir);
    let db = Database::new(&config.database).await.expect("test database");
    let embedder: Arc<dyn Embedder> = Arc::new(StubEmbedder::default());
    AppState::new(config, db, embedder, llm).expect("test state")
}

/// OpenAI-style chat completion body wrapping `content`.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

/// Routes mock completions by inspecting the outgoing prompt, so one
/// mock server can serve the feedback, chat, skill-extraction, plan,
/// and profile calls of a full scenario.
pub struct PromptRouter;

impl Respond for PromptRouter {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value =
            serde_json::from_slice(&request.body).expect("completion request body");
        let prompt = body["messages"]
            .as_array()
            .and_then(|messages| messages.last())
            .and_then(|message| message["content"].as_str())
            .unwrap_or_default()
            .to_string();

        let content = if prompt.contains("HR recruiter") {
            r#"{
                "strengths": ["Python experience", "Docker experience", "Team leadership"],
                "improvements": ["Add metrics", "Add education section", "Tighten formatting"]
            }"#
            .to_string()
        } else if prompt.contains("skills, technologies, tools") {
            skill_mock_reply(&prompt)
        } else if prompt.contains("Create a practical plan") {
            r#"{"goal": "become a platform engineer", "milestones": [{"title": "Learn Kubernetes", "actions": ["do a course"]}]}"#
                .to_string()
        } else if prompt.contains("Ingested material") {
            "The resume covers Python and Docker; conversations also mention Kubernetes, which the resume should list.".to_string()
        } else {
            "Based on your resume, focus on cloud skills next.".to_string()
        };

        ResponseTemplate::new(200).set_body_json(completion_body(&content))
    }
}

fn skill_mock_reply(prompt: &str) -> String {
    if prompt.contains("Kubernetes") {
        r#"Here you go: ["Kubernetes"]"#.to_string()
    } else {
        "[]".to_string()
    }
}
