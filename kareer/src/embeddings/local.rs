use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::config::EmbeddingsConfig;
use crate::error::{KareerError, Result};

use super::Embedder;

/// Local embedding backend built on fastembed.
///
/// The underlying model is not Sync, so calls funnel through a Mutex
/// and run on the blocking pool. Passages and queries get the
/// `passage:`/`query:` prefixes the BGE family expects.
pub struct FastembedEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    batch_size: usize,
    dimensions: usize,
}

impl FastembedEmbedder {
    pub fn new(config: &EmbeddingsConfig) -> Result<Self> {
        let embedding_model = resolve_embedding_model(&config.model);
        let model = TextEmbedding::try_new(
            InitOptions::new(embedding_model).with_show_download_progress(true),
        )
        .map_err(|e| KareerError::Embedding(e.to_string()))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            batch_size: config.batch_size.max(1),
            dimensions: config.dimensions,
        })
    }

    async fn embed_blocking(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let batch_size = self.batch_size;
        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|e| {
                KareerError::Embedding(format!("Embedding model lock poisoned: {e}"))
            })?;
            model
                .embed(texts, Some(batch_size))
                .map_err(|e| KareerError::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| KareerError::Embedding(format!("Embedding worker failed: {e}")))?
    }
}

#[async_trait]
impl Embedder for FastembedEmbedder {
    async fn embed_passages(&self, passages: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let prefixed: Vec<String> = passages.iter().map(|p| format!("passage: {p}")).collect();
        self.embed_blocking(prefixed).await
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_blocking(vec![format!("query: {query}")]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| KareerError::Embedding("No embedding generated".to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn resolve_embedding_model(model_name: &str) -> EmbeddingModel {
    match model_name {
        "BAAI/bge-small-en-v1.5" | "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "BAAI/bge-base-en-v1.5" | "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "BAAI/bge-large-en-v1.5" | "bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            EmbeddingModel::AllMiniLML6V2
        }
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            EmbeddingModel::AllMiniLML12V2
        }
        other => {
            tracing::warn!(model = other, "Unknown embedding model, using bge-small-en-v1.5");
            EmbeddingModel::BGESmallENV15
        }
    }
}
