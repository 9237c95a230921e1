mod local;

pub use local::FastembedEmbedder;

use async_trait::async_trait;

use crate::error::Result;

/// Seam for the embedding function: text in, vector out.
///
/// The per-user vector store only depends on this trait, so the
/// backing model (a local fastembed model in production, a
/// deterministic stub in tests) is swappable.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed document chunks for indexing.
    async fn embed_passages(&self, passages: Vec<String>) -> Result<Vec<Vec<f32>>>;

    /// Embed a retrieval query.
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>>;

    fn dimensions(&self) -> usize;
}
