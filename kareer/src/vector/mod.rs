mod collection;
mod manager;

pub use collection::{EmbeddedChunk, ScoredChunk, VectorCollection};
pub use manager::{Retriever, VectorStoreManager};
