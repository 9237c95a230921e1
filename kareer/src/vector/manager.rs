use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::embeddings::Embedder;
use crate::error::{KareerError, Result};
use crate::ingest::sanitize_user_id;

use super::collection::{EmbeddedChunk, ScoredChunk, VectorCollection};

/// Owns the per-user embedded-chunk collections on disk.
///
/// Collections live under `<data_dir>/collections/<user>/collection.json`
/// and are strictly namespaced by user identifier: a query against one
/// user's collection can never see another's chunks. The manager is
/// built once at startup and injected through application state, so
/// there is no process-wide "current collection" to race on.
///
/// Concurrency caveat: at most one ingestion per user at a time is
/// assumed. Two concurrent ingests for the same user can both observe
/// an existing collection and interleave append with the
/// recreate-on-failure fallback, silently dropping the other's chunks.
/// Serializing same-user ingests behind a per-user lock would close
/// that window; it is deliberately not done here.
pub struct VectorStoreManager {
    root: PathBuf,
    embedder: Arc<dyn Embedder>,
}

impl VectorStoreManager {
    pub fn new(data_dir: &Path, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let root = data_dir.join("collections");
        fs::create_dir_all(&root)?;
        Ok(Self { root, embedder })
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.root
            .join(sanitize_user_id(user_id))
            .join("collection.json")
    }

    /// Load the persisted collection for `user_id`, if a non-empty one
    /// exists. A corrupt file reads as absent here; the ingest path
    /// handles the rebuild and logs the loss.
    pub fn open(&self, user_id: &str) -> Option<VectorCollection> {
        match VectorCollection::load(&self.path_for(user_id)) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Stored collection unreadable");
                None
            }
        }
    }

    pub fn exists(&self, user_id: &str) -> bool {
        self.open(user_id).is_some()
    }

    /// Embed `chunks` and fold them into the user's collection.
    ///
    /// First ingestion creates the collection. Later ingestions append
    /// to it; if the append fails for any reason (corrupt store,
    /// dimension mismatch, persist error) the existing collection is
    /// discarded and rebuilt from only the new chunks. That fallback
    /// trades completeness for availability: the call always ends in a
    /// usable collection, at the cost of previously stored chunks.
    /// The loss is logged, never silent.
    pub async fn ingest(&self, user_id: &str, chunks: &[String]) -> Result<VectorCollection> {
        if chunks.is_empty() {
            return Err(KareerError::Processing(
                "No chunks to ingest".to_string(),
            ));
        }

        let embeddings = self.embedder.embed_passages(chunks.to_vec()).await?;
        if embeddings.len() != chunks.len() {
            return Err(KareerError::Embedding(format!(
                "Embedding count mismatch: {} chunks, {} vectors",
                chunks.len(),
                embeddings.len()
            )));
        }

        let entries: Vec<EmbeddedChunk> = chunks
            .iter()
            .zip(embeddings)
            .map(|(text, embedding)| EmbeddedChunk {
                text: text.clone(),
                embedding,
            })
            .collect();

        let path = self.path_for(user_id);

        match VectorCollection::load(&path) {
            Ok(Some(existing)) => match self.try_append(&path, existing, &entries) {
                Ok(collection) => Ok(collection),
                Err(e) => {
                    tracing::warn!(
                        user_id,
                        error = %e,
                        "Append to existing collection failed; discarding it and rebuilding from the new chunks only"
                    );
                    self.create(&path, &entries)
                }
            },
            Ok(None) => self.create(&path, &entries),
            Err(e) => {
                tracing::warn!(
                    user_id,
                    error = %e,
                    "Stored collection unreadable; discarding it and rebuilding from the new chunks only"
                );
                self.create(&path, &entries)
            }
        }
    }

    /// Retrieval interface over the user's collection. `Err` carries
    /// the upload-first condition when nothing has been ingested yet;
    /// callers must not turn that into an empty-but-successful answer.
    pub fn retriever(&self, user_id: &str) -> Result<Retriever> {
        match self.open(user_id) {
            Some(collection) => Ok(Retriever {
                collection,
                embedder: Arc::clone(&self.embedder),
            }),
            None => Err(KareerError::MissingIngestion),
        }
    }

    fn try_append(
        &self,
        path: &Path,
        mut collection: VectorCollection,
        entries: &[EmbeddedChunk],
    ) -> Result<VectorCollection> {
        for entry in entries {
            collection.push(entry.clone())?;
        }
        collection.persist(path)?;
        Ok(collection)
    }

    fn create(&self, path: &Path, entries: &[EmbeddedChunk]) -> Result<VectorCollection> {
        let dimensions = entries[0].embedding.len();
        let mut collection = VectorCollection::new(dimensions);
        for entry in entries {
            collection.push(entry.clone())?;
        }
        collection.persist(path)?;
        Ok(collection)
    }
}

/// Query handle over one user's loaded collection.
pub struct Retriever {
    collection: VectorCollection,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query = self.embedder.embed_query(text).await?;
        Ok(self.collection.top_k(&query, k))
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}
