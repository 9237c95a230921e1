use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KareerError, Result};

/// One embedded chunk: the original text plus its vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A retrieval hit: chunk text plus its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub text: String,
    pub score: f32,
}

/// The embedded representation of all chunks for one user, persisted
/// as a single JSON document. Every entry's vector must match the
/// collection's dimensionality, which is fixed by the first entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorCollection {
    pub dimensions: usize,
    pub entries: Vec<EmbeddedChunk>,
}

impl VectorCollection {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one chunk, validating its vector against the collection
    /// dimensionality.
    pub fn push(&mut self, chunk: EmbeddedChunk) -> Result<()> {
        if chunk.embedding.len() != self.dimensions {
            return Err(KareerError::Embedding(format!(
                "Embedding dimension mismatch: collection is {}, chunk is {}",
                self.dimensions,
                chunk.embedding.len()
            )));
        }
        if chunk.embedding.iter().any(|v| !v.is_finite()) {
            return Err(KareerError::Embedding(
                "Embedding contains non-finite values".to_string(),
            ));
        }
        self.entries.push(chunk);
        Ok(())
    }

    /// Top-k entries by cosine similarity to `query`, descending.
    /// Ties and zero-norm vectors sort to the end deterministically.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                text: entry.text.clone(),
                score: cosine_similarity(&entry.embedding, query).unwrap_or(f32::MIN),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    /// Load a persisted collection. `Ok(None)` means nothing usable is
    /// stored there (absent file or zero entries); a corrupt file is an
    /// error so the caller can decide whether to rebuild.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let collection: Self = serde_json::from_slice(&bytes)?;
        if collection.is_empty() {
            return Ok(None);
        }
        Ok(Some(collection))
    }

    /// Persist via temp file + rename so an interrupted write leaves
    /// the previous collection intact.
    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec(self)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path).map_err(KareerError::from)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x64 = f64::from(x);
        let y64 = f64::from(y);
        dot += x64 * y64;
        norm_a += x64 * x64;
        norm_b += y64 * y64;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return None;
    }
    Some((dot / denom) as f32)
}
