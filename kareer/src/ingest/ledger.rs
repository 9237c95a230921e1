use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KareerError, Result};
use crate::models::IngestedDocument;

use super::sanitize_user_id;

/// Append-only per-user record of everything that has been ingested:
/// resume uploads, inline text, and chat-derived skill entries.
///
/// One JSON file per user under `<data_dir>/ledgers/`. Reads are
/// lenient: a missing or unreadable ledger degrades to empty so a
/// damaged history never blocks new uploads or chat. Writes go through
/// a temp file and rename, so a crash mid-persist leaves the previous
/// valid ledger in place. By default a failed persist is logged and
/// swallowed so ingestion keeps flowing; `strict` surfaces it to the
/// caller instead.
#[derive(Debug, Clone)]
pub struct IngestLedger {
    root: PathBuf,
    strict: bool,
}

impl IngestLedger {
    pub fn new(data_dir: &Path, strict: bool) -> Result<Self> {
        let root = data_dir.join("ledgers");
        fs::create_dir_all(&root)?;
        Ok(Self { root, strict })
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_user_id(user_id)))
    }

    /// Load a user's ledger. Missing file is an empty ledger, not an
    /// error; so is an unreadable or corrupt one (logged at warn).
    pub fn load(&self, user_id: &str) -> Vec<IngestedDocument> {
        let path = self.path_for(user_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ledger unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ledger corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append one record and rewrite the ledger file atomically.
    pub fn append(&self, user_id: &str, doc: IngestedDocument) -> Result<()> {
        let mut docs = self.load(user_id);
        docs.push(doc);

        match self.persist(user_id, &docs) {
            Ok(()) => Ok(()),
            Err(e) if self.strict => Err(e),
            Err(e) => {
                tracing::warn!(
                    user_id,
                    error = %e,
                    "Ledger persist failed; continuing without durability"
                );
                Ok(())
            }
        }
    }

    /// Upload dedup: has this exact content already been ingested?
    pub fn contains_hash(&self, user_id: &str, hash: &str) -> bool {
        self.load(user_id).iter().any(|d| d.content_hash == hash)
    }

    /// Skill-capture dedup: exact text match, since derived entries
    /// are short strings rather than full documents.
    pub fn contains_text(&self, user_id: &str, text: &str) -> bool {
        self.load(user_id).iter().any(|d| d.text == text)
    }

    pub fn len(&self, user_id: &str) -> usize {
        self.load(user_id).len()
    }

    pub fn is_empty(&self, user_id: &str) -> bool {
        self.len(user_id) == 0
    }

    fn persist(&self, user_id: &str, docs: &[IngestedDocument]) -> Result<()> {
        let path = self.path_for(user_id);
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(docs)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path).map_err(KareerError::from)
    }
}
