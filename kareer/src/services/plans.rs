use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{KareerError, Result};
use crate::ingest::sanitize_user_id;

/// Per-user saved career plan, one JSON file each, written with the
/// same temp-then-rename discipline as the ledger. Unlike the ledger
/// this store is strict: a failed save is the caller's problem.
#[derive(Debug, Clone)]
pub struct PlanStore {
    root: PathBuf,
}

impl PlanStore {
    pub fn new(data_dir: &Path) -> Result<Self> {
        let root = data_dir.join("plans");
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_user_id(user_id)))
    }

    pub fn save(&self, user_id: &str, plan: &Value) -> Result<()> {
        let path = self.path_for(user_id);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(plan)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path).map_err(KareerError::from)
    }

    pub fn load(&self, user_id: &str) -> Result<Option<Value>> {
        let path = self.path_for(user_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
