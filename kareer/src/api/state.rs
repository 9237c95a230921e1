use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::embeddings::Embedder;
use crate::error::Result;
use crate::ingest::{ChunkingPolicy, IngestLedger};
use crate::llm::LlmProvider;
use crate::services::{AccountService, ChatService, CoachService, PlanStore, ResumeService};
use crate::skills::SkillCaptureFilter;
use crate::vector::VectorStoreManager;

/// Everything a request handler needs, wired once at startup.
///
/// The per-user vector registry and ledger live here and are injected
/// into each handler through axum state; there is no ambient mutable
/// "current store".
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resume: Arc<ResumeService>,
    pub chat: Arc<ChatService>,
    pub coach: Arc<CoachService>,
    pub plans: Arc<PlanStore>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Database,
        embedder: Arc<dyn Embedder>,
        llm: LlmProvider,
    ) -> Result<Self> {
        let ledger = IngestLedger::new(&config.storage.data_dir, config.storage.strict_ledger)?;
        let vectors = Arc::new(VectorStoreManager::new(&config.storage.data_dir, embedder)?);
        let chunker = ChunkingPolicy::new(&config.processing);
        let top_k = config.retrieval.top_k;

        let resume = Arc::new(ResumeService::new(
            ledger.clone(),
            Arc::clone(&vectors),
            chunker,
            llm.clone(),
        ));
        let chat = Arc::new(ChatService::new(
            ledger.clone(),
            Arc::clone(&vectors),
            SkillCaptureFilter::new(llm.clone()),
            llm.clone(),
            top_k,
        ));
        let coach = Arc::new(CoachService::new(
            ledger,
            Arc::clone(&vectors),
            llm.clone(),
            top_k,
        ));
        let plans = Arc::new(PlanStore::new(&config.storage.data_dir)?);
        let accounts = Arc::new(AccountService::new(db, config.auth.clone()));

        Ok(Self {
            config: Arc::new(config),
            resume,
            chat,
            coach,
            plans,
            accounts,
        })
    }
}
