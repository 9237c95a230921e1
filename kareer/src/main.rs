use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kareer::api::{create_router, AppState};
use kareer::config::Config;
use kareer::db::Database;
use kareer::embeddings::{Embedder, FastembedEmbedder};
use kareer::llm::LlmProvider;

#[derive(Parser)]
#[command(name = "kareer")]
#[command(about = "Self-hostable resume feedback and career coaching backend")]
struct Args {
    /// Fail requests when the ingest ledger cannot be persisted,
    /// instead of logging and continuing.
    #[arg(long)]
    strict_ledger: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kareer=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if args.strict_ledger {
        config.storage.strict_ledger = true;
    }

    if config.auth.jwt_secret.is_empty() {
        tracing::warn!(
            "JWT_SECRET is not set — issued tokens are signed with an empty secret. Set JWT_SECRET in production."
        );
    }

    std::fs::create_dir_all(&config.storage.data_dir)?;
    tracing::info!(data_dir = %config.storage.data_dir.display(), "Storage root ready");

    tracing::info!("Initializing database...");
    let db = Database::new(&config.database).await?;

    tracing::info!("Loading embedding model: {}...", config.embeddings.model);
    let embedder: Arc<dyn Embedder> = Arc::new(FastembedEmbedder::new(&config.embeddings)?);

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - feedback, chat, and agent features will fail until LLM_MODEL is set");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db, embedder, llm)?;
    let app = create_router(state);

    tracing::info!("Kareer starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
