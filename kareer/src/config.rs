use std::env;
use std::path::PathBuf;

use serde::Deserialize;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub embeddings: EmbeddingsConfig,
    pub processing: ProcessingConfig,
    pub retrieval: RetrievalConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root for per-user ledgers, vector collections, and saved plans.
    pub data_dir: PathBuf,
    /// When true, a failed ledger persist is surfaced to the caller
    /// instead of being logged and swallowed.
    pub strict_ledger: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

/// LLM configuration for chat/completion models
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("KAREER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("KAREER_PORT", 3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:kareer.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
                token_ttl_secs: parse_env_or("TOKEN_TTL_SECS", 86400),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from(
                    env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
                ),
                strict_ledger: parse_env_or("STRICT_LEDGER", false),
            },
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "BAAI/bge-small-en-v1.5".to_string()),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", 384),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", 32),
            },
            processing: ProcessingConfig {
                chunk_size: parse_env_or("CHUNK_SIZE", 1000),
                chunk_overlap: parse_env_or("CHUNK_OVERLAP", 200),
            },
            retrieval: RetrievalConfig {
                top_k: parse_env_or("RETRIEVAL_TOP_K", 4),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_processing_defaults() {
        std::env::remove_var("CHUNK_SIZE");
        std::env::remove_var("CHUNK_OVERLAP");

        let config = Config::default();
        assert_eq!(config.processing.chunk_size, 1000);
        assert_eq!(config.processing.chunk_overlap, 200);
        assert_eq!(config.retrieval.top_k, 4);
    }

    #[test]
    #[serial]
    fn test_llm_config_absent_without_model() {
        std::env::remove_var("LLM_MODEL");
        let config = Config::default();
        assert!(config.llm.is_none());
    }

    #[test]
    #[serial]
    fn test_llm_config_from_env() {
        std::env::set_var("LLM_MODEL", "openai/gpt-4o-mini");
        std::env::set_var("LLM_TIMEOUT", "12");

        let config = Config::default();
        let llm = config.llm.expect("llm config");
        assert_eq!(llm.model, "openai/gpt-4o-mini");
        assert_eq!(llm.timeout_secs, 12);
        assert_eq!(llm.max_retries, 3);

        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_TIMEOUT");
    }

    #[test]
    #[serial]
    fn test_strict_ledger_from_env() {
        std::env::set_var("STRICT_LEDGER", "true");
        let config = Config::default();
        assert!(config.storage.strict_ledger);
        std::env::remove_var("STRICT_LEDGER");

        let config = Config::default();
        assert!(!config.storage.strict_ledger);
    }

    #[test]
    fn test_parse_llm_provider_model() {
        assert_eq!(
            parse_llm_provider_model("openai/gpt-4o-mini"),
            ("openai", "gpt-4o-mini")
        );
        assert_eq!(
            parse_llm_provider_model("ollama/llama3"),
            ("ollama", "llama3")
        );
        assert_eq!(
            parse_llm_provider_model("plain-model"),
            ("local", "plain-model")
        );
    }

    #[test]
    #[serial]
    fn test_parse_env_or_invalid_falls_back() {
        std::env::set_var("__TEST_KAREER_PORT", "not-a-number");
        let result: u16 = parse_env_or("__TEST_KAREER_PORT", 3000);
        assert_eq!(result, 3000);
        std::env::remove_var("__TEST_KAREER_PORT");
    }
}
