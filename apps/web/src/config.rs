use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::advisor::schema::DEFAULT_ROADMAP_DEPTH;

/// Which backend holds the persisted login flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    File(PathBuf),
    Redis(String),
}

impl SessionBackend {
    /// Log-safe description; never includes the Redis URL, which may carry credentials.
    pub fn describe(&self) -> String {
        match self {
            SessionBackend::Memory => "memory".to_string(),
            SessionBackend::File(path) => format!("file {}", path.display()),
            SessionBackend::Redis(_) => "redis".to_string(),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing API key is reported by `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub roadmap_model: String,
    pub search_model: String,
    pub thinking_budget: u32,
    pub roadmap_max_depth: usize,
    pub llm_timeout_secs: u64,
    pub session_backend: SessionBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("API_KEY")),
            api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| crate::llm_client::DEFAULT_API_BASE.to_string()),
            roadmap_model: optional_env("ROADMAP_MODEL")
                .unwrap_or_else(|| crate::llm_client::ROADMAP_MODEL.to_string()),
            search_model: optional_env("SEARCH_MODEL")
                .unwrap_or_else(|| crate::llm_client::SEARCH_MODEL.to_string()),
            thinking_budget: parse_env("THINKING_BUDGET", crate::llm_client::THINKING_BUDGET)?,
            roadmap_max_depth: parse_env("ROADMAP_MAX_DEPTH", DEFAULT_ROADMAP_DEPTH)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 300)?,
            session_backend: session_backend_from_env()?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn session_backend_from_env() -> Result<SessionBackend> {
    let kind = optional_env("SESSION_STORE").unwrap_or_else(|| "file".to_string());
    match kind.as_str() {
        "memory" => Ok(SessionBackend::Memory),
        "file" => Ok(SessionBackend::File(PathBuf::from(
            optional_env("SESSION_FILE").unwrap_or_else(|| ".pathfinder-session.json".to_string()),
        ))),
        "redis" => Ok(SessionBackend::Redis(require_env("REDIS_URL")?)),
        other => bail!("SESSION_STORE must be one of memory, file, redis (got '{other}')"),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
