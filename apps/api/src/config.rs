use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// Résumé text (PDF or plain text) whose vocabulary guides EXPERIENCE rewrites.
    pub example_experience_path: Option<PathBuf>,
    pub profile_api_url: Option<String>,
    pub profile_api_token: Option<String>,
    pub google_nlp_api_key: Option<String>,
    pub enable_seo_keywords: bool,
    pub profile_data_dir: PathBuf,
    pub rewrite_concurrency: usize,
    pub oracle_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            example_experience_path: optional_env("EXAMPLE_EXPERIENCE_PATH").map(PathBuf::from),
            profile_api_url: optional_env("PROFILE_API_URL"),
            profile_api_token: optional_env("PROFILE_API_TOKEN"),
            google_nlp_api_key: optional_env("GOOGLE_NLP_API_KEY"),
            enable_seo_keywords: parse_env("ENABLE_SEO_KEYWORDS", false)?,
            profile_data_dir: optional_env("PROFILE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/profiles")),
            rewrite_concurrency: parse_env::<usize>("REWRITE_CONCURRENCY", 4)?.max(1),
            oracle_timeout_secs: parse_env("ORACLE_TIMEOUT_SECS", 60)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are both treated as absent.
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
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
