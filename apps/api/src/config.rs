use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{GenerationSettings, DEFAULT_API_BASE, DEFAULT_MODEL};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_STORED_DOCUMENTS: usize = 32;

/// Application configuration loaded from environment variables.
/// Loaded once at startup; startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub generation: GenerationSettings,
    pub generation_timeout: Duration,
    /// Directory for generated PDFs. `None` means the system temp directory.
    pub output_dir: Option<PathBuf>,
    pub max_stored_documents: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GenerationSettings::default();

        let max_stored_documents =
            parse_or(&lookup, "MAX_STORED_DOCUMENTS", DEFAULT_MAX_STORED_DOCUMENTS)?;
        if max_stored_documents == 0 {
            bail!("MAX_STORED_DOCUMENTS must be at least 1");
        }

        let timeout_secs = parse_or(&lookup, "GENERATION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("GENERATION_TIMEOUT_SECS must be at least 1");
        }

        Ok(Config {
            google_api_key: require(&lookup, "GOOGLE_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            generation: GenerationSettings {
                temperature: parse_or(&lookup, "GEMINI_TEMPERATURE", defaults.temperature)?,
                top_p: parse_or(&lookup, "GEMINI_TOP_P", defaults.top_p)?,
                top_k: parse_or(&lookup, "GEMINI_TOP_K", defaults.top_k)?,
                max_output_tokens: parse_or(
                    &lookup,
                    "GEMINI_MAX_OUTPUT_TOKENS",
                    defaults.max_output_tokens,
                )?,
                response_mime_type: defaults.response_mime_type,
            },
            generation_timeout: Duration::from_secs(timeout_secs),
            output_dir: lookup("RESUME_OUTPUT_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            max_stored_documents,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
