use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Nothing is strictly required: a missing credential only produces a warning
/// when the key rotator is built.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: CredentialConfig,
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Raw credential settings, handed to `KeyRotator::from_config`.
#[derive(Debug, Clone, Default)]
pub struct CredentialConfig {
    /// Comma-separated list from `GEMINI_API_KEYS`.
    pub key_list: Option<String>,
    /// Legacy single key from `GEMINI_API_KEY`.
    pub legacy_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            credentials: CredentialConfig {
                key_list: lookup("GEMINI_API_KEYS"),
                legacy_key: lookup("GEMINI_API_KEY"),
            },
            llm: LlmConfig {
                base_url: lookup("GEMINI_API_BASE")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_secs: lookup("LLM_TIMEOUT_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
