use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default per-text ceiling for the scoring core, in bytes.
pub const DEFAULT_MAX_TEXT_BYTES: usize = 200_000;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Replaces the built-in skill taxonomy when set.
    pub skill_taxonomy_path: Option<PathBuf>,
    pub max_text_bytes: usize,
    pub readiness_target_level: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skill_taxonomy_path: None,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            readiness_target_level: "entry_level".to_string(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing is testable
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let max_text_bytes = match non_empty(lookup("MATCH_MAX_TEXT_BYTES")) {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MATCH_MAX_TEXT_BYTES must be a byte count, got '{raw}'"))?,
            None => defaults.max_text_bytes,
        };

        if max_text_bytes == 0 {
            anyhow::bail!("MATCH_MAX_TEXT_BYTES must be greater than zero");
        }

        Ok(Config {
            skill_taxonomy_path: non_empty(lookup("SKILL_TAXONOMY_PATH")).map(PathBuf::from),
            max_text_bytes,
            readiness_target_level: non_empty(lookup("READINESS_TARGET_LEVEL"))
                .unwrap_or(defaults.readiness_target_level),
            rust_log: non_empty(lookup("RUST_LOG")).unwrap_or(defaults.rust_log),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
