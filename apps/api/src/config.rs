use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::skills::SkillMatching;

const DEFAULT_STOPWORDS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/stopwords.txt");
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub stopwords_path: String,
    /// Base URL of a LanguageTool server. `None` disables grammar checking.
    pub grammar_url: Option<String>,
    pub grammar_language: String,
    pub grammar_timeout_secs: u64,
    pub skill_matching: SkillMatching,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            stopwords_path: std::env::var("STOPWORDS_PATH")
                .unwrap_or_else(|_| DEFAULT_STOPWORDS_PATH.to_string()),
            grammar_url: std::env::var("GRAMMAR_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            grammar_language: std::env::var("GRAMMAR_LANGUAGE")
                .unwrap_or_else(|_| "en-US".to_string()),
            grammar_timeout_secs: parse_env("GRAMMAR_TIMEOUT_SECS", 10)?,
            skill_matching: parse_skill_matching(std::env::var("SKILL_MATCHING").ok().as_deref())?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_skill_matching(raw: Option<&str>) -> Result<SkillMatching> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("token") => Ok(SkillMatching::Token),
        Some("phrase") => Ok(SkillMatching::Phrase),
        Some(other) => bail!("SKILL_MATCHING must be 'token' or 'phrase', got '{other}'"),
    }
}
