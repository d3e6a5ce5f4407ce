//! Grammar Checker: the external collaborator that reports language issues.
//!
//! Only the number of issues feeds the score. A failing or slow checker must
//! never fail an analysis: [`check_with_timeout`] turns every failure into an
//! empty issue list and logs it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod language_tool;

pub use language_tool::LanguageToolChecker;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Grammar service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Unexpected grammar service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Grammar check timed out after {0:?}")]
    Timeout(Duration),
}

/// One language issue reported for the resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub message: String,
    pub offset: usize,
    pub length: usize,
    pub rule_id: Option<String>,
}

/// Pluggable grammar backend. Carried in `AppState` as `Arc<dyn GrammarChecker>`.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Used when no grammar service is configured. Reports no issues.
pub struct DisabledGrammarChecker;

#[async_trait]
impl GrammarChecker for DisabledGrammarChecker {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        Ok(vec![])
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}

/// Runs the checker under `timeout`. Failures and timeouts yield no issues.
pub async fn check_with_timeout(
    checker: &dyn GrammarChecker,
    text: &str,
    timeout: Duration,
) -> Vec<GrammarIssue> {
    let result = match tokio::time::timeout(timeout, checker.check(text)).await {
        Ok(result) => result,
        Err(_) => Err(GrammarError::Timeout(timeout)),
    };

    match result {
        Ok(issues) => issues,
        Err(e) => {
            warn!(
                "Grammar check ({}) failed, treating as zero issues: {e}",
                checker.backend()
            );
            vec![]
        }
    }
}
