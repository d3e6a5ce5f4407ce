//! LanguageTool client: checks resume text against a LanguageTool server's
//! `/v2/check` endpoint (self-hosted or public).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{GrammarChecker, GrammarError, GrammarIssue};

const CHECK_PATH: &str = "/v2/check";

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    #[serde(default)]
    message: String,
    #[serde(default)]
    offset: usize,
    #[serde(default)]
    length: usize,
    rule: Option<CheckRule>,
}

#[derive(Debug, Deserialize)]
struct CheckRule {
    id: String,
}

impl From<CheckMatch> for GrammarIssue {
    fn from(m: CheckMatch) -> Self {
        GrammarIssue {
            message: m.message,
            offset: m.offset,
            length: m.length,
            rule_id: m.rule.map(|r| r.id),
        }
    }
}

#[derive(Clone)]
pub struct LanguageToolChecker {
    client: Client,
    base_url: String,
    language: String,
}

impl LanguageToolChecker {
    /// `timeout` bounds the HTTP exchange itself; callers still wrap the
    /// whole check in their own deadline.
    pub fn new(base_url: String, language: String, timeout: Duration) -> Result<Self, GrammarError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            language,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHECK_PATH)
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        let response = self
            .client
            .post(self.endpoint())
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GrammarError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let issues = parse_check_response(&body)?;
        debug!("LanguageTool reported {} issues", issues.len());
        Ok(issues)
    }

    fn backend(&self) -> &'static str {
        "languagetool"
    }
}

fn parse_check_response(body: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
    let parsed: CheckResponse = serde_json::from_str(body)?;
    Ok(parsed.matches.into_iter().map(GrammarIssue::from).collect())
}
