//! Pipeline Orchestrator: load → extract (+ grammar, concurrently) → gap → score.
//!
//! The text stages are pure and run together on a blocking worker; the
//! grammar check runs on the async runtime under its own deadline. Both are
//! joined before scoring. A loader failure aborts the analysis; no partial
//! result is ever returned.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::ats::{compute_ats_score, AtsInputs};
use crate::analysis::document::load_document;
use crate::analysis::experience::{total_experience_months, ExperienceLevel};
use crate::analysis::gap::match_skills;
use crate::analysis::identity::{extract_email, extract_name};
use crate::analysis::keywords::{top_keywords, KeywordCount, TOP_KEYWORD_LIMIT};
use crate::analysis::role::classify_role;
use crate::analysis::skills::extract_skills;
use crate::analysis::vocabulary::AnalyzerConfig;
use crate::errors::AnalysisError;
use crate::grammar::{check_with_timeout, GrammarChecker};
use crate::models::analysis::AnalysisResult;

/// Output of the independent text stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeProfile {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience_months: u32,
    pub job_target: String,
    pub top_keywords: Vec<KeywordCount>,
}

/// Runs the identity, skill, experience, role and keyword stages over `text`.
pub fn extract_profile(text: &str, config: &AnalyzerConfig, today: NaiveDate) -> ResumeProfile {
    ResumeProfile {
        name: extract_name(text),
        email: extract_email(text),
        skills: extract_skills(text, config.skills, config.skill_matching),
        experience_months: total_experience_months(text, today),
        job_target: classify_role(text, config.roles),
        top_keywords: top_keywords(text, &config.stopwords, TOP_KEYWORD_LIMIT),
    }
}

/// Built once at startup; shared by all requests.
pub struct Analyzer {
    config: Arc<AnalyzerConfig>,
    grammar: Arc<dyn GrammarChecker>,
    grammar_timeout: Duration,
}

impl Analyzer {
    pub fn new(
        config: Arc<AnalyzerConfig>,
        grammar: Arc<dyn GrammarChecker>,
        grammar_timeout: Duration,
    ) -> Self {
        Self {
            config,
            grammar,
            grammar_timeout,
        }
    }

    pub fn grammar_backend(&self) -> &'static str {
        self.grammar.backend()
    }

    pub async fn analyze(&self, upload: Bytes) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_at(upload, Utc::now().date_naive()).await
    }

    /// Same as [`Analyzer::analyze`] with "present" resolved against `today`.
    pub async fn analyze_at(
        &self,
        upload: Bytes,
        today: NaiveDate,
    ) -> Result<AnalysisResult, AnalysisError> {
        let analysis_id = Uuid::new_v4();
        let span = info_span!("analysis", %analysis_id, bytes = upload.len());

        async move {
            let (document, text) = tokio::task::spawn_blocking(move || load_document(&upload))
                .await
                .map_err(|e| AnalysisError::Internal(format!("document loader task failed: {e}")))??;

            let text: Arc<str> = Arc::from(text);
            let stage_text = Arc::clone(&text);
            let stage_config = Arc::clone(&self.config);
            let extraction = tokio::task::spawn_blocking(move || {
                extract_profile(&stage_text, &stage_config, today)
            });
            let grammar = check_with_timeout(self.grammar.as_ref(), &text, self.grammar_timeout);

            let (profile, grammar_issues) = tokio::join!(extraction, grammar);
            let profile = profile
                .map_err(|e| AnalysisError::Internal(format!("extraction task failed: {e}")))?;

            let target_skills = self.config.role_keywords(&profile.job_target);
            let gap = match_skills(&profile.skills, target_skills);

            let report = compute_ats_score(
                AtsInputs {
                    text: &text,
                    document: &document,
                    resume_skills: &profile.skills,
                    target_skills,
                    grammar_issue_count: grammar_issues.len(),
                    name: &profile.name,
                    email: &profile.email,
                },
                self.config.sections,
            );

            info!(
                "Analysis complete: score={} role='{}' months={} skills={} grammar_issues={}",
                report.score,
                profile.job_target,
                profile.experience_months,
                profile.skills.len(),
                grammar_issues.len()
            );

            Ok(AnalysisResult {
                analysis_id,
                name: profile.name,
                email: profile.email,
                level: ExperienceLevel::from_months(profile.experience_months),
                experience_months: profile.experience_months,
                skills_in_resume: profile.skills,
                job_target: profile.job_target,
                matched_role_skills: gap.matched,
                recommended_skills: gap.missing,
                resume_tips: report.tips,
                ats_score: report.score,
                score_breakdown: report.breakdown,
                sections_found: report.sections_found,
                grammar_issue_count: grammar_issues.len(),
                top_keywords: profile.top_keywords,
                page_count: document.page_count(),
            })
        }
        .instrument(span)
        .await
    }
}
