use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::ats::ScoreBreakdown;
use crate::analysis::experience::ExperienceLevel;
use crate::analysis::keywords::KeywordCount;

/// The record handed to the presentation layer. `name` and `email` may hold
/// the "not found" sentinels; those are display states, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub name: String,
    pub email: String,
    pub level: ExperienceLevel,
    pub experience_months: u32,
    pub skills_in_resume: Vec<String>,
    pub job_target: String,
    /// Target-role skills already present in the resume.
    pub matched_role_skills: Vec<String>,
    /// Target-role skills missing from the resume.
    pub recommended_skills: Vec<String>,
    pub resume_tips: Vec<String>,
    pub ats_score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub sections_found: Vec<String>,
    pub grammar_issue_count: usize,
    pub top_keywords: Vec<KeywordCount>,
    pub page_count: usize,
}
