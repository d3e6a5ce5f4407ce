//! ATS Scorer: deterministic weighted sum of five capped components.
//!
//! | component              | max | tip when |
//! |------------------------|-----|----------|
//! | section coverage       | 20  | < 10     |
//! | keyword overlap        | 30  | < 15     |
//! | grammar                | 15  | < 10     |
//! | contact completeness   | 10  | == 0     |
//! | structural cleanliness | 25  | < 25     |
//!
//! The maxima sum to 100, so the rounded total always lands in [0, 100].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::document::Document;
use crate::analysis::identity::{EMAIL_NOT_FOUND, NAME_NOT_FOUND};

const SECTION_MAX: f64 = 20.0;
const SECTION_CAP: usize = 7;
const KEYWORD_POINTS: f64 = 3.0;
const KEYWORD_CAP: usize = 10;
const GRAMMAR_MAX: f64 = 15.0;
const GRAMMAR_PENALTY: f64 = 1.5;
const GRAMMAR_CAP: usize = 10;
const CONTACT_MAX: f64 = 10.0;
const STRUCTURE_CLEAN: f64 = 25.0;
const STRUCTURE_CLUTTERED: f64 = 10.0;

/// Pages with more non-standard symbols than this count as cluttered.
const MAX_SYMBOLS_PER_PAGE: usize = 20;

pub const TIP_SECTIONS: &str =
    "Add more standard ATS sections (Education, Skills, Experience, etc.).";
pub const TIP_KEYWORDS: &str = "Optimize resume with more job-specific keywords.";
pub const TIP_GRAMMAR: &str = "Reduce spelling/grammar mistakes for ATS readability.";
pub const TIP_CONTACT: &str = "Add clear name and email in your resume header.";
pub const TIP_STRUCTURE: &str = "Remove images/symbols/tables for better ATS parsing.";

static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s,.:\-()]").expect("symbol regex is valid"));

/// Everything the scorer reads, gathered from the earlier stages.
#[derive(Debug, Clone, Copy)]
pub struct AtsInputs<'a> {
    pub text: &'a str,
    pub document: &'a Document,
    pub resume_skills: &'a [String],
    pub target_skills: &'a [&'a str],
    pub grammar_issue_count: usize,
    pub name: &'a str,
    pub email: &'a str,
}

/// Unrounded component scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub section_coverage: f64,
    pub keyword_overlap: f64,
    pub grammar: f64,
    pub contact: f64,
    pub structure: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.section_coverage + self.keyword_overlap + self.grammar + self.contact + self.structure
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u8,
    pub tips: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub sections_found: Vec<String>,
}

/// Standard section names present anywhere in the text (case-insensitive).
pub fn find_sections(text: &str, sections: &[&str]) -> Vec<String> {
    let text_lower = text.to_lowercase();
    sections
        .iter()
        .filter(|s| text_lower.contains(&s.to_lowercase()))
        .map(|s| s.to_string())
        .collect()
}

pub fn section_score(sections_found: usize) -> f64 {
    sections_found.min(SECTION_CAP) as f64 * (SECTION_MAX / SECTION_CAP as f64)
}

/// Skills shared by resume and target role, compared case-insensitively.
pub fn keyword_matches(resume_skills: &[String], target_skills: &[&str]) -> usize {
    let resume: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let target: HashSet<String> = target_skills.iter().map(|s| s.to_lowercase()).collect();
    resume.intersection(&target).count()
}

pub fn keyword_score(matched: usize) -> f64 {
    matched.min(KEYWORD_CAP) as f64 * KEYWORD_POINTS
}

pub fn grammar_score(issue_count: usize) -> f64 {
    (GRAMMAR_MAX - issue_count.min(GRAMMAR_CAP) as f64 * GRAMMAR_PENALTY).max(0.0)
}

pub fn contact_score(name: &str, email: &str) -> f64 {
    if name != NAME_NOT_FOUND && email != EMAIL_NOT_FOUND {
        CONTACT_MAX
    } else {
        0.0
    }
}

pub fn count_symbols(text: &str) -> usize {
    SYMBOL_RE.find_iter(text).count()
}

/// True as soon as one page embeds an image or is cluttered with symbols.
pub fn has_bad_ats_elements(document: &Document) -> bool {
    let bad_page = document.pages().iter().find(|page| {
        page.has_images || count_symbols(&page.text) > MAX_SYMBOLS_PER_PAGE
    });
    if let Some(page) = bad_page {
        debug!(
            "Page {} fails the structure check (images: {})",
            page.number, page.has_images
        );
    }
    bad_page.is_some()
}

pub fn structure_score(document: &Document) -> f64 {
    if has_bad_ats_elements(document) {
        STRUCTURE_CLUTTERED
    } else {
        STRUCTURE_CLEAN
    }
}

pub fn compute_ats_score(inputs: AtsInputs<'_>, sections: &[&str]) -> AtsReport {
    let sections_found = find_sections(inputs.text, sections);
    let breakdown = ScoreBreakdown {
        section_coverage: section_score(sections_found.len()),
        keyword_overlap: keyword_score(keyword_matches(
            inputs.resume_skills,
            inputs.target_skills,
        )),
        grammar: grammar_score(inputs.grammar_issue_count),
        contact: contact_score(inputs.name, inputs.email),
        structure: structure_score(inputs.document),
    };

    let mut tips = Vec::new();
    if breakdown.section_coverage < 10.0 {
        tips.push(TIP_SECTIONS.to_string());
    }
    if breakdown.keyword_overlap < 15.0 {
        tips.push(TIP_KEYWORDS.to_string());
    }
    if breakdown.grammar < 10.0 {
        tips.push(TIP_GRAMMAR.to_string());
    }
    if breakdown.contact == 0.0 {
        tips.push(TIP_CONTACT.to_string());
    }
    if breakdown.structure < STRUCTURE_CLEAN {
        tips.push(TIP_STRUCTURE.to_string());
    }

    let score = breakdown.total().round_ties_even().clamp(0.0, 100.0) as u8;

    AtsReport {
        score,
        tips,
        breakdown,
        sections_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::document::Page;
    use crate::analysis::vocabulary::{ATS_SECTIONS, ROLE_PROFILES};

    fn page(text: &str, has_images: bool) -> Page {
        Page {
            number: 1,
            text: text.to_string(),
            has_images,
        }
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_section_score_caps_at_seven() {
        assert_eq!(section_score(0), 0.0);
        assert!((section_score(7) - 20.0).abs() < 1e-9);
        assert!((section_score(10) - 20.0).abs() < 1e-9);
        assert!((section_score(3) - 60.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_sections_is_case_insensitive_substring() {
        let found = find_sections("EDUCATION\nWork Experience\nProfessional Summary", ATS_SECTIONS);
        // "professional summary" also contains "summary"
        assert_eq!(
            found,
            vec!["education", "experience", "summary", "professional summary"]
        );
    }

    #[test]
    fn test_all_ten_sections_still_score_twenty() {
        let text = ATS_SECTIONS.join("\n");
        let found = find_sections(&text, ATS_SECTIONS);
        assert_eq!(found.len(), 10);
        assert!((section_score(found.len()) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_score_caps_at_thirty() {
        assert_eq!(keyword_score(0), 0.0);
        assert_eq!(keyword_score(4), 12.0);
        assert_eq!(keyword_score(10), 30.0);
        assert_eq!(keyword_score(25), 30.0);
    }

    #[test]
    fn test_keyword_matches_ignore_case() {
        let target = ROLE_PROFILES[1].keywords;
        assert_eq!(keyword_matches(&owned(&["HTML", "CSS", "Flask", "Python"]), target), 3);
    }

    #[test]
    fn test_grammar_score() {
        assert_eq!(grammar_score(0), 15.0);
        assert_eq!(grammar_score(4), 9.0);
        assert_eq!(grammar_score(10), 0.0);
        assert_eq!(grammar_score(500), 0.0);
    }

    #[test]
    fn test_contact_score_needs_both() {
        assert_eq!(contact_score("Jane Doe", "jane@x.io"), 10.0);
        assert_eq!(contact_score(NAME_NOT_FOUND, "jane@x.io"), 0.0);
        assert_eq!(contact_score("Jane Doe", EMAIL_NOT_FOUND), 0.0);
    }

    #[test]
    fn test_twenty_five_symbols_on_one_page_is_penalized() {
        let cluttered = format!("Skills {}", "*".repeat(25));
        let document = Document::new(vec![page(&cluttered, false)]);
        assert_eq!(count_symbols(&cluttered), 25);
        assert_eq!(structure_score(&document), 10.0);
    }

    #[test]
    fn test_twenty_symbols_is_still_clean() {
        let text = format!("Skills {}", "#".repeat(20));
        let document = Document::new(vec![page(&text, false)]);
        assert_eq!(structure_score(&document), 25.0);
    }

    #[test]
    fn test_allowed_punctuation_is_not_a_symbol() {
        assert_eq!(count_symbols("Jan 2020 - Dec 2021, Acme (Remote): lead. ok_1"), 0);
        assert_eq!(count_symbols("a@b | c • d"), 3);
    }

    #[test]
    fn test_image_on_any_page_is_penalized() {
        let document = Document::new(vec![page("clean", false), page("photo", true)]);
        assert!(has_bad_ats_elements(&document));
        assert_eq!(structure_score(&document), 10.0);
    }

    #[test]
    fn test_empty_resume_scores_structure_and_grammar_only() {
        let document = Document::new(vec![page("", false)]);
        let report = compute_ats_score(
            AtsInputs {
                text: "",
                document: &document,
                resume_skills: &[],
                target_skills: &[],
                grammar_issue_count: 0,
                name: NAME_NOT_FOUND,
                email: EMAIL_NOT_FOUND,
            },
            ATS_SECTIONS,
        );
        assert_eq!(report.score, 40);
        assert_eq!(
            report.tips,
            vec![TIP_SECTIONS, TIP_KEYWORDS, TIP_CONTACT]
        );
        assert!(report.sections_found.is_empty());
    }

    #[test]
    fn test_strong_resume_scores_high_with_no_tips() {
        let text = "Education\nExperience\nSkills\nProjects\nCertifications\nSummary\nContact";
        let document = Document::new(vec![page(text, false)]);
        let skills = owned(&[
            "html", "css", "javascript", "react", "frontend", "backend", "flask", "django",
            "web development",
        ]);
        let report = compute_ats_score(
            AtsInputs {
                text,
                document: &document,
                resume_skills: &skills,
                target_skills: ROLE_PROFILES[1].keywords,
                grammar_issue_count: 1,
                name: "Jane Doe",
                email: "jane@x.io",
            },
            ATS_SECTIONS,
        );
        // 20 + 27 + 13.5 + 10 + 25 = 95.5 → 96 (ties to even)
        assert_eq!(report.score, 96);
        assert!(report.tips.is_empty());
    }

    #[test]
    fn test_tips_follow_component_order() {
        let document = Document::new(vec![page("photo", true)]);
        let report = compute_ats_score(
            AtsInputs {
                text: "",
                document: &document,
                resume_skills: &[],
                target_skills: &[],
                grammar_issue_count: 8,
                name: NAME_NOT_FOUND,
                email: EMAIL_NOT_FOUND,
            },
            ATS_SECTIONS,
        );
        assert_eq!(
            report.tips,
            vec![TIP_SECTIONS, TIP_KEYWORDS, TIP_GRAMMAR, TIP_CONTACT, TIP_STRUCTURE]
        );
        // 0 + 0 + 3 + 0 + 10
        assert_eq!(report.score, 13);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let document = Document::new(vec![page("", false)]);
        for issues in [0, 5, 10, 100] {
            for matched in 0..=12 {
                let skills: Vec<String> = (0..matched).map(|i| format!("s{i}")).collect();
                let target: Vec<&str> = skills.iter().map(String::as_str).collect();
                let report = compute_ats_score(
                    AtsInputs {
                        text: &ATS_SECTIONS.join(" "),
                        document: &document,
                        resume_skills: &skills,
                        target_skills: &target,
                        grammar_issue_count: issues,
                        name: "A B",
                        email: "a@b.co",
                    },
                    ATS_SECTIONS,
                );
                assert!(report.score <= 100);
                let expected = report.breakdown.total().round_ties_even();
                assert_eq!(report.score as f64, expected);
            }
        }
    }
}
