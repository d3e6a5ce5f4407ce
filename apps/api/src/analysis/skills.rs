//! Skill extraction against the fixed vocabulary.
//!
//! `Token` mode matches a skill only when its whole lowercase name is one word
//! token of the resume, so multi-word or punctuated names ("Machine Learning",
//! "C++") never match. `Phrase` mode tokenizes the skill name the same way and
//! looks for that token sequence in the resume.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word regex is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatching {
    #[default]
    Token,
    Phrase,
}

/// Lowercase word tokens of `text`, in order.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Returns the vocabulary entries found in `text`, in vocabulary order.
pub fn extract_skills(text: &str, vocabulary: &[&str], mode: SkillMatching) -> Vec<String> {
    let tokens = tokenize(text);
    match mode {
        SkillMatching::Token => {
            let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            vocabulary
                .iter()
                .filter(|skill| token_set.contains(skill.to_lowercase().as_str()))
                .map(|skill| skill.to_string())
                .collect()
        }
        SkillMatching::Phrase => vocabulary
            .iter()
            .filter(|skill| contains_phrase(&tokens, &tokenize(skill)))
            .map(|skill| skill.to_string())
            .collect(),
    }
}

fn contains_phrase(tokens: &[String], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens.windows(phrase.len()).any(|w| w == phrase)
}
