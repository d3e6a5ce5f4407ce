use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::skills::tokenize;

pub const TOP_KEYWORD_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u32,
}

/// Most frequent non-stopword tokens longer than two characters.
/// Ties keep first-occurrence order.
pub fn top_keywords(text: &str, stopwords: &HashSet<String>, limit: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();
    for (position, word) in tokenize(text).into_iter().enumerate() {
        if word.chars().count() <= 2 || stopwords.contains(&word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(keyword, count, _)| KeywordCount { keyword, count })
        .collect()
}
