use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    /// Target skills the resume already has.
    pub matched: Vec<String>,
    /// Target skills the resume is missing.
    pub missing: Vec<String>,
}

/// Splits the target skill list into matched and missing, comparing names
/// exactly as given. Duplicates collapse; order follows the target list.
pub fn match_skills(resume_skills: &[String], target_skills: &[&str]) -> SkillGap {
    let have: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut gap = SkillGap::default();

    for &skill in target_skills {
        if !seen.insert(skill) {
            continue;
        }
        if have.contains(skill) {
            gap.matched.push(skill.to_string());
        } else {
            gap.missing.push(skill.to_string());
        }
    }
    gap
}
