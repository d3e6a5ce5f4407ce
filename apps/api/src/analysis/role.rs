use crate::analysis::vocabulary::{RoleProfile, GENERAL_ROLE};

/// A single incidental keyword hit is not enough to commit to a role.
const MIN_CONFIDENT_HITS: usize = 2;

/// Counts the role's keywords that occur as substrings of the lowercase text.
pub fn role_hits(text_lower: &str, profile: &RoleProfile) -> usize {
    profile
        .keywords
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .count()
}

/// Picks the role with the most keyword hits. Profiles are scanned in
/// priority order and only a strictly higher count displaces the leader.
/// Falls back to [`GENERAL_ROLE`] when the best count is below two.
pub fn classify_role(text: &str, profiles: &[RoleProfile]) -> String {
    let text_lower = text.to_lowercase();
    let mut best: Option<(&RoleProfile, usize)> = None;
    for profile in profiles {
        let hits = role_hits(&text_lower, profile);
        if best.map_or(true, |(_, top)| hits > top) {
            best = Some((profile, hits));
        }
    }

    match best {
        Some((profile, hits)) if hits >= MIN_CONFIDENT_HITS => profile.name.to_string(),
        _ => GENERAL_ROLE.to_string(),
    }
}
