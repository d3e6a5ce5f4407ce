//! Identity extraction: a name line and an email address, by plain heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_NOT_FOUND: &str = "Name Not Found";
pub const EMAIL_NOT_FOUND: &str = "Email Not Found";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("email regex is valid"));

// Decimal digits in any script; numerals such as "½" or "Ⅻ" do not count.
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("digit regex is valid"));

/// Returns the first line with at least two words and no digits, title-cased.
pub fn extract_name(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && line.split_whitespace().count() >= 2
                && !DIGIT_RE.is_match(line)
        })
        .map(title_case)
        .unwrap_or_else(|| NAME_NOT_FOUND.to_string())
}

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| EMAIL_NOT_FOUND.to_string())
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_word = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
