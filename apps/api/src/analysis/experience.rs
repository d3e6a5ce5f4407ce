//! Experience estimation from employment date ranges.
//!
//! Accepted range grammar (case-insensitive):
//!
//! ```text
//! range    := endpoint WS* "-" WS* (endpoint | "present" | "current")
//! endpoint := month " "+ year
//! month    := jan[uary] | feb[ruary] | mar[ch] | apr[il] | may | jun[e] | jul[y]
//!           | aug[ust] | sep[tember] | oct[ober] | nov[ember] | dec[ember]
//! year     := 4 ASCII digits in 1900..=2100
//! ```
//!
//! En and em dashes and the word "to" are normalized to "-" before matching.
//! Each range counts both endpoint months. Overlapping ranges are summed as-is.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const MONTH_PATTERN: &str = "(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|\
                             jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)({month} +[0-9]{{4}})\s*-\s*({month} +[0-9]{{4}}|present|current)",
        month = MONTH_PATTERN
    );
    Regex::new(&pattern).expect("date range regex is valid")
});

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// <12 months → Beginner, 12–59 → Intermediate, ≥60 → Advanced.
    pub fn from_months(total_months: u32) -> Self {
        match total_months {
            0..=11 => ExperienceLevel::Beginner,
            12..=59 => ExperienceLevel::Intermediate,
            _ => ExperienceLevel::Advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected '<month> <year>', got '{0}'")]
    Malformed(String),

    #[error("unknown month '{0}'")]
    UnknownMonth(String),

    #[error("year {0} outside 1900..=2100")]
    YearOutOfRange(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses "Jan 2019" / "january 2019".
    pub fn parse(raw: &str) -> Result<Self, DateParseError> {
        let mut parts = raw.split_whitespace();
        let (month_raw, year_raw) = match (parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(y), None) => (m, y),
            _ => return Err(DateParseError::Malformed(raw.to_string())),
        };

        let month_lower = month_raw.to_lowercase();
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|abbr| month_lower.starts_with(abbr))
            .map(|idx| idx as u32 + 1)
            .ok_or_else(|| DateParseError::UnknownMonth(month_raw.to_string()))?;

        let year: i32 = year_raw
            .parse()
            .map_err(|_| DateParseError::Malformed(raw.to_string()))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateParseError::YearOutOfRange(year));
        }

        Ok(Self { year, month })
    }

    fn months_until(self, end: MonthYear) -> i64 {
        (end.year as i64 - self.year as i64) * 12 + (end.month as i64 - self.month as i64) + 1
    }
}

/// One matched range; `end == None` means still ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceInterval {
    pub start: MonthYear,
    pub end: Option<MonthYear>,
}

impl ExperienceInterval {
    /// Inclusive month count, resolving an open end against `now`.
    pub fn months(&self, now: MonthYear) -> i64 {
        self.start.months_until(self.end.unwrap_or(now))
    }
}

fn normalize_separators(text: &str) -> String {
    text.replace(['\u{2013}', '\u{2014}'], "-").replace(" to ", "-")
}

/// Every range in `text`, each parsed independently.
pub fn parse_intervals(text: &str) -> Vec<Result<ExperienceInterval, DateParseError>> {
    let normalized = normalize_separators(text);
    RANGE_RE
        .captures_iter(&normalized)
        .map(|caps| {
            let start = MonthYear::parse(&caps[1])?;
            let end_raw = &caps[2];
            let end = if end_raw.eq_ignore_ascii_case("present")
                || end_raw.eq_ignore_ascii_case("current")
            {
                None
            } else {
                Some(MonthYear::parse(end_raw)?)
            };
            Ok(ExperienceInterval { start, end })
        })
        .collect()
}

/// Sums the inclusive months of every parseable, positive-length range.
pub fn total_experience_months(text: &str, today: NaiveDate) -> u32 {
    let now = MonthYear::from_date(today);
    let total: i64 = parse_intervals(text)
        .into_iter()
        .filter_map(|interval| match interval {
            Ok(interval) => Some(interval.months(now)),
            Err(e) => {
                debug!("Skipping unparseable date range: {e}");
                None
            }
        })
        .filter(|months| *months > 0)
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}
