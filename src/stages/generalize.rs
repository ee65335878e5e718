//! Label-generalization stages.
//!
//! Each stage replaces a class of volatile surface forms (day numbers,
//! years, weekdays, months, times of day) with a fixed label so downstream
//! matchers see one canonical token instead of an open set of variants.
//!
//! Synonym matching is case-sensitive against lowercase synonym lists; the
//! standard composition runs these stages over already-lowercased input
//! where that matters. Tokens are compared with their punctuation stripped
//! but emitted unchanged on a miss.

use regex::Regex;

use crate::errors::Result;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;

/// Remove ASCII punctuation from a token for synonym comparison.
fn strip_token_punct(token: &str) -> String {
    token.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Shared rewrite loop for the regex-driven stages: replace each
/// whitespace token fully matching `pattern` with `label`.
fn generalize_by_pattern(text: &str, pattern: &Regex, label: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            if pattern.is_match(token) {
                label
            } else {
                token
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shared rewrite loop for the synonym-driven stages: replace each token
/// whose punctuation-stripped form is in `synonyms` with `label`, keeping
/// the original token (punctuation included) otherwise.
fn generalize_by_synonyms(text: &str, synonyms: &[&str], label: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            if synonyms.contains(&strip_token_punct(token).as_str()) {
                label.to_string()
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// GeneralizeDayNumber
// ============================================================================

/// Replaces day-of-month numerals with `DAY_NUMBER`.
#[derive(Debug, Clone)]
pub struct GeneralizeDayNumber {
    pattern: Regex,
}

impl GeneralizeDayNumber {
    pub const LABEL: &'static str = "DAY_NUMBER";

    /// Create the stage, compiling the day-of-month pattern
    /// (1–3 as a single digit, 00–29, 30 or 31).
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^([1-3]|[0-2][0-9]|3[01])$")?;
        Ok(Self { pattern })
    }
}

impl Stage for GeneralizeDayNumber {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("generalize_day_number")?;
        Ok(StageIo::Text(generalize_by_pattern(
            &text,
            &self.pattern,
            Self::LABEL,
        )))
    }
}

// ============================================================================
// GeneralizeYear
// ============================================================================

/// Replaces 4-digit years in `[1000, 2999]` with `YEAR`.
#[derive(Debug, Clone)]
pub struct GeneralizeYear {
    pattern: Regex,
}

impl GeneralizeYear {
    pub const LABEL: &'static str = "YEAR";

    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^[1-2][0-9]{3}$")?;
        Ok(Self { pattern })
    }
}

impl Stage for GeneralizeYear {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("generalize_year")?;
        Ok(StageIo::Text(generalize_by_pattern(
            &text,
            &self.pattern,
            Self::LABEL,
        )))
    }
}

// ============================================================================
// GeneralizeTimeOfDay
// ============================================================================

/// Replaces time-of-day words with `TIME_OF_THE_DAY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizeTimeOfDay;

impl GeneralizeTimeOfDay {
    pub const LABEL: &'static str = "TIME_OF_THE_DAY";

    const SYNONYMS: &'static [&'static str] = &[
        "afternoon",
        "arvo",
        "bedtime",
        "day",
        "daylight",
        "daytime",
        "eve",
        "evening",
        "mealtime",
        "morning",
        "night",
        "nighttime",
        "tonight",
        "lunchtime",
    ];
}

impl Stage for GeneralizeTimeOfDay {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("generalize_time_of_day")?;
        Ok(StageIo::Text(generalize_by_synonyms(
            &text,
            Self::SYNONYMS,
            Self::LABEL,
        )))
    }
}

// ============================================================================
// GeneralizeDayOfWeek
// ============================================================================

/// Replaces weekday names and abbreviations with `DAY_OF_WEEK`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizeDayOfWeek;

impl GeneralizeDayOfWeek {
    pub const LABEL: &'static str = "DAY_OF_WEEK";

    #[rustfmt::skip]
    const SYNONYMS: &'static [&'static str] = &[
        "monday", "mon", "mo",
        "tuesday", "tue", "tu",
        "wednesday", "wed", "we",
        "thursday", "thu", "th",
        "friday", "fri", "fr",
        "saturday", "sat", "sa",
        "sunday", "sun", "su",
    ];
}

impl Stage for GeneralizeDayOfWeek {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("generalize_day_of_week")?;
        Ok(StageIo::Text(generalize_by_synonyms(
            &text,
            Self::SYNONYMS,
            Self::LABEL,
        )))
    }
}

// ============================================================================
// GeneralizeMonth
// ============================================================================

/// Replaces month names and abbreviations with `MONTH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizeMonth;

impl GeneralizeMonth {
    pub const LABEL: &'static str = "MONTH";

    #[rustfmt::skip]
    const SYNONYMS: &'static [&'static str] = &[
        "january", "jan",
        "february", "feb",
        "march", "mar",
        "april", "apr",
        "may",
        "june", "jun",
        "july", "jul",
        "august", "aug",
        "september", "sep", "sept",
        "october", "oct",
        "november", "nov",
        "december", "dec",
    ];
}

impl Stage for GeneralizeMonth {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("generalize_month")?;
        Ok(StageIo::Text(generalize_by_synonyms(
            &text,
            Self::SYNONYMS,
            Self::LABEL,
        )))
    }
}
