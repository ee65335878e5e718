//! Text cleaning stages: URL removal, case folding, punctuation and digit
//! stripping.
//!
//! All stages here are pure string rewrites; the only state is a pattern
//! compiled at construction.

use regex::Regex;

use crate::errors::Result;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;

/// The reduced punctuation set removed by [`CleanPunctLight`].
///
/// Apostrophe, comma, hyphen, period and question mark are deliberately
/// kept: they carry meaning for later stages (contractions, clause
/// boundaries).
const LIGHT_PUNCT: &str = "!\"#$%&()*+/:;<=>@[\\]^_`{|}~";

// ============================================================================
// CleanText
// ============================================================================

/// Strips surrounding whitespace and removes URL-like substrings.
#[derive(Debug, Clone)]
pub struct CleanText {
    url_regex: Regex,
}

impl CleanText {
    /// Create the stage, compiling the consolidated URL pattern.
    pub fn new() -> Result<Self> {
        // Scheme-prefixed URLs, www-prefixed hosts, and e-mail-like forms.
        let url_regex = Regex::new(
            r"(([A-Za-z]{3,9}:(?://)?)(?:[-;:&=+$,\w]+@)?[A-Za-z0-9.-]+(:[0-9]+)?|(?:www\.|[-;:&=+$,\w]+@)[A-Za-z0-9.-]+)((?:/[+~%/.\w-]*)?\??(?:[-+=&;%@.\w]*)#?(?:\w*))?",
        )?;
        Ok(Self { url_regex })
    }
}

impl Stage for CleanText {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("clean_text")?;
        let trimmed = text.trim();
        let cleaned = self.url_regex.replace_all(trimmed, " ");
        Ok(StageIo::Text(cleaned.trim().to_string()))
    }
}

// ============================================================================
// LowerText
// ============================================================================

/// Folds text to lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerText;

impl Stage for LowerText {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("lower_text")?;
        Ok(StageIo::Text(text.to_lowercase()))
    }
}

// ============================================================================
// CleanPunct / CleanPunctLight
// ============================================================================

/// Removes all ASCII punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanPunct;

impl Stage for CleanPunct {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("clean_punct")?;
        Ok(StageIo::Text(
            text.chars().filter(|c| !c.is_ascii_punctuation()).collect(),
        ))
    }
}

/// Removes the reduced punctuation set [`LIGHT_PUNCT`] only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanPunctLight;

impl Stage for CleanPunctLight {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("clean_punct_light")?;
        Ok(StageIo::Text(
            text.chars().filter(|c| !LIGHT_PUNCT.contains(*c)).collect(),
        ))
    }
}

// ============================================================================
// CleanDigits
// ============================================================================

/// Removes all ASCII digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanDigits;

impl Stage for CleanDigits {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("clean_digits")?;
        Ok(StageIo::Text(
            text.chars().filter(|c| !c.is_ascii_digit()).collect(),
        ))
    }
}
