//! Typed values flowing between pipeline stages.
//!
//! Every stage consumes and produces a single [`StageIo`] value — either raw
//! text or a token sequence. Stages declare the shapes they accept and emit
//! via [`IoKind`], which the pipeline checks at assembly time; a wrong-shape
//! value reaching a stage at run time is a contract violation and fails fast
//! with [`TextNormError::ShapeMismatch`].

use crate::errors::{Result, TextNormError};

// ============================================================================
// StageIo
// ============================================================================

/// The single value threaded through a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageIo {
    /// Raw text
    Text(String),
    /// Whitespace-delimited token sequence
    Tokens(Vec<String>),
}

impl StageIo {
    /// Static name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StageIo::Text(_) => "Text",
            StageIo::Tokens(_) => "Tokens",
        }
    }

    /// The declared shape of this value.
    pub fn kind(&self) -> IoKind {
        match self {
            StageIo::Text(_) => IoKind::Text,
            StageIo::Tokens(_) => IoKind::Tokens,
        }
    }

    /// Unwrap as text, failing fast on the wrong variant.
    pub fn expect_text(self, stage: &str) -> Result<String> {
        match self {
            StageIo::Text(s) => Ok(s),
            other => Err(TextNormError::shape_mismatch(
                stage,
                "Text",
                other.kind_name(),
            )),
        }
    }

    /// Unwrap as tokens, failing fast on the wrong variant.
    pub fn expect_tokens(self, stage: &str) -> Result<Vec<String>> {
        match self {
            StageIo::Tokens(t) => Ok(t),
            other => Err(TextNormError::shape_mismatch(
                stage,
                "Tokens",
                other.kind_name(),
            )),
        }
    }
}

impl From<String> for StageIo {
    fn from(s: String) -> Self {
        StageIo::Text(s)
    }
}

impl From<&str> for StageIo {
    fn from(s: &str) -> Self {
        StageIo::Text(s.to_string())
    }
}

impl From<Vec<String>> for StageIo {
    fn from(tokens: Vec<String>) -> Self {
        StageIo::Tokens(tokens)
    }
}

// ============================================================================
// IoKind
// ============================================================================

/// Declared input/output shape of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoKind {
    /// The stage handles raw text only
    Text,
    /// The stage handles token sequences only
    Tokens,
    /// The stage handles either shape (and preserves it)
    Any,
}

impl IoKind {
    /// Whether a producer emitting `self` can feed a consumer expecting
    /// `other`. [`IoKind::Any`] is compatible in both directions.
    pub fn feeds(self, other: IoKind) -> bool {
        matches!((self, other), (IoKind::Any, _) | (_, IoKind::Any)) || self == other
    }

    /// Static name, for error messages.
    pub fn name(self) -> &'static str {
        match self {
            IoKind::Text => "Text",
            IoKind::Tokens => "Tokens",
            IoKind::Any => "Any",
        }
    }
}
