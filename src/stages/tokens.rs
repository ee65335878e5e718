//! Token-level stages: tokenizing, joining, masking, length gating.

use crate::errors::Result;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;
use crate::types::UNK_LABEL;

// ============================================================================
// TokenizeSplit / JoinTokens / Detokenize
// ============================================================================

/// Splits text on whitespace, dropping empty tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenizeSplit;

impl Stage for TokenizeSplit {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Tokens
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("tokenize")?;
        Ok(StageIo::Tokens(
            text.split_whitespace().map(str::to_string).collect(),
        ))
    }
}

/// Joins tokens with single spaces and strips surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinTokens;

impl Stage for JoinTokens {
    fn input_kind(&self) -> IoKind {
        IoKind::Tokens
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let tokens = input.expect_tokens("join_tokens")?;
        Ok(StageIo::Text(tokens.join(" ").trim().to_string()))
    }
}

/// Joins tokens with single spaces, without trimming.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detokenize;

impl Stage for Detokenize {
    fn input_kind(&self) -> IoKind {
        IoKind::Tokens
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let tokens = input.expect_tokens("detokenize")?;
        Ok(StageIo::Text(tokens.join(" ")))
    }
}

// ============================================================================
// StopWords
// ============================================================================

/// Replaces stopword tokens with the `UNK` label.
#[derive(Debug, Clone)]
pub struct StopWords {
    stop_words: Vec<String>,
}

impl StopWords {
    /// Default stopword set for the target corpus.
    pub fn new() -> Self {
        Self {
            stop_words: vec!["op".to_string()],
        }
    }

    /// Use a caller-supplied stopword set instead.
    pub fn with_words(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            stop_words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for StopWords {
    fn input_kind(&self) -> IoKind {
        IoKind::Tokens
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Tokens
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let tokens = input.expect_tokens("stop_words")?;
        Ok(StageIo::Tokens(
            tokens
                .into_iter()
                .map(|t| {
                    if self.stop_words.iter().any(|s| s == &t) {
                        UNK_LABEL.to_string()
                    } else {
                        t
                    }
                })
                .collect(),
        ))
    }
}

// ============================================================================
// OneChar
// ============================================================================

/// Replaces tokens of length ≤ 1 with `UNK`, keeping the single-letter
/// words `i` and `a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneChar;

impl Stage for OneChar {
    fn input_kind(&self) -> IoKind {
        IoKind::Tokens
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Tokens
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let tokens = input.expect_tokens("one_char")?;
        Ok(StageIo::Tokens(
            tokens
                .into_iter()
                .map(|t| {
                    if t.chars().count() > 1 || t == "i" || t == "a" {
                        t
                    } else {
                        UNK_LABEL.to_string()
                    }
                })
                .collect(),
        ))
    }
}

// ============================================================================
// CountOfTokens
// ============================================================================

/// Length gate: collapses the whole input to an empty string when its
/// token count is ≤ `n`, passes it through unchanged otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CountOfTokens {
    n: usize,
}

impl CountOfTokens {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Stage for CountOfTokens {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("count_of_tokens")?;
        if text.split_whitespace().count() <= self.n {
            Ok(StageIo::Text(String::new()))
        } else {
            Ok(StageIo::Text(text))
        }
    }
}
