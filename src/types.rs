//! Core types for rapid_textnorm
//!
//! This module defines the shared linguistic data structures: coarse and
//! fine-grained part-of-speech tags, dependency relations, analyzed tokens,
//! and the span types produced by the NLP engine contract.

use serde::{Deserialize, Serialize};

/// Placeholder substituted for masked (stopword or too-short) tokens.
pub const UNK_LABEL: &str = "UNK";

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Coarse part-of-speech tag (Universal Dependencies style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Determiner,
    Conjunction,
    Particle,
    Numeral,
    /// Anything the tagger could not classify (or tagging disabled)
    Other,
}

impl PosTag {
    /// Whether this tag marks a verb for the purposes of preposition
    /// restoration (main verbs only, not auxiliaries).
    pub fn is_verb(self) -> bool {
        matches!(self, PosTag::Verb)
    }
}

/// Fine-grained verb form tag (Penn Treebank style).
///
/// Only the forms the tense detector discriminates between are modeled
/// individually; everything else collapses to [`FineTag::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FineTag {
    /// VB — verb, base form
    Vb,
    /// VBD — verb, simple past tense
    Vbd,
    /// VBG — verb, gerund or present participle
    Vbg,
    /// VBN — verb, past participle
    Vbn,
    /// VBP — verb, non-3rd-person singular present
    Vbp,
    /// VBZ — verb, 3rd-person singular present
    Vbz,
    Other,
}

impl FineTag {
    /// Whether this tag marks simple past tense.
    pub fn is_past(self) -> bool {
        matches!(self, FineTag::Vbd)
    }

    /// Whether this tag marks a present-tense verb form.
    pub fn is_present(self) -> bool {
        matches!(self, FineTag::Vbp)
    }
}

// ============================================================================
// Dependency relations
// ============================================================================

/// Dependency relation label on a token.
///
/// The tense detector only discriminates the sentence root and auxiliary
/// children; all other relations collapse to [`DepRel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepRel {
    /// Syntactic root of a sentence
    Root,
    /// Auxiliary verb attached to a head verb
    Aux,
    Other,
}

// ============================================================================
// Engine output types
// ============================================================================

/// A single token produced by the NLP engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    /// Token text (no surrounding whitespace)
    pub text: String,
    /// Whether the token is followed by whitespace in the source text
    pub has_trailing_space: bool,
    /// Coarse part-of-speech tag
    pub pos: PosTag,
    /// Fine-grained tag
    pub tag: FineTag,
    /// Dependency relation to the head
    pub dep: DepRel,
    /// Index of the head token within the analysis, `None` for roots
    /// or when parsing is disabled
    pub head: Option<usize>,
}

impl AnalyzedToken {
    /// Create a token with no syntactic annotation (tagging/parsing disabled).
    pub fn bare(text: impl Into<String>, has_trailing_space: bool) -> Self {
        Self {
            text: text.into(),
            has_trailing_space,
            pos: PosTag::Other,
            tag: FineTag::Other,
            dep: DepRel::Other,
            head: None,
        }
    }
}

/// A sentence span over the token sequence of an [`Analysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    /// Index of the first token of the sentence
    pub start_token: usize,
    /// One past the last token of the sentence
    pub end_token: usize,
    /// Index of the syntactic root token, within `[start_token, end_token)`
    pub root: usize,
}

/// A named-entity span over the source text.
///
/// Offsets are byte offsets into the analyzed string and always fall on
/// character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Byte offset of the first character of the span
    pub start_char: usize,
    /// Byte offset one past the last character of the span
    pub end_char: usize,
    /// Entity label, e.g. `PERSON`, `GPE`, `DATE`, `CARDINAL`
    pub label: String,
}

/// Full analysis of one input string, as returned by an NLP engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Tokens in source order
    pub tokens: Vec<AnalyzedToken>,
    /// Sentence segmentation over `tokens`
    pub sentences: Vec<SentenceSpan>,
    /// Named-entity spans over the source text
    pub entities: Vec<EntitySpan>,
}

impl Analysis {
    /// The last token of the analysis, if any.
    pub fn last_token(&self) -> Option<&AnalyzedToken> {
        self.tokens.last()
    }

    /// The last sentence of the analysis, if any.
    pub fn last_sentence(&self) -> Option<&SentenceSpan> {
        self.sentences.last()
    }

    /// Indices of the direct dependency children of the token at `head_idx`.
    pub fn children_of(&self, head_idx: usize) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(i, t)| *i != head_idx && t.head == Some(head_idx))
            .map(|(i, _)| i)
            .collect()
    }
}
