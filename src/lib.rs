//! # rapid_textnorm
//!
//! A staged text-normalization pipeline for canonicalizing free-form
//! utterances before matching or classification.
//!
//! The pipeline strips noise (URLs, punctuation, digits), generalizes
//! volatile surface forms (dates, weekdays, months, time references, named
//! entities) into fixed labels, masks low-information tokens, and can
//! restore an omitted preposition after a final verb using co-occurrence
//! statistics learned from a training corpus.
//!
//! ## Design
//!
//! - **Stages** implement [`Stage`]: `fit` (no-op by default) and
//!   `transform` (identity by default), with declared input/output shapes.
//! - **Pipelines** ([`Pipeline`]) compose named stages: `fit` broadcasts
//!   the original corpus to every stage, `transform` chains stage outputs.
//! - **Engine-bound stages** delegate linguistic analysis to an
//!   [`NlpEngine`]; a self-contained [`HeuristicEngine`] ships with the
//!   crate, and each stage owns its own configured instance.
//!
//! ## Example
//!
//! ```
//! use rapid_textnorm::stages::standard_pipeline;
//! use rapid_textnorm::{GeneralizeDayOfWeek, Stage, StageIo};
//!
//! // A single stage is a plain fit/transform unit.
//! let out = GeneralizeDayOfWeek
//!     .transform(StageIo::from("see you on friday"))
//!     .unwrap();
//! assert_eq!(out, StageIo::from("see you on DAY_OF_WEEK"));
//!
//! // The reference composition chains thirteen of them.
//! let pipeline = standard_pipeline(None).unwrap();
//! let out = pipeline.normalize("Visit https://example.com tomorrow!").unwrap();
//! assert_eq!(out, "visit tomorrow");
//! ```

pub mod errors;
pub mod nlp;
pub mod pipeline;
pub mod stages;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TextNormError};
pub use nlp::{Component, EngineConfig, HeuristicEngine, NlpEngine};
pub use pipeline::{IoKind, Pipeline, Stage, StageIo};
pub use stages::{
    standard_pipeline, CleanDigits, CleanPunct, CleanPunctLight, CleanText, CountOfTokens,
    Decontract, Detokenize, GeneralizeDayNumber, GeneralizeDayOfWeek, GeneralizeEntities,
    GeneralizeMonth, GeneralizeTimeOfDay, GeneralizeYear, JoinTokens, LowerText, OmittedPrepositions,
    OneChar, PrepStats, SkipPastTenses, StopWords, TokenizeSplit, DEFAULT_THRESHOLD, PREPOSITIONS,
};
pub use types::{
    Analysis, AnalyzedToken, DepRel, EntitySpan, FineTag, PosTag, SentenceSpan, UNK_LABEL,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
