//! The built-in stage family.
//!
//! ## Submodules
//!
//! - [`clean`] — URL removal, case folding, punctuation/digit stripping
//! - [`generalize`] — day/year/weekday/month/time-of-day label substitution
//! - [`decontract`] — contraction expansion
//! - [`tokens`] — tokenizing, joining, masking, length gating
//! - [`entities`] — named-entity generalization (engine-bound)
//! - [`tense`] — past-tense utterance dropping (engine-bound)
//! - [`prepositions`] — the statistical omitted-preposition model

pub mod clean;
pub mod decontract;
pub mod entities;
pub mod generalize;
pub mod prepositions;
pub mod tense;
pub mod tokens;

pub use clean::{CleanDigits, CleanPunct, CleanPunctLight, CleanText, LowerText};
pub use decontract::Decontract;
pub use entities::GeneralizeEntities;
pub use generalize::{
    GeneralizeDayNumber, GeneralizeDayOfWeek, GeneralizeMonth, GeneralizeTimeOfDay,
    GeneralizeYear,
};
pub use prepositions::{OmittedPrepositions, PrepStats, DEFAULT_THRESHOLD, PREPOSITIONS};
pub use tense::SkipPastTenses;
pub use tokens::{CountOfTokens, Detokenize, JoinTokens, OneChar, StopWords, TokenizeSplit};

use std::path::PathBuf;

use crate::errors::Result;
use crate::nlp::engine::EngineConfig;
use crate::nlp::heuristic::HeuristicEngine;
use crate::pipeline::runner::Pipeline;
use crate::pipeline::stage::Stage;

/// The reference utterance-normalization composition.
///
/// Raw string → clean → generalize-weekday → lowercase → decontract →
/// clean-punctuation (light) → generalize-entities (`CARDINAL` kept) →
/// clean-digits → tokenize → mask-stopwords → mask-short-tokens →
/// infer-omitted-preposition → skip-past-tenses → join.
///
/// Each engine-bound stage gets its own [`HeuristicEngine`] instance with
/// the component set it needs; configurations are never shared.
///
/// Note: the weekday stage deliberately runs before lowercasing, so
/// capitalized weekdays ("Friday") pass through unlabeled. This mirrors
/// the reference ordering.
pub fn standard_pipeline(storage_path: Option<PathBuf>) -> Result<Pipeline> {
    let ents_engine = HeuristicEngine::with_config(EngineConfig::new().disable("lemmatizer")?);
    let preps_engine = HeuristicEngine::with_config(
        EngineConfig::new().disable("ner")?.disable("lemmatizer")?,
    );
    let tense_engine = HeuristicEngine::with_config(
        EngineConfig::new().disable("ner")?.disable("lemmatizer")?,
    );

    let stages: Vec<(String, Box<dyn Stage>)> = vec![
        ("clean_text".to_string(), Box::new(CleanText::new()?)),
        ("generalize_dow".to_string(), Box::new(GeneralizeDayOfWeek)),
        ("lower_text".to_string(), Box::new(LowerText)),
        ("decontract".to_string(), Box::new(Decontract)),
        ("clean_punct".to_string(), Box::new(CleanPunctLight)),
        (
            "generalize".to_string(),
            Box::new(GeneralizeEntities::new(
                Box::new(ents_engine),
                ["CARDINAL"],
            )),
        ),
        ("clean_digits".to_string(), Box::new(CleanDigits)),
        ("tokenize".to_string(), Box::new(TokenizeSplit)),
        ("stop_words".to_string(), Box::new(StopWords::new())),
        ("strip_one_chars".to_string(), Box::new(OneChar)),
        (
            "omitted_prepositions".to_string(),
            Box::new(OmittedPrepositions::new(
                Box::new(preps_engine),
                storage_path,
            )?),
        ),
        (
            "skip_past_tenses".to_string(),
            Box::new(SkipPastTenses::new(Box::new(tense_engine))),
        ),
        ("tokens_to_string".to_string(), Box::new(JoinTokens)),
    ];

    Pipeline::new(stages)
}
