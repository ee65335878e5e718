//! Integration tests for rapid_textnorm

use rapid_textnorm::*;

// ============================================================================
// Test engines
// ============================================================================

/// Engine stub tagging every token as a main verb.
struct AllVerbs {
    config: EngineConfig,
}

impl AllVerbs {
    fn boxed() -> Box<dyn NlpEngine> {
        Box::new(Self {
            config: EngineConfig::new(),
        })
    }
}

impl NlpEngine for AllVerbs {
    fn analyze(&self, text: &str) -> Result<Analysis> {
        Ok(Analysis {
            tokens: text
                .split_whitespace()
                .map(|w| AnalyzedToken {
                    text: w.to_string(),
                    has_trailing_space: false,
                    pos: PosTag::Verb,
                    tag: FineTag::Vbp,
                    dep: DepRel::Root,
                    head: None,
                })
                .collect(),
            sentences: vec![],
            entities: vec![],
        })
    }
    fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn corpus(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Standard composition
// ============================================================================

#[test]
fn test_standard_pipeline_normalizes_sample_utterance() {
    let pipeline = standard_pipeline(None).unwrap();

    // The weekday label is inserted before lowercasing and light
    // punctuation cleaning, which fold it to "dayofweek". That mirrors
    // the reference stage ordering exactly.
    let out = pipeline
        .normalize("It's a beautiful, beautiful friday test")
        .unwrap();
    assert_eq!(out, "it is a beautiful, beautiful dayofweek test");
}

#[test]
fn test_standard_pipeline_strips_urls_and_punctuation() {
    let pipeline = standard_pipeline(None).unwrap();

    let out = pipeline
        .normalize("Visit https://example.com tomorrow!")
        .unwrap();
    assert_eq!(out, "visit tomorrow");
}

#[test]
fn test_standard_pipeline_drops_past_tense_utterance() {
    let pipeline = standard_pipeline(None).unwrap();

    let out = pipeline.normalize("i worked yesterday").unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_standard_pipeline_empty_input() {
    let pipeline = standard_pipeline(None).unwrap();
    assert_eq!(pipeline.normalize("").unwrap(), "");
    assert_eq!(pipeline.normalize("   ").unwrap(), "");
}

#[test]
fn test_standard_pipeline_expands_contractions() {
    let pipeline = standard_pipeline(None).unwrap();

    let out = pipeline.normalize("don't panic").unwrap();
    assert_eq!(out, "do not panic");
}

#[test]
fn test_standard_pipeline_masks_short_tokens() {
    let pipeline = standard_pipeline(None).unwrap();

    // "x" masks to UNK; "i" and "a" survive.
    let out = pipeline.normalize("i x a plan").unwrap();
    assert_eq!(out, "i UNK a plan");
}

// ============================================================================
// Fit / transform through a pipeline
// ============================================================================

#[test]
fn test_preposition_restoration_end_to_end() {
    let preps = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
    let mut pipeline = Pipeline::new(vec![
        ("tokenize".to_string(), Box::new(TokenizeSplit) as Box<dyn Stage>),
        ("omitted_prepositions".to_string(), Box::new(preps) as Box<dyn Stage>),
        ("join".to_string(), Box::new(JoinTokens) as Box<dyn Stage>),
    ])
    .unwrap();

    pipeline
        .fit(
            &corpus(&["i work on monday", "i work on tuesday", "i relax"]),
            None,
        )
        .unwrap();

    assert_eq!(pipeline.normalize("i work").unwrap(), "i work on");
    // No stats for the final token: unchanged.
    assert_eq!(pipeline.normalize("i relax").unwrap(), "i relax");
}

#[test]
fn test_fit_sees_raw_corpus_not_transformed_view() {
    // The tokenize stage precedes the statistical stage, but fit is
    // broadcast: the model still receives raw strings and does its own
    // splitting.
    let preps = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
    let mut pipeline = Pipeline::new(vec![
        ("tokenize".to_string(), Box::new(TokenizeSplit) as Box<dyn Stage>),
        ("omitted_prepositions".to_string(), Box::new(preps) as Box<dyn Stage>),
    ])
    .unwrap();

    pipeline.fit(&corpus(&["we dine at eight"]), None).unwrap();

    let out = pipeline.transform("we dine").unwrap();
    assert_eq!(
        out,
        StageIo::Tokens(vec![
            "we".to_string(),
            "dine".to_string(),
            "at".to_string()
        ])
    );
}

#[test]
fn test_model_persists_across_pipeline_instances() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().to_path_buf();

    let preps = OmittedPrepositions::new(AllVerbs::boxed(), Some(storage.clone())).unwrap();
    let mut pipeline = Pipeline::new(vec![(
        "omitted_prepositions".to_string(),
        Box::new(preps) as Box<dyn Stage>,
    )])
    .unwrap();
    pipeline
        .fit(&corpus(&["i work on monday", "i work on tuesday"]), None)
        .unwrap();
    drop(pipeline);

    // A fresh stage picks the fitted table up from storage.
    let reloaded = OmittedPrepositions::new(AllVerbs::boxed(), Some(storage)).unwrap();
    let work = reloaded.stats_for("work").unwrap();
    assert_eq!(work.total, 2);
    assert_eq!(work.with_on, 2);
}

// ============================================================================
// Assembly validation
// ============================================================================

#[test]
fn test_token_stage_after_text_stage_rejected() {
    let err = Pipeline::new(vec![
        ("tokenize".to_string(), Box::new(TokenizeSplit) as Box<dyn Stage>),
        ("lower".to_string(), Box::new(LowerText) as Box<dyn Stage>),
    ])
    .unwrap_err();

    assert!(matches!(err, TextNormError::IncompatibleStages { .. }));
}

#[test]
fn test_runtime_shape_mismatch_fails_fast() {
    // A single-stage pipeline can still be fed the wrong shape by the
    // caller; the stage reports the contract violation itself.
    let pipeline = Pipeline::new(vec![(
        "join".to_string(),
        Box::new(JoinTokens) as Box<dyn Stage>,
    )])
    .unwrap();

    let err = pipeline.transform("not tokens").unwrap_err();
    assert!(matches!(err, TextNormError::ShapeMismatch { .. }));
}
