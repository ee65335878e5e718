//! Statistical restoration of omitted prepositions of time.
//!
//! English drops "on"/"at"/"in" in many time expressions ("we met last
//! month", "(on) the day before yesterday"). When an utterance ends in a
//! verb, this stage consults co-occurrence statistics learned from a
//! training corpus and appends the preposition the verb historically
//! favors, if the evidence is strong enough.
//!
//! For every verb the table keeps how often it occurred anywhere in the
//! corpus (`total`) and how often it occurred immediately before each
//! candidate preposition. The decision rule compares
//! `total / best_preposition_count` against a threshold: a low ratio means
//! the verb almost never appears without that preposition, so it is
//! restored.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TextNormError};
use crate::nlp::engine::NlpEngine;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;

/// The candidate prepositions, in tie-breaking order.
pub const PREPOSITIONS: [&str; 3] = ["on", "at", "in"];

/// Default decision threshold; larger values restore more aggressively.
/// Has to be tuned per training dataset.
pub const DEFAULT_THRESHOLD: u32 = 27;

// ============================================================================
// Statistics record
// ============================================================================

/// Per-verb co-occurrence counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepStats {
    /// Occurrences of the verb anywhere in the corpus
    pub total: u32,
    /// Occurrences immediately before "on"
    pub with_on: u32,
    /// Occurrences immediately before "at"
    pub with_at: u32,
    /// Occurrences immediately before "in"
    pub with_in: u32,
}

impl PrepStats {
    /// The three preposition counters, indexed like [`PREPOSITIONS`].
    pub fn counts(&self) -> [u32; 3] {
        [self.with_on, self.with_at, self.with_in]
    }

    fn bump(&mut self, prep_idx: usize) {
        match prep_idx {
            0 => self.with_on += 1,
            1 => self.with_at += 1,
            _ => self.with_in += 1,
        }
    }
}

/// Persisted artifact layout: the stat table plus the threshold it was
/// tuned with. The threshold is stored for inspection but never loaded
/// back — the constructor-configured value always wins.
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    stat: FxHashMap<String, PrepStats>,
    threshold: u32,
}

// ============================================================================
// Stage
// ============================================================================

/// Stateful stage appending an inferred preposition after a final verb.
pub struct OmittedPrepositions {
    name: String,
    storage_path: Option<PathBuf>,
    engine: Box<dyn NlpEngine>,
    preposition_regex: Regex,
    stat: FxHashMap<String, PrepStats>,
    threshold: u32,
}

impl OmittedPrepositions {
    /// Create the stage.
    ///
    /// The engine instance is owned by this stage; historically it runs
    /// with NER and lemmatization disabled, since only the POS tag of a
    /// single token is ever needed.
    ///
    /// If `storage_path` is configured and a persisted artifact exists
    /// there, the stat table is loaded immediately; a configured-but-empty
    /// directory starts with an empty table.
    pub fn new(engine: Box<dyn NlpEngine>, storage_path: Option<PathBuf>) -> Result<Self> {
        // Whole-word occurrence of a candidate preposition anywhere in
        // the string.
        let preposition_regex = Regex::new(r"(^|\s)(on|at|in)(\s|$)")?;
        let mut stage = Self {
            name: "prepositions_of_time".to_string(),
            storage_path,
            engine,
            preposition_regex,
            stat: FxHashMap::default(),
            threshold: DEFAULT_THRESHOLD,
        };
        stage.load_if_present()?;
        Ok(stage)
    }

    /// Override the decision threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// The configured decision threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Learned statistics for a verb, if any.
    pub fn stats_for(&self, verb: &str) -> Option<&PrepStats> {
        self.stat.get(verb)
    }

    /// Number of verbs in the stat table.
    pub fn stat_len(&self) -> usize {
        self.stat.len()
    }

    /// Iterate the learned (verb, stats) entries in unspecified order.
    pub fn iter_stats(&self) -> impl Iterator<Item = (&str, &PrepStats)> {
        self.stat.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn artifact_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.mdl", self.name))
    }

    /// Serialize `{stat, threshold}` to the configured location as a
    /// gzip-compressed binary artifact. No-op without a configured path.
    pub fn save(&self) -> Result<()> {
        let Some(dir) = &self.storage_path else {
            return Ok(());
        };
        let file = File::create(self.artifact_file(dir))?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        let artifact = ModelArtifact {
            stat: self.stat.clone(),
            threshold: self.threshold,
        };
        bincode::serialize_into(&mut encoder, &artifact)?;
        encoder.finish()?;
        Ok(())
    }

    /// Load the persisted artifact, replacing the in-memory stat table.
    ///
    /// No-op without a configured path. A configured path with no artifact
    /// is [`TextNormError::MissingModelArtifact`]; callers that want to
    /// fall back to an empty table use [`OmittedPrepositions::load_if_present`].
    pub fn load(&mut self) -> Result<()> {
        let Some(dir) = &self.storage_path else {
            return Ok(());
        };
        let path = self.artifact_file(dir);
        if !path.exists() {
            return Err(TextNormError::missing_artifact(path.display().to_string()));
        }
        let file = File::open(path)?;
        let decoder = GzDecoder::new(BufReader::new(file));
        let artifact: ModelArtifact = bincode::deserialize_from(decoder)?;
        // The constructor-configured threshold wins over the stored one.
        self.stat = artifact.stat;
        Ok(())
    }

    /// Like [`OmittedPrepositions::load`], but a missing artifact keeps
    /// the current (typically empty) table. Returns whether an artifact
    /// was loaded.
    pub fn load_if_present(&mut self) -> Result<bool> {
        match self.load() {
            Ok(()) => Ok(self.storage_path.is_some()),
            Err(err) if err.is_missing_artifact() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl Stage for OmittedPrepositions {
    fn input_kind(&self) -> IoKind {
        IoKind::Tokens
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Tokens
    }

    /// Rebuild the stat table from a training corpus.
    ///
    /// Pass 1 walks adjacent token pairs of every string containing a
    /// whole-word candidate preposition and counts verb→preposition
    /// co-occurrences. Pass 2 walks the *entire* corpus and counts every
    /// occurrence of each table key into `total`.
    fn fit(&mut self, corpus: &[String], _labels: Option<&[String]>) -> Result<()> {
        self.stat.clear();

        for txt in corpus {
            if !self.preposition_regex.is_match(txt) {
                continue;
            }
            let tokens: Vec<&str> = txt.split_whitespace().collect();
            for pair in tokens.windows(2) {
                let Some(prep_idx) = PREPOSITIONS.iter().position(|p| *p == pair[1]) else {
                    continue;
                };
                self.stat
                    .entry(pair[0].to_string())
                    .or_default()
                    .bump(prep_idx);
            }
        }

        for txt in corpus {
            for token in txt.split_whitespace() {
                if let Some(entry) = self.stat.get_mut(token) {
                    entry.total += 1;
                }
            }
        }

        if self.storage_path.is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Append the historically favored preposition when the final token is
    /// a verb with strong enough evidence.
    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let mut tokens = input.expect_tokens("omitted_prepositions")?;
        let Some(last) = tokens.last() else {
            return Ok(StageIo::Tokens(tokens));
        };

        // The decision is local to the final word of the utterance.
        let analysis = self.engine.analyze(last)?;
        let Some(last_tok) = analysis.last_token() else {
            return Ok(StageIo::Tokens(tokens));
        };
        if !last_tok.pos.is_verb() {
            return Ok(StageIo::Tokens(tokens));
        }
        let Some(stats) = self.stat.get(&last_tok.text) else {
            return Ok(StageIo::Tokens(tokens));
        };

        let counts = stats.counts();
        // Argmax with ties resolved to the lowest index: on < at < in.
        let mut best = 0;
        for i in 1..counts.len() {
            if counts[i] > counts[best] {
                best = i;
            }
        }
        let with_prep = counts[best];
        // Zero-count sentinel: a key whose best counter is zero always
        // satisfies the pass condition.
        let factor = if with_prep > 0 {
            f64::from(stats.total) / f64::from(with_prep)
        } else {
            f64::from(self.threshold)
        };
        if factor <= f64::from(self.threshold) {
            tokens.push(PREPOSITIONS[best].to_string());
        }

        Ok(StageIo::Tokens(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::engine::EngineConfig;
    use crate::types::{Analysis, AnalyzedToken, DepRel, FineTag, PosTag};

    /// Engine stub tagging every token of the input as a main verb.
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

    /// Engine stub tagging everything as a noun.
    struct NoVerbs {
        config: EngineConfig,
    }

    impl NlpEngine for NoVerbs {
        fn analyze(&self, text: &str) -> Result<Analysis> {
            Ok(Analysis {
                tokens: text
                    .split_whitespace()
                    .map(|w| AnalyzedToken::bare(w, false))
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

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_counts_reference_scenario() {
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage
            .fit(
                &corpus(&["i work on monday", "i work on tuesday", "i relax"]),
                None,
            )
            .unwrap();

        let work = stage.stats_for("work").unwrap();
        assert_eq!(
            *work,
            PrepStats {
                total: 2,
                with_on: 2,
                with_at: 0,
                with_in: 0
            }
        );
        // "relax" never precedes a preposition, so it never becomes a key.
        assert!(stage.stats_for("relax").is_none());
    }

    #[test]
    fn test_restores_preposition_for_known_verb() {
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage
            .fit(
                &corpus(&["i work on monday", "i work on tuesday", "i relax"]),
                None,
            )
            .unwrap();

        let out = stage
            .transform(StageIo::Tokens(toks(&["i", "work"])))
            .unwrap();
        assert_eq!(out, StageIo::Tokens(toks(&["i", "work", "on"])));
    }

    #[test]
    fn test_no_evidence_returns_unchanged() {
        let stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        let out = stage
            .transform(StageIo::Tokens(toks(&["i", "improvise"])))
            .unwrap();
        assert_eq!(out, StageIo::Tokens(toks(&["i", "improvise"])));
    }

    #[test]
    fn test_empty_input_returns_unchanged() {
        let stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        let out = stage.transform(StageIo::Tokens(vec![])).unwrap();
        assert_eq!(out, StageIo::Tokens(vec![]));
    }

    #[test]
    fn test_non_verb_last_token_returns_unchanged() {
        let mut stage = OmittedPrepositions::new(
            Box::new(NoVerbs {
                config: EngineConfig::new(),
            }),
            None,
        )
        .unwrap();
        stage.fit(&corpus(&["i work on monday"]), None).unwrap();

        let out = stage
            .transform(StageIo::Tokens(toks(&["i", "work"])))
            .unwrap();
        assert_eq!(out, StageIo::Tokens(toks(&["i", "work"])));
    }

    #[test]
    fn test_tie_resolves_to_on_before_at_before_in() {
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage
            .fit(&corpus(&["we meet at noon", "we meet on monday"]), None)
            .unwrap();

        let meet = stage.stats_for("meet").unwrap();
        assert_eq!(meet.with_on, 1);
        assert_eq!(meet.with_at, 1);

        let out = stage
            .transform(StageIo::Tokens(toks(&["we", "meet"])))
            .unwrap();
        assert_eq!(out, StageIo::Tokens(toks(&["we", "meet", "on"])));
    }

    #[test]
    fn test_weak_evidence_does_not_restore() {
        // "work on" once, 27 further bare occurrences: factor 28/1 > 27.
        let mut lines = vec!["i work on monday".to_string()];
        for _ in 0..27 {
            lines.push("i work hard".to_string());
        }
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage.fit(&lines, None).unwrap();

        assert_eq!(stage.stats_for("work").unwrap().total, 28);
        let out = stage
            .transform(StageIo::Tokens(toks(&["i", "work"])))
            .unwrap();
        assert_eq!(out, StageIo::Tokens(toks(&["i", "work"])));
    }

    #[test]
    fn test_fit_replaces_previous_table() {
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage.fit(&corpus(&["i work on monday"]), None).unwrap();
        assert!(stage.stats_for("work").is_some());

        stage.fit(&corpus(&["we sleep at night"]), None).unwrap();
        assert!(stage.stats_for("work").is_none());
        assert!(stage.stats_for("sleep").is_some());
    }

    #[test]
    fn test_strings_without_preposition_add_no_keys() {
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage.fit(&corpus(&["i relax daily", "nothing here"]), None).unwrap();
        assert_eq!(stage.stat_len(), 0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();

        let mut fitted =
            OmittedPrepositions::new(AllVerbs::boxed(), Some(path.clone())).unwrap();
        fitted
            .fit(&corpus(&["i work on monday", "i work on tuesday"]), None)
            .unwrap();
        fitted.save().unwrap();

        // Fresh instance with a different threshold: the table is loaded
        // from the artifact, the threshold is not.
        let loaded = OmittedPrepositions::new(AllVerbs::boxed(), Some(path))
            .unwrap()
            .with_threshold(99);
        assert_eq!(
            loaded.stats_for("work"),
            fitted.stats_for("work")
        );
        assert_eq!(loaded.threshold(), 99);
    }

    #[test]
    fn test_fit_persists_when_storage_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();

        let mut fitted =
            OmittedPrepositions::new(AllVerbs::boxed(), Some(path.clone())).unwrap();
        fitted.fit(&corpus(&["i work on monday"]), None).unwrap();
        drop(fitted);

        let loaded = OmittedPrepositions::new(AllVerbs::boxed(), Some(path)).unwrap();
        assert!(loaded.stats_for("work").is_some());
    }

    #[test]
    fn test_load_missing_artifact_is_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut stage =
            OmittedPrepositions::new(AllVerbs::boxed(), Some(dir.path().to_path_buf())).unwrap();

        let err = stage.load().unwrap_err();
        assert!(err.is_missing_artifact());

        // The lenient variant keeps the empty table instead.
        assert!(!stage.load_if_present().unwrap());
        assert_eq!(stage.stat_len(), 0);
    }

    #[test]
    fn test_load_without_storage_is_noop() {
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        assert!(stage.load().is_ok());
        assert!(!stage.load_if_present().unwrap());
        assert!(stage.save().is_ok());
    }

    #[test]
    fn test_zero_count_key_always_restores() {
        // A key present in the table with all preposition counters at
        // zero triggers the sentinel factor, which always passes.
        let mut stage = OmittedPrepositions::new(AllVerbs::boxed(), None).unwrap();
        stage.stat.insert(
            "linger".to_string(),
            PrepStats {
                total: 5,
                with_on: 0,
                with_at: 0,
                with_in: 0,
            },
        );

        let out = stage
            .transform(StageIo::Tokens(toks(&["i", "linger"])))
            .unwrap();
        assert_eq!(out, StageIo::Tokens(toks(&["i", "linger", "on"])));
    }
}
