//! Self-contained heuristic NLP engine.
//!
//! Implements the [`NlpEngine`] contract without any external process or
//! model download: UAX #29 word and sentence segmentation, function-word
//! lists and suffix heuristics for POS tagging, and a naive capitalization
//! based entity guesser.
//!
//! This is intentionally simple — for accurate annotations, wrap a real
//! tagger/parser behind the same trait. The heuristics here are good enough
//! for the deterministic parts of the pipeline and for tests.

use unicode_segmentation::UnicodeSegmentation;

use crate::errors::Result;
use crate::nlp::engine::{Component, EngineConfig, NlpEngine};
use crate::types::{Analysis, AnalyzedToken, DepRel, EntitySpan, FineTag, PosTag, SentenceSpan};

/// A heuristic engine instance with a fixed component configuration.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine {
    config: EngineConfig,
}

impl HeuristicEngine {
    /// Create an engine with every component enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given component configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    fn guess_pos(word: &str) -> PosTag {
        let lower = word.to_lowercase();

        if let Some(pos) = Self::function_word_pos(&lower) {
            return pos;
        }

        if word.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::Numeral;
        }

        // Capitalized word (might be a proper noun or sentence start)
        if word
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
            && word.chars().skip(1).all(|c| c.is_lowercase())
        {
            return PosTag::ProperNoun;
        }

        // Common adjective suffixes
        if lower.ends_with("ful")
            || lower.ends_with("less")
            || lower.ends_with("ous")
            || lower.ends_with("ive")
            || lower.ends_with("able")
            || lower.ends_with("ible")
        {
            return PosTag::Adjective;
        }

        // Common verb suffixes
        if lower.ends_with("ing") || lower.ends_with("ed") || lower.ends_with("ize") {
            return PosTag::Verb;
        }

        if lower.ends_with("ly") {
            return PosTag::Adverb;
        }

        // Default to noun (most content words are nouns)
        PosTag::Noun
    }

    fn function_word_pos(lower: &str) -> Option<PosTag> {
        let pos = match lower {
            "a" | "an" | "the" | "this" | "that" | "these" | "those" | "my" | "your" | "his"
            | "her" | "its" | "our" | "their" | "some" | "any" | "each" | "every" | "no" => {
                PosTag::Determiner
            }
            "and" | "or" | "but" | "nor" | "so" | "yet" | "if" | "because" | "while" | "though"
            | "although" | "when" | "unless" | "until" | "since" => PosTag::Conjunction,
            "of" | "to" | "in" | "for" | "on" | "with" | "at" | "from" | "by" | "about" | "as"
            | "into" | "like" | "through" | "after" | "over" | "between" | "out" | "against"
            | "during" | "without" | "before" | "under" | "around" | "among" => {
                PosTag::Preposition
            }
            "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
            | "myself" | "yourself" | "ourselves" | "themselves" => PosTag::Pronoun,
            "am" | "is" | "are" | "was" | "were" | "be" | "been" | "being" | "do" | "does"
            | "did" | "have" | "has" | "had" | "will" | "would" | "can" | "could" | "shall"
            | "should" | "may" | "might" | "must" => PosTag::Auxiliary,
            "not" | "n't" => PosTag::Particle,
            _ => return None,
        };
        Some(pos)
    }

    fn guess_fine_tag(word: &str, pos: PosTag) -> FineTag {
        if !matches!(pos, PosTag::Verb | PosTag::Auxiliary) {
            return FineTag::Other;
        }
        let lower = word.to_lowercase();
        match lower.as_str() {
            "was" | "were" | "did" | "had" => return FineTag::Vbd,
            "is" | "does" | "has" => return FineTag::Vbz,
            "am" | "are" | "do" | "have" => return FineTag::Vbp,
            "be" => return FineTag::Vb,
            "been" => return FineTag::Vbn,
            "being" => return FineTag::Vbg,
            _ => {}
        }
        if lower.ends_with("ed") {
            FineTag::Vbd
        } else if lower.ends_with("ing") {
            FineTag::Vbg
        } else if lower.ends_with('s') {
            FineTag::Vbz
        } else {
            FineTag::Vbp
        }
    }

    /// Sentence boundaries as byte ranges, skipping whitespace-only segments.
    fn sentence_boundaries(text: &str) -> Vec<(usize, usize)> {
        let mut boundaries = Vec::new();
        let mut start = 0;

        for (idx, _) in text.split_sentence_bound_indices() {
            if idx > start && !text[start..idx].trim().is_empty() {
                boundaries.push((start, idx));
            }
            start = idx;
        }
        if start < text.len() && !text[start..].trim().is_empty() {
            boundaries.push((start, text.len()));
        }
        if boundaries.is_empty() && !text.trim().is_empty() {
            boundaries.push((0, text.len()));
        }

        boundaries
    }

    /// Naive entity guesser: runs of capitalized words (sentence-initial
    /// single words excluded) become `PERSON` spans, digit-only tokens
    /// become `CARDINAL` spans.
    fn guess_entities(
        text: &str,
        token_offsets: &[(usize, usize)],
        tokens: &[AnalyzedToken],
        sentence_starts: &[usize],
    ) -> Vec<EntitySpan> {
        let mut entities = Vec::new();
        let mut i = 0;

        while i < token_offsets.len() {
            let (start, end) = token_offsets[i];
            let word = &text[start..end];

            if word.chars().all(|c| c.is_ascii_digit()) && !word.is_empty() {
                entities.push(EntitySpan {
                    start_char: start,
                    end_char: end,
                    label: "CARDINAL".to_string(),
                });
                i += 1;
                continue;
            }

            let capitalized = word
                .chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false);
            if capitalized && tokens[i].pos == PosTag::ProperNoun {
                let run_start = i;
                let mut run_end = i + 1;
                while run_end < token_offsets.len() {
                    let (s, e) = token_offsets[run_end];
                    let w = &text[s..e];
                    let cap = w.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
                    if cap && tokens[run_end].pos == PosTag::ProperNoun {
                        run_end += 1;
                    } else {
                        break;
                    }
                }
                // A lone capitalized word at a sentence start is usually
                // just capitalization, not a name.
                let lone_sentence_initial =
                    run_end - run_start == 1 && sentence_starts.contains(&run_start);
                if !lone_sentence_initial {
                    entities.push(EntitySpan {
                        start_char: token_offsets[run_start].0,
                        end_char: token_offsets[run_end - 1].1,
                        label: "PERSON".to_string(),
                    });
                }
                i = run_end;
                continue;
            }

            i += 1;
        }

        entities
    }
}

impl NlpEngine for HeuristicEngine {
    fn analyze(&self, text: &str) -> Result<Analysis> {
        let tag_enabled = !self.config.is_disabled(Component::Tagger);
        let parse_enabled = !self.config.is_disabled(Component::Parser);
        let ner_enabled = !self.config.is_disabled(Component::Ner);

        let mut tokens = Vec::new();
        let mut token_offsets = Vec::new();
        let mut sentences = Vec::new();

        for (sent_start, sent_end) in Self::sentence_boundaries(text) {
            let sent_text = &text[sent_start..sent_end];
            let first_token = tokens.len();

            for (word_start, word) in sent_text.unicode_word_indices() {
                if !word.chars().any(|c| c.is_alphanumeric()) {
                    continue;
                }
                let abs_start = sent_start + word_start;
                let abs_end = abs_start + word.len();

                let pos = if tag_enabled {
                    Self::guess_pos(word)
                } else {
                    PosTag::Other
                };
                let tag = if tag_enabled {
                    Self::guess_fine_tag(word, pos)
                } else {
                    FineTag::Other
                };
                let has_trailing_space = text[abs_end..]
                    .chars()
                    .next()
                    .map(|c| c.is_whitespace())
                    .unwrap_or(false);

                tokens.push(AnalyzedToken {
                    text: word.to_string(),
                    has_trailing_space,
                    pos,
                    tag,
                    dep: DepRel::Other,
                    head: None,
                });
                token_offsets.push((abs_start, abs_end));
            }

            let end_token = tokens.len();
            if end_token > first_token {
                // Root: first main verb of the sentence, else first token.
                let root = (first_token..end_token)
                    .find(|&i| tokens[i].pos == PosTag::Verb)
                    .unwrap_or(first_token);
                sentences.push(SentenceSpan {
                    start_token: first_token,
                    end_token,
                    root,
                });
            }
        }

        if parse_enabled {
            for sentence in &sentences {
                for i in sentence.start_token..sentence.end_token {
                    if i == sentence.root {
                        tokens[i].dep = DepRel::Root;
                        tokens[i].head = Some(sentence.root);
                    } else {
                        tokens[i].dep = if tokens[i].pos == PosTag::Auxiliary {
                            DepRel::Aux
                        } else {
                            DepRel::Other
                        };
                        tokens[i].head = Some(sentence.root);
                    }
                }
            }
        }

        let entities = if ner_enabled {
            let sentence_starts: Vec<usize> = sentences.iter().map(|s| s.start_token).collect();
            Self::guess_entities(text, &token_offsets, &tokens, &sentence_starts)
        } else {
            Vec::new()
        };

        Ok(Analysis {
            tokens,
            sentences,
            entities,
        })
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_analysis() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("Hello world. This is a test.").unwrap();

        assert_eq!(analysis.sentences.len(), 2);
        assert!(analysis.tokens.len() >= 6);
    }

    #[test]
    fn test_empty_input() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("").unwrap();

        assert!(analysis.tokens.is_empty());
        assert!(analysis.sentences.is_empty());
        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn test_trailing_space_flags() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("hello world").unwrap();

        assert!(analysis.tokens[0].has_trailing_space);
        assert!(!analysis.tokens[1].has_trailing_space);
    }

    #[test]
    fn test_past_tense_tagging() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("she worked yesterday").unwrap();

        let worked = analysis
            .tokens
            .iter()
            .find(|t| t.text == "worked")
            .unwrap();
        assert_eq!(worked.pos, PosTag::Verb);
        assert_eq!(worked.tag, FineTag::Vbd);
    }

    #[test]
    fn test_root_is_first_verb() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("the dog walked home").unwrap();

        let sent = analysis.last_sentence().unwrap();
        assert_eq!(analysis.tokens[sent.root].text, "walked");
        assert_eq!(analysis.tokens[sent.root].dep, DepRel::Root);
    }

    #[test]
    fn test_multiword_name_becomes_entity() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("i saw John Smith at the station").unwrap();

        assert_eq!(analysis.entities.len(), 1);
        let ent = &analysis.entities[0];
        assert_eq!(ent.label, "PERSON");
        assert_eq!(&"i saw John Smith at the station"[ent.start_char..ent.end_char], "John Smith");
    }

    #[test]
    fn test_lone_sentence_initial_capital_is_not_entity() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("Hello there").unwrap();

        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn test_cardinal_entity() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("call me at 5").unwrap();

        assert!(analysis
            .entities
            .iter()
            .any(|e| e.label == "CARDINAL"));
    }

    #[test]
    fn test_disabled_ner_yields_no_entities() {
        let cfg = EngineConfig::new().disable("ner").unwrap();
        let engine = HeuristicEngine::with_config(cfg);
        let analysis = engine.analyze("i saw John Smith").unwrap();

        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn test_disabled_tagger_yields_other_tags() {
        let cfg = EngineConfig::new().disable("tagger").unwrap();
        let engine = HeuristicEngine::with_config(cfg);
        let analysis = engine.analyze("she worked").unwrap();

        assert!(analysis
            .tokens
            .iter()
            .all(|t| t.pos == PosTag::Other && t.tag == FineTag::Other));
    }

    #[test]
    fn test_disabled_parser_yields_no_heads() {
        let cfg = EngineConfig::new().disable("parser").unwrap();
        let engine = HeuristicEngine::with_config(cfg);
        let analysis = engine.analyze("she worked").unwrap();

        assert!(analysis.tokens.iter().all(|t| t.head.is_none()));
    }
}
