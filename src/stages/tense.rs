//! Past-tense detection and utterance dropping.
//!
//! Analyzes the syntactic root of the last sentence: a VBD root, or a VBD
//! auxiliary child when the root has more than one child, marks the
//! sentence as past tense. Present-tense verb children then get a chance
//! to override the verdict (complex sentences like "i did it and now i
//! regret it"). A past-tense utterance is dropped — the stage returns an
//! empty value of the same shape it received.

use crate::errors::Result;
use crate::nlp::engine::NlpEngine;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;
use crate::types::{Analysis, DepRel, PosTag};

/// Engine-bound stage dropping past-tense utterances.
pub struct SkipPastTenses {
    engine: Box<dyn NlpEngine>,
}

impl SkipPastTenses {
    /// Create the stage with its own engine instance.
    pub fn new(engine: Box<dyn NlpEngine>) -> Self {
        Self { engine }
    }

    fn is_past_tense(&self, analysis: &Analysis) -> bool {
        let Some(sentence) = analysis.last_sentence() else {
            return false;
        };
        let root_idx = sentence.root;
        let Some(root) = analysis.tokens.get(root_idx) else {
            return false;
        };
        if root.dep != DepRel::Root {
            return false;
        }

        let children = analysis.children_of(root_idx);
        let aux_past = children
            .iter()
            .any(|&i| analysis.tokens[i].dep == DepRel::Aux && analysis.tokens[i].tag.is_past());

        if root.tag.is_past() || (aux_past && children.len() > 1) {
            // It may be a complex sentence; check the tenses of the
            // constituent verbs. The last verb child wins.
            let mut is_past = true;
            for &i in &children {
                let child = &analysis.tokens[i];
                if child.pos == PosTag::Verb {
                    is_past = !child.tag.is_present();
                }
            }
            return is_past;
        }

        false
    }
}

impl Stage for SkipPastTenses {
    // Accepts text or tokens and preserves the shape.
    fn input_kind(&self) -> IoKind {
        IoKind::Any
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Any
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let sentence = match &input {
            StageIo::Text(s) => s.clone(),
            StageIo::Tokens(tokens) => tokens.join(" "),
        };

        let analysis = self.engine.analyze(&sentence)?;
        if self.is_past_tense(&analysis) {
            Ok(match input {
                StageIo::Text(_) => StageIo::Text(String::new()),
                StageIo::Tokens(_) => StageIo::Tokens(Vec::new()),
            })
        } else {
            Ok(input)
        }
    }
}
