//! Named-entity generalization.
//!
//! Replaces each entity span reported by the NLP engine with its label
//! (`PERSON`, `GPE`, `DATE`, ...), so the downstream matcher sees one
//! canonical token per entity class. Labels in the caller-supplied ignore
//! set keep their original text.

use crate::errors::Result;
use crate::nlp::engine::NlpEngine;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;

/// Engine-bound stage substituting entity labels for entity text.
pub struct GeneralizeEntities {
    engine: Box<dyn NlpEngine>,
    ignore_ents: Vec<String>,
}

impl GeneralizeEntities {
    /// Create the stage with its own engine instance and a set of entity
    /// labels to leave untouched.
    pub fn new(
        engine: Box<dyn NlpEngine>,
        ignore_ents: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            engine,
            ignore_ents: ignore_ents.into_iter().map(Into::into).collect(),
        }
    }
}

impl Stage for GeneralizeEntities {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let mut text = input.expect_text("generalize_entities")?;
        let analysis = self.engine.analyze(&text)?;

        // Rewrite right-to-left so earlier span offsets stay valid.
        for ent in analysis.entities.iter().rev() {
            if self.ignore_ents.iter().any(|l| l == &ent.label) {
                continue;
            }
            if ent.start_char <= ent.end_char && ent.end_char <= text.len() {
                text.replace_range(ent.start_char..ent.end_char, &ent.label);
            }
        }

        Ok(StageIo::Text(text))
    }
}
