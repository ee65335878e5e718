//! Stage trait definition.
//!
//! A stage is the unit of composition: it can learn from a training corpus
//! (`fit`) and rewrite a value (`transform`). Both have defaults — `fit` is
//! a no-op and `transform` is identity — so stateless transforms only
//! override `transform`, and pass-through stages override nothing.

use crate::errors::Result;
use crate::pipeline::io::{IoKind, StageIo};

/// A unit of the normalization pipeline.
///
/// # Contract
///
/// - `fit` receives the *original* training corpus, never another stage's
///   view of it (fit is broadcast across the pipeline, not chained).
/// - `transform` is a pure rewrite of its input except for the statistical
///   stages, which read state populated by `fit`.
/// - `input_kind`/`output_kind` declare the shapes handled; the pipeline
///   validates adjacent stages against them at assembly.
pub trait Stage {
    /// Shape of value this stage accepts.
    fn input_kind(&self) -> IoKind {
        IoKind::Any
    }

    /// Shape of value this stage emits.
    fn output_kind(&self) -> IoKind {
        IoKind::Any
    }

    /// Learn from a training corpus. Default: no-op.
    ///
    /// `labels` carries optional supervision targets aligned with `corpus`;
    /// no built-in stage uses them, but the contract passes them through.
    fn fit(&mut self, corpus: &[String], labels: Option<&[String]>) -> Result<()> {
        let _ = (corpus, labels);
        Ok(())
    }

    /// Rewrite one value. Default: identity.
    fn transform(&self, input: StageIo) -> Result<StageIo> {
        Ok(input)
    }
}
