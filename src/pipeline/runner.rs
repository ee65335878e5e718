//! Pipeline orchestration.
//!
//! A [`Pipeline`] holds an ordered sequence of named stages, fixed at
//! construction. The two entry points compose the stages differently:
//!
//! - [`Pipeline::fit`] **broadcasts**: every stage sees the original,
//!   unmodified training corpus. Stages never see each other's fitted view
//!   of the data.
//! - [`Pipeline::transform`] **chains**: the output of stage *i* is the
//!   input of stage *i+1*.
//!
//! The asymmetry is deliberate and part of the contract.
//!
//! Stage shapes are validated when the pipeline is assembled; a sequence
//! where one stage emits tokens into a text-only consumer is rejected with
//! [`TextNormError::IncompatibleStages`] before any data flows.

use crate::errors::{Result, TextNormError};
use crate::pipeline::io::StageIo;
use crate::pipeline::stage::Stage;

/// An ordered composition of named stages.
pub struct Pipeline {
    stages: Vec<(String, Box<dyn Stage>)>,
}

impl Pipeline {
    /// Assemble a pipeline, validating adjacent stage shapes.
    ///
    /// # Errors
    ///
    /// [`TextNormError::IncompatibleStages`] if stage *i* emits a shape
    /// stage *i+1* does not accept.
    pub fn new(stages: Vec<(String, Box<dyn Stage>)>) -> Result<Self> {
        for pair in stages.windows(2) {
            let (producer_name, producer) = &pair[0];
            let (consumer_name, consumer) = &pair[1];
            let emitted = producer.output_kind();
            let expected = consumer.input_kind();
            if !emitted.feeds(expected) {
                return Err(TextNormError::IncompatibleStages {
                    producer: producer_name.clone(),
                    consumer: consumer_name.clone(),
                    emitted: emitted.name(),
                    expected: expected.name(),
                });
            }
        }
        Ok(Self { stages })
    }

    /// Names of the stages, in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|(name, _)| name.as_str())
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Fit every stage on the original corpus, in order.
    ///
    /// Each stage receives the same unmodified `corpus`/`labels`; any
    /// transformation a stage applies internally to its own corpus view is
    /// discarded before the next stage is fitted. The first error aborts
    /// the remaining stages.
    pub fn fit(&mut self, corpus: &[String], labels: Option<&[String]>) -> Result<&mut Self> {
        for (_, stage) in &mut self.stages {
            stage.fit(corpus, labels)?;
        }
        Ok(self)
    }

    /// Run the chained transform, threading each stage's output into the
    /// next. The first error aborts the remaining stages; no recovery is
    /// attempted.
    pub fn transform(&self, input: impl Into<StageIo>) -> Result<StageIo> {
        let mut value = input.into();
        for (_, stage) in &self.stages {
            value = stage.transform(value)?;
        }
        Ok(value)
    }

    /// Convenience wrapper: run [`Pipeline::transform`] on text and expect
    /// text back (the shape the standard composition produces).
    pub fn normalize(&self, text: &str) -> Result<String> {
        self.transform(text)?.expect_text("pipeline output")
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .finish()
    }
}
