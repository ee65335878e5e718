//! External NLP engine contract.
//!
//! Stages that need linguistic analysis (entity generalization, tense
//! detection, preposition restoration) do not compute it themselves; they
//! delegate to an engine implementing [`NlpEngine`]. The crate ships a
//! self-contained [`HeuristicEngine`](crate::nlp::heuristic::HeuristicEngine);
//! production deployments can wrap a real tagger/parser behind the same
//! trait.
//!
//! Engine configuration is an immutable value ([`EngineConfig`]) fixed when
//! the engine is built. Each delegating stage owns its own engine instance
//! with its own component set; no configuration is ever mutated in place or
//! shared between stages.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, TextNormError};
use crate::types::Analysis;

// ============================================================================
// Components
// ============================================================================

/// A named internal engine component that can be disabled per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Component {
    /// Named-entity recognition
    Ner,
    /// Coarse and fine part-of-speech tagging
    Tagger,
    /// Dependency parsing (heads, relations, sentence roots)
    Parser,
    /// Lemmatization
    Lemmatizer,
}

impl Component {
    /// Canonical lowercase name, matching what [`FromStr`] accepts.
    pub fn name(self) -> &'static str {
        match self {
            Component::Ner => "ner",
            Component::Tagger => "tagger",
            Component::Parser => "parser",
            Component::Lemmatizer => "lemmatizer",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = TextNormError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ner" => Ok(Component::Ner),
            "tagger" => Ok(Component::Tagger),
            "parser" => Ok(Component::Parser),
            "lemmatizer" => Ok(Component::Lemmatizer),
            other => Err(TextNormError::invalid_config(format!(
                "unknown engine component '{other}' (expected one of: ner, tagger, parser, lemmatizer)"
            ))),
        }
    }
}

// ============================================================================
// Engine configuration
// ============================================================================

/// Immutable per-instance engine configuration.
///
/// Lists the components disabled for the owning engine instance. Built once
/// with the builder-style [`EngineConfig::disable`] calls and then handed to
/// the engine constructor; unknown component names fail immediately.
///
/// # Examples
///
/// ```
/// use rapid_textnorm::nlp::EngineConfig;
///
/// let cfg = EngineConfig::new()
///     .disable("ner")
///     .and_then(|c| c.disable("lemmatizer"))
///     .unwrap();
/// assert!(cfg.is_disabled_name("ner"));
/// assert!(!cfg.is_disabled_name("parser"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    disabled: BTreeSet<Component>,
}

impl EngineConfig {
    /// Configuration with every component enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable a component by name. Unknown names are a fatal
    /// configuration error.
    pub fn disable(mut self, name: &str) -> Result<Self> {
        let component: Component = name.parse()?;
        self.disabled.insert(component);
        Ok(self)
    }

    /// Disable a component by value (infallible).
    pub fn disable_component(mut self, component: Component) -> Self {
        self.disabled.insert(component);
        self
    }

    /// Whether a component is disabled.
    pub fn is_disabled(&self, component: Component) -> bool {
        self.disabled.contains(&component)
    }

    /// Whether a component is disabled, by canonical name. Unknown names
    /// report `false`.
    pub fn is_disabled_name(&self, name: &str) -> bool {
        name.parse::<Component>()
            .map(|c| self.is_disabled(c))
            .unwrap_or(false)
    }
}

// ============================================================================
// Engine trait
// ============================================================================

/// Contract for the external NLP engine.
///
/// Given a string, an engine produces tokens (text, trailing-whitespace flag,
/// POS and fine tags, dependency relation and head link), sentence spans with
/// their syntactic roots, and named-entity spans with byte offsets — see
/// [`Analysis`].
///
/// An engine instance is configured once at construction; components that
/// were disabled must yield neutral annotations (no entities, `Other` tags,
/// no head links) rather than erroring.
pub trait NlpEngine {
    /// Analyze one input string.
    fn analyze(&self, text: &str) -> Result<Analysis>;

    /// The configuration this instance was built with.
    fn config(&self) -> &EngineConfig;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_round_trip() {
        for c in [
            Component::Ner,
            Component::Tagger,
            Component::Parser,
            Component::Lemmatizer,
        ] {
            assert_eq!(c.name().parse::<Component>().unwrap(), c);
        }
    }

    #[test]
    fn test_unknown_component_is_fatal() {
        let err = EngineConfig::new().disable("entity_ruler").unwrap_err();
        assert!(matches!(err, TextNormError::InvalidConfig { .. }));
        assert!(err.to_string().contains("entity_ruler"));
    }

    #[test]
    fn test_disable_accumulates() {
        let cfg = EngineConfig::new()
            .disable("ner")
            .and_then(|c| c.disable("parser"))
            .unwrap();
        assert!(cfg.is_disabled(Component::Ner));
        assert!(cfg.is_disabled(Component::Parser));
        assert!(!cfg.is_disabled(Component::Tagger));
    }

    #[test]
    fn test_is_disabled_name_unknown_is_false() {
        let cfg = EngineConfig::new();
        assert!(!cfg.is_disabled_name("frobnicator"));
    }
}
