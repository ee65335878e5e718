//! NLP engine contract and the built-in heuristic implementation.
//!
//! - [`engine`] — the [`NlpEngine`] trait, component set, and immutable
//!   per-instance [`EngineConfig`]
//! - [`heuristic`] — a self-contained engine implementing the contract

pub mod engine;
pub mod heuristic;

pub use engine::{Component, EngineConfig, NlpEngine};
pub use heuristic::HeuristicEngine;
