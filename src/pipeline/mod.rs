//! Staged-pipeline abstraction.
//!
//! ## Submodules
//!
//! - [`io`] — typed values flowing between stages ([`StageIo`], [`IoKind`])
//! - [`stage`] — the [`Stage`] trait every transform plugs into
//! - [`runner`] — the [`Pipeline`] orchestrator (broadcast fit, chained
//!   transform, assembly-time shape validation)

pub mod io;
pub mod runner;
pub mod stage;

pub use io::{IoKind, StageIo};
pub use runner::Pipeline;
pub use stage::Stage;
