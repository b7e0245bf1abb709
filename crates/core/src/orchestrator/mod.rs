//! Task orchestration.
//!
//! Drives one generation task end to end: validate, submit, poll to a
//! terminal state, then download each result artifact in order.

mod config;
mod ext;
mod runner;
mod types;

pub use config::OrchestratorConfig;
pub use ext::derive_extension;
pub use runner::GenerationOrchestrator;
pub use types::{ArtifactError, OrchestratorError};
