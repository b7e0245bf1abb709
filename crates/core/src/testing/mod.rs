//! Testing utilities and mock implementations.
//!
//! Provides a scriptable mock of the `GenerationApi` trait so poller and
//! orchestrator behavior can be tested without real infrastructure.

mod mock_api;

pub use mock_api::MockGenerationApi;
