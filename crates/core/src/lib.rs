pub mod client;
pub mod config;
pub mod orchestrator;
pub mod poller;
pub mod request;
pub mod task;
pub mod testing;

pub use client::{ApiError, FetchedPayload, GenerationApi, HttpGenerationClient};
pub use config::{load_config, load_config_from_str, ApiConfig, Config, ConfigError};
pub use orchestrator::{
    derive_extension, GenerationOrchestrator, OrchestratorConfig, OrchestratorError,
};
pub use poller::{PollError, Poller};
pub use request::{
    GenerationRequest, ImageModel, ImageRequest, SubmitRequest, ValidationError, VideoModel,
    VideoRequest,
};
pub use task::{DownloadedArtifact, StatusSnapshot, Task, TaskKind, TaskState};
