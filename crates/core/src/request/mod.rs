//! Generation request builders.
//!
//! Per-modality request types validate their parameters and normalize into
//! a [`SubmitRequest`] before anything touches the network.

mod image;
mod types;
mod video;

pub use image::{ImageModel, ImageRequest};
pub use types::{GenerationRequest, SubmitRequest, ValidationError};
pub use video::{VideoModel, VideoRequest};
