//! Normalized submission request and validation errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskKind;

use super::{ImageRequest, VideoRequest};

/// Errors raised by request validation, before any network call.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Prompt is empty or whitespace only.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Video duration outside the model's allowed range.
    #[error("duration must be between {min} and {max} seconds for {model}, got {got}")]
    DurationOutOfRange {
        model: &'static str,
        min: u32,
        max: u32,
        got: u32,
    },

    /// Too many local source images supplied.
    #[error("at most {max} source images allowed, got {got}")]
    TooManySourceImages { max: usize, got: usize },

    /// Option not supported by the selected model.
    #[error("{option} is only supported by {model}")]
    UnsupportedOption {
        option: &'static str,
        model: &'static str,
    },
}

/// A validated, normalized submission request.
///
/// `fields` holds the text parts of the multipart form in submission order.
/// When `source_images` is non-empty, `image_url` is always `None`: local
/// images win over a URL, by construction of the builders.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// Modality of the request.
    pub kind: TaskKind,
    /// API path under the base URL, selected by the model.
    pub endpoint: &'static str,
    /// Text form fields, in order.
    pub fields: Vec<(&'static str, String)>,
    /// Local source images attached as `sourceImage` file parts.
    pub source_images: Vec<PathBuf>,
    /// Source image URL, sent as an `imageUrl` text part.
    pub image_url: Option<String>,
}

/// A generation request of either modality.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    Image(ImageRequest),
    Video(VideoRequest),
}

impl GenerationRequest {
    /// Modality of the wrapped request.
    pub fn kind(&self) -> TaskKind {
        match self {
            GenerationRequest::Image(_) => TaskKind::Image,
            GenerationRequest::Video(_) => TaskKind::Video,
        }
    }

    /// Validate and normalize into a [`SubmitRequest`].
    pub fn build(&self) -> Result<SubmitRequest, ValidationError> {
        match self {
            GenerationRequest::Image(request) => request.build(),
            GenerationRequest::Video(request) => request.build(),
        }
    }
}

impl From<ImageRequest> for GenerationRequest {
    fn from(request: ImageRequest) -> Self {
        GenerationRequest::Image(request)
    }
}

impl From<VideoRequest> for GenerationRequest {
    fn from(request: VideoRequest) -> Self {
        GenerationRequest::Video(request)
    }
}
