//! Video generation requests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

use super::types::{SubmitRequest, ValidationError};

/// Maximum number of local source images for image-to-video.
const MAX_SOURCE_IMAGES: usize = 2;

/// Minimum video duration in seconds, shared by all models.
const MIN_DURATION_SECS: u32 = 5;

/// Available video generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoModel {
    #[serde(rename = "seedancev1")]
    SeedanceV1,
    #[serde(rename = "seedancev15pro")]
    SeedanceV15Pro,
    #[serde(rename = "seedancev1profast")]
    SeedanceV1ProFast,
    #[serde(rename = "seedancev2")]
    SeedanceV2,
}

impl VideoModel {
    /// Returns the model identifier used in API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoModel::SeedanceV1 => "seedancev1",
            VideoModel::SeedanceV15Pro => "seedancev15pro",
            VideoModel::SeedanceV1ProFast => "seedancev1profast",
            VideoModel::SeedanceV2 => "seedancev2",
        }
    }

    /// Submission endpoint path for this model.
    pub fn endpoint(&self) -> &'static str {
        match self {
            VideoModel::SeedanceV1 => "/v1/video/seedancev1",
            VideoModel::SeedanceV15Pro => "/v1/video/seedancev15pro",
            VideoModel::SeedanceV1ProFast => "/v1/video/seedancev1profast",
            VideoModel::SeedanceV2 => "/v1/video/seedancev2",
        }
    }

    /// Longest clip the model can generate.
    pub fn max_duration_secs(&self) -> u32 {
        match self {
            VideoModel::SeedanceV2 => 15,
            _ => 10,
        }
    }

    /// Audio and last-frame extraction are seedancev2 features.
    pub fn supports_audio(&self) -> bool {
        matches!(self, VideoModel::SeedanceV2)
    }
}

impl Default for VideoModel {
    fn default() -> Self {
        VideoModel::SeedanceV1ProFast
    }
}

/// A video generation request (text-to-video or image-to-video).
#[derive(Debug, Clone)]
pub struct VideoRequest {
    /// Text prompt.
    pub prompt: String,
    /// Model to use.
    pub model: VideoModel,
    /// Aspect ratio, e.g. `9:16` or `16:9`.
    pub ratio: String,
    /// Clip duration in seconds.
    pub duration_secs: u32,
    /// Resolution, e.g. `480p`, `720p`, `1080p`, `1440p`.
    pub resolution: String,
    /// Frame rate.
    pub fps: String,
    /// Local source images for image-to-video (max 2).
    pub source_images: Vec<PathBuf>,
    /// Source image URL for image-to-video. Ignored when local source
    /// images are present.
    pub image_url: Option<String>,
    /// Random seed for reproducibility.
    pub seed: Option<i64>,
    /// Generate audio alongside the video (seedancev2 only).
    pub generate_audio: bool,
    /// Return the last frame as a separate image (seedancev2 only).
    pub return_last_frame: bool,
    /// Keep the camera fixed instead of letting the model move it.
    pub camera_fixed: bool,
}

impl VideoRequest {
    /// Create a request with default model and settings.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: VideoModel::default(),
            ratio: "9:16".to_string(),
            duration_secs: 5,
            resolution: "720p".to_string(),
            fps: "24".to_string(),
            source_images: Vec::new(),
            image_url: None,
            seed: None,
            generate_audio: false,
            return_last_frame: false,
            camera_fixed: false,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: VideoModel) -> Self {
        self.model = model;
        self
    }

    /// Set the aspect ratio.
    pub fn with_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.ratio = ratio.into();
        self
    }

    /// Set the clip duration.
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set the resolution.
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
        self
    }

    /// Set the frame rate.
    pub fn with_fps(mut self, fps: impl Into<String>) -> Self {
        self.fps = fps.into();
        self
    }

    /// Add a local source image.
    pub fn with_source_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_images.push(path.into());
        self
    }

    /// Set the source image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check modality-specific constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        let max = self.model.max_duration_secs();
        if self.duration_secs < MIN_DURATION_SECS || self.duration_secs > max {
            return Err(ValidationError::DurationOutOfRange {
                model: self.model.as_str(),
                min: MIN_DURATION_SECS,
                max,
                got: self.duration_secs,
            });
        }

        if self.source_images.len() > MAX_SOURCE_IMAGES {
            return Err(ValidationError::TooManySourceImages {
                max: MAX_SOURCE_IMAGES,
                got: self.source_images.len(),
            });
        }

        if self.generate_audio && !self.model.supports_audio() {
            return Err(ValidationError::UnsupportedOption {
                option: "generate_audio",
                model: "seedancev2",
            });
        }

        if self.return_last_frame && !self.model.supports_audio() {
            return Err(ValidationError::UnsupportedOption {
                option: "return_last_frame",
                model: "seedancev2",
            });
        }

        Ok(())
    }

    /// Validate and normalize into a [`SubmitRequest`].
    pub fn build(&self) -> Result<SubmitRequest, ValidationError> {
        self.validate()?;

        let mut fields = vec![
            ("prompt", self.prompt.clone()),
            ("ratio", self.ratio.clone()),
            ("duration", self.duration_secs.to_string()),
            ("resolution", self.resolution.clone()),
            ("fps", self.fps.clone()),
        ];

        if let Some(seed) = self.seed {
            fields.push(("seed", seed.to_string()));
        }
        if self.generate_audio {
            fields.push(("generate_audio", "1".to_string()));
        }
        if self.return_last_frame {
            fields.push(("return_last_frame", "1".to_string()));
        }
        if self.camera_fixed {
            fields.push(("camera_fixed", "1".to_string()));
        }

        let image_url = if self.source_images.is_empty() {
            self.image_url.clone()
        } else {
            None
        };

        Ok(SubmitRequest {
            kind: TaskKind::Video,
            endpoint: self.model.endpoint(),
            fields,
            source_images: self.source_images.clone(),
            image_url,
        })
    }
}
