//! Image generation requests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

use super::types::{SubmitRequest, ValidationError};

/// Available image generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageModel {
    #[serde(rename = "seedreamv4")]
    SeedreamV4,
    #[serde(rename = "seedreamv45")]
    SeedreamV45,
    ZImage,
}

impl ImageModel {
    /// Returns the model identifier used in API paths and fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::SeedreamV4 => "seedreamv4",
            ImageModel::SeedreamV45 => "seedreamv45",
            ImageModel::ZImage => "zimage",
        }
    }

    /// Submission endpoint path for this model.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ImageModel::SeedreamV4 => "/v1/images/seedreamv4",
            ImageModel::SeedreamV45 => "/v1/images/seedreamv45",
            ImageModel::ZImage => "/v1/images/zimage",
        }
    }
}

impl Default for ImageModel {
    fn default() -> Self {
        ImageModel::SeedreamV4
    }
}

/// An image generation request (text-to-image or image-to-image).
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Text prompt.
    pub prompt: String,
    /// Model to use.
    pub model: ImageModel,
    /// Aspect ratio (`16:9`), level (`2K`, `4K`), or explicit `WxH`.
    pub resolution: String,
    /// Local source images for image-to-image.
    pub source_images: Vec<PathBuf>,
    /// Source image URL for image-to-image. Ignored when local source
    /// images are present.
    pub image_url: Option<String>,
}

impl ImageRequest {
    /// Create a request with default model and resolution.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: ImageModel::default(),
            resolution: "2K".to_string(),
            source_images: Vec::new(),
            image_url: None,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    /// Set the resolution.
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
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

    /// Check modality-specific constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        Ok(())
    }

    /// Validate and normalize into a [`SubmitRequest`].
    pub fn build(&self) -> Result<SubmitRequest, ValidationError> {
        self.validate()?;

        let mut fields = vec![
            ("prompt", self.prompt.clone()),
            ("resolution", self.resolution.clone()),
        ];

        match self.model {
            // The seedream endpoints distinguish model revisions by category.
            ImageModel::SeedreamV4 | ImageModel::SeedreamV45 => {
                fields.push(("category", self.model.as_str().to_string()));
            }
            // zimage runs server-side prompt expansion.
            ImageModel::ZImage => {
                fields.push(("prompt_extend", "1".to_string()));
            }
        }

        let image_url = if self.source_images.is_empty() {
            self.image_url.clone()
        } else {
            None
        };

        Ok(SubmitRequest {
            kind: TaskKind::Image,
            endpoint: self.model.endpoint(),
            fields,
            source_images: self.source_images.clone(),
            image_url,
        })
    }
}
