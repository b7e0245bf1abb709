//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mediagen_core::{ImageModel, VideoModel};

/// Generate images and videos through the TensorsLab API.
#[derive(Debug, Parser)]
#[command(name = "mediagen", version, about)]
pub struct Cli {
    /// Path to a TOML config file (default: mediagen.toml if present).
    #[arg(long, global = true, env = "MEDIAGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// API key. Overrides the config file and MEDIAGEN_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Directory for downloaded artifacts.
    #[arg(long, short = 'o', global = true)]
    pub output_dir: Option<PathBuf>,

    /// Seconds between status polls (default: 5 for images, 10 for video).
    #[arg(long, global = true)]
    pub poll_interval: Option<u64>,

    /// Maximum seconds to wait for completion (default: 300 for images,
    /// 1800 for video).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging.
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an image from a text prompt.
    Image(ImageArgs),
    /// Generate a video from a text prompt.
    Video(VideoArgs),
}

#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Text prompt for image generation.
    pub prompt: String,

    /// Model to use.
    #[arg(long, short = 'm', value_enum, default_value_t = ImageModelArg::Seedreamv4)]
    pub model: ImageModelArg,

    /// Resolution: aspect ratio (16:9), level (2K, 4K), or WxH.
    #[arg(long, short = 'r', default_value = "2K")]
    pub resolution: String,

    /// Local source image for image-to-image (repeatable).
    #[arg(long, short = 's')]
    pub source: Vec<PathBuf>,

    /// Source image URL for image-to-image.
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct VideoArgs {
    /// Text prompt for video generation.
    pub prompt: String,

    /// Model to use.
    #[arg(long, short = 'm', value_enum, default_value_t = VideoModelArg::Seedancev1profast)]
    pub model: VideoModelArg,

    /// Aspect ratio.
    #[arg(long, short = 'r', default_value = "9:16")]
    pub ratio: String,

    /// Clip duration in seconds (5-10, or up to 15 for seedancev2).
    #[arg(long, short = 'd', default_value_t = 5)]
    pub duration: u32,

    /// Resolution (480p, 720p, 1080p, 1440p).
    #[arg(long, default_value = "720p")]
    pub resolution: String,

    /// Frame rate.
    #[arg(long, short = 'f', default_value = "24")]
    pub fps: String,

    /// Local source image for image-to-video (repeatable, max 2).
    #[arg(long, short = 's')]
    pub source: Vec<PathBuf>,

    /// Source image URL for image-to-video.
    #[arg(long)]
    pub image_url: Option<String>,

    /// Random seed for reproducibility.
    #[arg(long)]
    pub seed: Option<i64>,

    /// Generate audio with the video (seedancev2 only).
    #[arg(long)]
    pub audio: bool,

    /// Return the last frame as an image (seedancev2 only).
    #[arg(long)]
    pub last_frame: bool,

    /// Keep the camera fixed.
    #[arg(long)]
    pub camera_fixed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageModelArg {
    Seedreamv4,
    Seedreamv45,
    Zimage,
}

impl From<ImageModelArg> for ImageModel {
    fn from(arg: ImageModelArg) -> Self {
        match arg {
            ImageModelArg::Seedreamv4 => ImageModel::SeedreamV4,
            ImageModelArg::Seedreamv45 => ImageModel::SeedreamV45,
            ImageModelArg::Zimage => ImageModel::ZImage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VideoModelArg {
    Seedancev1,
    Seedancev15pro,
    Seedancev1profast,
    Seedancev2,
}

impl From<VideoModelArg> for VideoModel {
    fn from(arg: VideoModelArg) -> Self {
        match arg {
            VideoModelArg::Seedancev1 => VideoModel::SeedanceV1,
            VideoModelArg::Seedancev15pro => VideoModel::SeedanceV15Pro,
            VideoModelArg::Seedancev1profast => VideoModel::SeedanceV1ProFast,
            VideoModelArg::Seedancev2 => VideoModel::SeedanceV2,
        }
    }
}
