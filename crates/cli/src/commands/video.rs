use anyhow::Result;

use mediagen_core::VideoRequest;

use crate::cli::{Cli, VideoArgs};

pub async fn run(cli: &Cli, args: &VideoArgs) -> Result<()> {
    let mut request = VideoRequest::new(&args.prompt)
        .with_model(args.model.into())
        .with_ratio(&args.ratio)
        .with_duration_secs(args.duration)
        .with_resolution(&args.resolution)
        .with_fps(&args.fps);

    for path in &args.source {
        request = request.with_source_image(path);
    }
    if let Some(ref url) = args.image_url {
        request = request.with_image_url(url);
    }
    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }
    request.generate_audio = args.audio;
    request.return_last_frame = args.last_frame;
    request.camera_fixed = args.camera_fixed;

    super::execute(cli, request.into()).await
}
