use anyhow::Result;

use mediagen_core::ImageRequest;

use crate::cli::{Cli, ImageArgs};

pub async fn run(cli: &Cli, args: &ImageArgs) -> Result<()> {
    let mut request = ImageRequest::new(&args.prompt)
        .with_model(args.model.into())
        .with_resolution(&args.resolution);

    for path in &args.source {
        request = request.with_source_image(path);
    }
    if let Some(ref url) = args.image_url {
        request = request.with_image_url(url);
    }

    super::execute(cli, request.into()).await
}
