//! Subcommand implementations.

pub mod image;
pub mod video;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use mediagen_core::{
    load_config, DownloadedArtifact, GenerationOrchestrator, GenerationRequest,
    HttpGenerationClient,
};

use crate::cli::Cli;

/// Build an orchestrator from config file, environment, and CLI overrides,
/// then run the request and report the written paths.
pub async fn execute(cli: &Cli, request: GenerationRequest) -> Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let api_key = config.api_key(cli.api_key.as_deref())?;

    let client = HttpGenerationClient::new(&config.api, api_key)
        .context("Failed to create API client")?;

    let mut orchestrator_config = config.orchestrator.clone();
    if let Some(ref dir) = cli.output_dir {
        orchestrator_config.output_dir = dir.clone();
    }
    if let Some(secs) = cli.poll_interval {
        orchestrator_config.poll_interval_secs = Some(secs);
    }
    if let Some(secs) = cli.timeout {
        orchestrator_config.timeout_secs = Some(secs);
    }
    let output_dir = orchestrator_config.output_dir.clone();

    let orchestrator = GenerationOrchestrator::new(Arc::new(client), orchestrator_config);
    let artifacts = orchestrator.run(&request).await?;

    report(&artifacts, &output_dir);
    Ok(())
}

fn report(artifacts: &[DownloadedArtifact], output_dir: &std::path::Path) {
    if artifacts.is_empty() {
        info!("Task completed but returned no artifacts");
        return;
    }

    println!(
        "Downloaded {} file(s) to {}:",
        artifacts.len(),
        output_dir.display()
    );
    for artifact in artifacts {
        println!("  {}", artifact.local_path.display());
    }
}
