//! Warmup command - load the OCR models and run a throwaway recognition.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;

use inpass_core::OcrEngine;

use super::{load_config, load_service};

/// Arguments for the warmup command.
#[derive(Args)]
pub struct WarmupArgs {
    /// Model directory (overrides models.model_dir)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: WarmupArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let service = load_service(args.model_dir.as_deref(), config)?;
    let status = service
        .warm_up()
        .map_err(|e| anyhow::anyhow!("{}", e.detail()))?;

    println!("{}", serde_json::to_string(&status)?);
    eprintln!(
        "{} {} ready in {:?}",
        style("✓").green(),
        service.engine().name(),
        start.elapsed()
    );

    Ok(())
}
