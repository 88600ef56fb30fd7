//! Process command - extract passport fields from a single scan.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use inpass_core::service::{ErrorResponse, Upload};

use super::{format_record, load_config, load_service, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory (overrides models.model_dir)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Report missing required fields on stderr
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading OCR models...");
    pb.set_position(10);
    let service = load_service(args.model_dir.as_deref(), config)?;

    pb.set_message("Reading file...");
    pb.set_position(30);
    let upload = Upload::from_path(&args.input)?;

    pb.set_message("Running OCR...");
    pb.set_position(50);
    let response = match service.extract(&upload) {
        Ok(response) => response,
        Err(err) => {
            pb.abandon_with_message("Failed");
            let body = serde_json::to_string(&ErrorResponse::from(&err))?;
            debug!("Error response ({}): {}", err.status_code(), body);
            anyhow::bail!("{}", err.detail());
        }
    };

    pb.finish_with_message("Done");

    if args.validate {
        let issues = response.data.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    // JSON carries the full response envelope; other formats only the record.
    let output = match args.format {
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(&response)?,
        OutputFormat::Json => serde_json::to_string(&response)?,
        format => format_record(&response.data, format, args.pretty)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
