//! Lines command - run the field extractor on recognized text lines.
//!
//! No OCR models are involved, which makes this the quickest way to check
//! extraction against text from another OCR tool.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use inpass_core::PassportParser;

use super::{format_record, load_config, OutputFormat};

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// Text file with one OCR line per line, or `-` for stdin
    #[arg(required = true)]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print extraction warnings on stderr
    #[arg(long)]
    warnings: bool,
}

pub async fn run(args: LinesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = PathBuf::from(&args.input);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let lines: Vec<&str> = text.lines().collect();
    info!("Extracting from {} lines", lines.len());

    let result = PassportParser::from_config(&config.extraction).parse(&lines);

    if args.warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    println!("{}", format_record(&result.record, args.format, args.pretty)?);

    Ok(())
}
