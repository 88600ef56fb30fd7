//! Batch processing command for multiple passport scans.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use inpass_core::service::{content_type_for_path, ExtractResponse, Upload};
use inpass_core::{PassportField, PassportRecord};

use super::{format_record, load_config, load_service, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory (overrides models.model_dir)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    response: Option<ExtractResponse>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Only files the service would accept are picked up.
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let content_type = content_type_for_path(p);
            config
                .upload
                .allowed_content_types
                .iter()
                .any(|t| t == content_type)
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let service = load_service(args.model_dir.as_deref(), config)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = Upload::from_path(&path)
            .map_err(|e| e.to_string())
            .and_then(|upload| service.extract(&upload).map_err(|e| e.detail()));
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                results.push(ProcessResult {
                    path,
                    response: Some(response),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(error_msg) => {
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        response: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.response.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(response) = &result.response {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("passport");
                let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = match args.format {
                    OutputFormat::Json => serde_json::to_string_pretty(response)?,
                    format => format_record(&response.data, format, false)?,
                };

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Columns shown in the summary besides filename, status, timing and error.
const SUMMARY_FIELDS: [PassportField; 6] = PassportField::REQUIRED;

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(SUMMARY_FIELDS.iter().map(|f| f.key()));
    header.extend(["missing_fields", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        wtr.write_record(summary_row(
            filename,
            result.response.as_ref().map(|r| &r.data),
            result.processing_time_ms,
            result.error.as_deref(),
        ))?;
    }

    wtr.flush()?;
    Ok(())
}

fn summary_row(
    filename: String,
    record: Option<&PassportRecord>,
    processing_time_ms: u64,
    error: Option<&str>,
) -> Vec<String> {
    let mut row = vec![filename];

    match record {
        Some(record) => {
            row.push("success".to_string());
            row.extend(
                SUMMARY_FIELDS
                    .iter()
                    .map(|&f| record.get(f).unwrap_or("").to_string()),
            );
            let missing: Vec<&str> = record
                .missing_required_fields()
                .iter()
                .map(|f| f.key())
                .collect();
            row.push(missing.join(";"));
        }
        None => {
            row.push("error".to_string());
            row.extend(SUMMARY_FIELDS.iter().map(|_| String::new()));
            row.push(String::new());
        }
    }

    row.push(processing_time_ms.to_string());
    row.push(error.unwrap_or("").to_string());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_row_success() {
        let mut record = PassportRecord::new(vec![]);
        record.passport_number = Some("A1234567".to_string());
        record.sex = Some("M".to_string());

        let row = summary_row("front.png".to_string(), Some(&record), 12, None);

        assert_eq!(row.len(), 2 + SUMMARY_FIELDS.len() + 3);
        assert_eq!(row[1], "success");
        assert_eq!(row[2], "A1234567");
        assert_eq!(row[8], "surname;given_names;date_of_birth;nationality");
        assert_eq!(row[9], "12");
    }

    #[test]
    fn test_summary_row_error() {
        let row = summary_row("bad.pdf".to_string(), None, 3, Some("Error: PDF has no pages"));

        assert_eq!(row[1], "error");
        assert!(row[2..8].iter().all(String::is_empty));
        assert_eq!(row.last().unwrap(), "Error: PDF has no pages");
    }
}
