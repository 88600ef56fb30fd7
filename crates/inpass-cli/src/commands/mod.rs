//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod lines;
pub mod process;
pub mod warmup;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use inpass_core::models::config::InpassConfig;
use inpass_core::{ExtractionService, PassportField, PassportRecord, PureOcrEngine};

/// Output format for an extracted record.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing this format to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inpass")
        .join("config.json")
}

/// Load the config from `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InpassConfig> {
    if let Some(path) = config_path {
        return InpassConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to read config file {}", path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return InpassConfig::from_file(&default_path)
            .with_context(|| format!("Failed to read config file {}", default_path.display()));
    }

    Ok(InpassConfig::default())
}

/// Load the OCR engine and wrap it in an extraction service.
pub fn load_service(
    model_dir: Option<&Path>,
    config: InpassConfig,
) -> anyhow::Result<ExtractionService<PureOcrEngine>> {
    let model_dir = model_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.models.model_dir.clone());

    debug!("Loading OCR models from {}", model_dir.display());

    let engine = PureOcrEngine::from_dir(&model_dir, &config.models, config.ocr.clone())
        .with_context(|| {
            format!(
                "Failed to load OCR models from {}.\n\n\
                 Expected {}, {} and {} in that directory (see 'inpass config get models').",
                model_dir.display(),
                config.models.detection_model,
                config.models.recognition_model,
                config.models.dictionary
            )
        })?;

    Ok(ExtractionService::new(engine, config))
}

/// Render a record in the requested format.
pub fn format_record(record: &PassportRecord, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Single-row CSV with one column per field key.
fn format_csv(record: &PassportRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(PassportField::ALL.iter().map(|f| f.key()))?;
    wtr.write_record(record.fields().map(|(_, value)| value.unwrap_or("")))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &PassportRecord) -> String {
    let width = PassportField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (field, value) in record.fields() {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            field.label(),
            value.unwrap_or("-"),
            width = width
        ));
    }
    output
}
