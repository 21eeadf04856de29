//! Record loading, saving and validation.

use std::path::Path;

use hf_flowtest::EvaluatorSettings;
use hf_record::FlowTestRecord;
use tracing::debug;

use crate::error::{AppError, AppResult};

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> AppResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a record from a `.yaml`/`.yml` or `.json` file. The record is
/// validated on load.
pub fn load_record(path: &Path) -> AppResult<FlowTestRecord> {
    if !path.exists() {
        return Err(AppError::RecordFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    let record = match format_of(path)? {
        Format::Yaml => hf_record::load_yaml(path)?,
        Format::Json => hf_record::load_json(path)?,
    };
    debug!(path = %path.display(), record_id = %record.id, "loaded flow test record");
    Ok(record)
}

pub fn save_record(path: &Path, record: &FlowTestRecord) -> AppResult<()> {
    match format_of(path)? {
        Format::Yaml => hf_record::save_yaml(path, record)?,
        Format::Json => hf_record::save_json(path, record)?,
    }
    Ok(())
}

pub fn validate_record(record: &FlowTestRecord) -> AppResult<()> {
    hf_record::validate_record(record)?;
    Ok(())
}

/// Calibration from a YAML file, or the conventional defaults. The file is
/// deployment configuration, so any failure here is a server-side error.
pub fn load_settings(path: Option<&Path>) -> AppResult<EvaluatorSettings> {
    match path {
        Some(p) => hf_record::load_settings_yaml(p).map_err(|e| {
            AppError::Record(format!("Invalid settings file {}: {}", p.display(), e))
        }),
        None => Ok(EvaluatorSettings::default()),
    }
}
