//! hf-record: flow-test record format, wire schema and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_record};

use hf_flowtest::EvaluatorSettings;

pub type RecordResult<T> = Result<T, RecordError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] hf_flowtest::FlowTestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> RecordResult<FlowTestRecord> {
    let content = std::fs::read_to_string(path)?;
    let record: FlowTestRecord = serde_yaml::from_str(&content)?;
    validate_record(&record)?;
    Ok(record)
}

pub fn save_yaml(path: &std::path::Path, record: &FlowTestRecord) -> RecordResult<()> {
    validate_record(record)?;
    let content = serde_yaml::to_string(record)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> RecordResult<FlowTestRecord> {
    let content = std::fs::read_to_string(path)?;
    let record: FlowTestRecord = serde_json::from_str(&content)?;
    validate_record(&record)?;
    Ok(record)
}

pub fn save_json(path: &std::path::Path, record: &FlowTestRecord) -> RecordResult<()> {
    validate_record(record)?;
    let content = serde_json::to_string_pretty(record)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load evaluator calibration from YAML. Omitted keys keep their defaults.
pub fn load_settings_yaml(path: &std::path::Path) -> RecordResult<EvaluatorSettings> {
    let content = std::fs::read_to_string(path)?;
    let settings: EvaluatorSettings = serde_yaml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Parse an inbound request body.
pub fn parse_request(json: &str) -> RecordResult<FlowTestRequest> {
    Ok(serde_json::from_str(json)?)
}
