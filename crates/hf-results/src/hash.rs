//! Content-based hashing for result IDs.

use hf_flowtest::EvaluatorSettings;
use hf_record::FlowTestRecord;
use sha2::{Digest, Sha256};

/// Same record content + same calibration + same evaluator version = same ID,
/// so re-evaluating an unchanged test can be served from the store.
pub fn compute_result_id(
    record: &FlowTestRecord,
    settings: &EvaluatorSettings,
    evaluator_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(record.organization_id.as_bytes());
    hasher.update(record.hydrant_id.as_bytes());
    hasher.update(record.tested_on.as_bytes());

    let test_json = serde_json::to_string(&record.test).unwrap_or_default();
    hasher.update(test_json.as_bytes());

    let settings_json = serde_json::to_string(settings).unwrap_or_default();
    hasher.update(settings_json.as_bytes());

    hasher.update(evaluator_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
