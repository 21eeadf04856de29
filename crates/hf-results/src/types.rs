//! Stored result data types.

use hf_flowtest::NfpaClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ResultId = String;

/// Index entry written next to each stored response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultManifest {
    pub result_id: ResultId,
    pub record_id: Uuid,
    pub organization_id: Uuid,
    pub hydrant_id: Uuid,
    pub tested_on: String,
    /// RFC 3339 timestamp of the evaluation.
    pub evaluated_at: String,
    pub evaluator_version: String,
    pub nfpa_class: NfpaClass,
    pub available_fire_flow_gpm: f64,
    pub meets_nfpa_291: bool,
    pub quality_score: u8,
}
