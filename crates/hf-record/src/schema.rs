//! Record and wire schema definitions.
//!
//! Request/response field names follow the JSON exchanged with the web
//! front end (`pitotPressure`, `qualityScore`, ...) and must stay stable:
//! the report generator reads the response verbatim.

use hf_flowtest::{
    EvalResult, FlowTestInput, FlowTestResult, MarkingColor, NfpaClass, OutletReading, OutletSize,
    QualityIssue,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored flow test for one hydrant of one organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowTestRecord {
    pub version: u32,
    pub id: Uuid,
    pub organization_id: Uuid,
    pub hydrant_id: Uuid,
    /// Calendar date of the test, `YYYY-MM-DD`.
    pub tested_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tested_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub test: FlowTestRequest,
}

impl FlowTestRecord {
    pub fn new(
        organization_id: Uuid,
        hydrant_id: Uuid,
        tested_on: impl Into<String>,
        test: FlowTestRequest,
    ) -> Self {
        Self {
            version: crate::validate::LATEST_VERSION,
            id: Uuid::new_v4(),
            organization_id,
            hydrant_id,
            tested_on: tested_on.into(),
            tested_by: None,
            notes: None,
            test,
        }
    }
}

/// Inbound test body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowTestRequest {
    pub static_pressure_psi: f64,
    pub residual_pressure_psi: f64,
    #[serde(default)]
    pub outlets: Vec<OutletDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OutletDef {
    pub size: OutletSize,
    #[serde(rename = "pitotPressure")]
    pub pitot_pressure: f64,
    /// Absent means "not recorded"; the evaluator default (0.9) applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,
}

impl From<OutletDef> for OutletReading {
    fn from(def: OutletDef) -> Self {
        OutletReading::new(def.size, def.pitot_pressure, def.coefficient)
    }
}

impl From<OutletReading> for OutletDef {
    fn from(r: OutletReading) -> Self {
        Self {
            size: r.size,
            pitot_pressure: r.pitot_pressure_psi,
            coefficient: r.discharge_coefficient,
        }
    }
}

impl FlowTestRequest {
    pub fn readings(&self) -> Vec<OutletReading> {
        self.outlets.iter().copied().map(OutletReading::from).collect()
    }

    pub fn to_input(&self) -> EvalResult<FlowTestInput> {
        FlowTestInput::new(
            self.static_pressure_psi,
            self.residual_pressure_psi,
            self.readings(),
        )
    }
}

impl From<&FlowTestInput> for FlowTestRequest {
    fn from(input: &FlowTestInput) -> Self {
        Self {
            static_pressure_psi: input.static_pressure_psi(),
            residual_pressure_psi: input.residual_pressure_psi(),
            outlets: input.outlets().iter().copied().map(OutletDef::from).collect(),
        }
    }
}

/// Outbound evaluation body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowTestResponse {
    pub total_flow_gpm: f64,
    pub available_fire_flow_gpm: f64,
    pub nfpa_class: NfpaClass,
    pub meets_nfpa_291: bool,
    pub calculations: CalculationsDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationsDef {
    pub results: ResultsDef,
    pub validation: ValidationDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultsDef {
    pub classification: ClassificationDef,
    pub outlet_flows_gpm: Vec<f64>,
    pub target_residual_psi: f64,
    pub pressure_drop_psi: f64,
    #[serde(default)]
    pub below_target_residual: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationDef {
    pub class: NfpaClass,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marking_color: Option<MarkingColor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationDef {
    #[serde(rename = "qualityScore")]
    pub quality_score: u8,
    #[serde(default)]
    pub issues: Vec<QualityIssue>,
}

impl From<&FlowTestResult> for FlowTestResponse {
    fn from(r: &FlowTestResult) -> Self {
        Self {
            total_flow_gpm: r.total_flow_gpm,
            available_fire_flow_gpm: r.available_fire_flow_gpm,
            nfpa_class: r.nfpa_class,
            meets_nfpa_291: r.meets_nfpa_291,
            calculations: CalculationsDef {
                results: ResultsDef {
                    classification: ClassificationDef {
                        class: r.nfpa_class,
                        description: r.nfpa_class.description().to_string(),
                        marking_color: r.nfpa_class.marking_color(),
                    },
                    outlet_flows_gpm: r.per_outlet_flow_gpm.clone(),
                    target_residual_psi: r.target_residual_psi,
                    pressure_drop_psi: r.pressure_drop_psi,
                    below_target_residual: r.below_target_residual,
                },
                validation: ValidationDef {
                    quality_score: r.quality_score,
                    issues: r.quality_issues.clone(),
                },
            },
        }
    }
}
