//! The evaluation pipeline: validate, flow, aggregate, extrapolate,
//! classify, judge compliance, score quality.

use crate::classify::{NfpaClass, classify};
use crate::error::EvalResult;
use crate::input::{FlowTestInput, per_outlet_flows};
use crate::quality::{QualityIssue, quality_report};
use crate::settings::EvaluatorSettings;
use hf_core::units::{Pressure, VolumeRate, gpm, psi};
use serde::{Deserialize, Serialize};

/// Derived once per input and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowTestResult {
    pub per_outlet_flow_gpm: Vec<f64>,
    pub total_flow_gpm: f64,
    pub available_fire_flow_gpm: f64,
    pub below_target_residual: bool,
    pub target_residual_psi: f64,
    pub pressure_drop_psi: f64,
    pub nfpa_class: NfpaClass,
    pub meets_nfpa_291: bool,
    pub quality_score: u8,
    pub quality_issues: Vec<QualityIssue>,
}

impl FlowTestResult {
    pub fn total_flow(&self) -> VolumeRate {
        gpm(self.total_flow_gpm)
    }

    pub fn available_fire_flow(&self) -> VolumeRate {
        gpm(self.available_fire_flow_gpm)
    }

    pub fn pressure_drop(&self) -> Pressure {
        psi(self.pressure_drop_psi)
    }
}

/// A validated input passing through classification is compliant exactly when
/// it rated into a class; `FlowTestInput` cannot exist unvalidated.
pub fn evaluate_compliance(nfpa_class: NfpaClass, _input: &FlowTestInput) -> bool {
    nfpa_class.is_classified()
}

/// Stateless evaluator bound to one calibration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluator {
    settings: EvaluatorSettings,
}

impl Evaluator {
    pub fn new(settings: EvaluatorSettings) -> EvalResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &EvaluatorSettings {
        &self.settings
    }

    pub fn evaluate(&self, input: &FlowTestInput) -> EvalResult<FlowTestResult> {
        let s = &self.settings;

        let per_outlet_flow_gpm = per_outlet_flows(input.outlets(), s)?;
        let total_flow_gpm: f64 = per_outlet_flow_gpm.iter().sum();

        let extrapolation = s.extrapolate(
            input.static_pressure_psi(),
            input.residual_pressure_psi(),
            total_flow_gpm,
        )?;

        let nfpa_class = classify(extrapolation.available_fire_flow_gpm);
        let meets_nfpa_291 = evaluate_compliance(nfpa_class, input);
        let quality = quality_report(input, &s.quality);

        Ok(FlowTestResult {
            per_outlet_flow_gpm,
            total_flow_gpm,
            available_fire_flow_gpm: extrapolation.available_fire_flow_gpm,
            below_target_residual: extrapolation.below_target_residual,
            target_residual_psi: s.target_residual_psi,
            pressure_drop_psi: input.pressure_drop_psi(),
            nfpa_class,
            meets_nfpa_291,
            quality_score: quality.score,
            quality_issues: quality.issues,
        })
    }
}

/// Evaluate with the conventional constants.
pub fn evaluate(input: &FlowTestInput) -> EvalResult<FlowTestResult> {
    Evaluator::default().evaluate(input)
}
