//! Evaluator calibration.
//!
//! The defaults are the conventional NFPA 291 / pitot-tube engineering
//! constants. A project with its own calibration data can override them;
//! settings are passed explicitly into every evaluation.

use crate::error::{EvalResult, FlowTestError};
use hf_core::units::constants::STANDARD_RESIDUAL_PSI;
use serde::{Deserialize, Serialize};

/// Circular orifice discharge conversion in US units (gpm from in^2 and psi^0.5).
pub const ORIFICE_CONSTANT: f64 = 29.83;

/// Exponent of the hydrant flow-test extrapolation (Hazen-Williams 1/1.85).
pub const EXTRAPOLATION_EXPONENT: f64 = 0.54;

/// Smooth, well-rounded hydrant outlet.
pub const DEFAULT_DISCHARGE_COEFFICIENT: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorSettings {
    pub target_residual_psi: f64,
    pub orifice_constant: f64,
    pub extrapolation_exponent: f64,
    pub default_discharge_coefficient: f64,
    pub quality: QualityWeights,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            target_residual_psi: STANDARD_RESIDUAL_PSI,
            orifice_constant: ORIFICE_CONSTANT,
            extrapolation_exponent: EXTRAPOLATION_EXPONENT,
            default_discharge_coefficient: DEFAULT_DISCHARGE_COEFFICIENT,
            quality: QualityWeights::default(),
        }
    }
}

/// Deductions applied by quality scoring.
///
/// Penalties are unsigned, so detecting another issue can never raise a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    /// Per outlet whose discharge coefficient is missing or zero.
    pub missing_coefficient: u32,
    /// Once, when fewer than `min_outlets` outlets were flowed.
    pub too_few_outlets: u32,
    /// Once, when static minus residual is under `min_differential_psi`.
    pub low_differential: u32,
    /// Per outlet whose pitot reading is under `min_pitot_psi`.
    pub low_pitot: u32,
    pub min_outlets: usize,
    pub min_differential_psi: f64,
    pub min_pitot_psi: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            missing_coefficient: 10,
            too_few_outlets: 15,
            low_differential: 20,
            low_pitot: 10,
            min_outlets: 2,
            min_differential_psi: 5.0,
            min_pitot_psi: 5.0,
        }
    }
}

impl EvaluatorSettings {
    pub fn validate(&self) -> EvalResult<()> {
        if !self.target_residual_psi.is_finite() || self.target_residual_psi < 0.0 {
            return Err(FlowTestError::InvalidSetting {
                what: "target_residual_psi",
                value: self.target_residual_psi,
                reason: "must be non-negative and finite",
            });
        }
        if !self.orifice_constant.is_finite() || self.orifice_constant <= 0.0 {
            return Err(FlowTestError::InvalidSetting {
                what: "orifice_constant",
                value: self.orifice_constant,
                reason: "must be positive and finite",
            });
        }
        if !self.extrapolation_exponent.is_finite()
            || self.extrapolation_exponent <= 0.0
            || self.extrapolation_exponent > 1.0
        {
            return Err(FlowTestError::InvalidSetting {
                what: "extrapolation_exponent",
                value: self.extrapolation_exponent,
                reason: "must be in (0, 1]",
            });
        }
        if !is_valid_coefficient(self.default_discharge_coefficient) {
            return Err(FlowTestError::InvalidSetting {
                what: "default_discharge_coefficient",
                value: self.default_discharge_coefficient,
                reason: "must be in (0, 1]",
            });
        }
        for (what, value) in [
            ("quality.min_differential_psi", self.quality.min_differential_psi),
            ("quality.min_pitot_psi", self.quality.min_pitot_psi),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FlowTestError::InvalidSetting {
                    what,
                    value,
                    reason: "must be non-negative and finite",
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn is_valid_coefficient(c: f64) -> bool {
    c.is_finite() && c > 0.0 && c <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_conventional_constants() {
        let s = EvaluatorSettings::default();
        assert_eq!(s.target_residual_psi, 20.0);
        assert_eq!(s.orifice_constant, 29.83);
        assert_eq!(s.extrapolation_exponent, 0.54);
        assert_eq!(s.default_discharge_coefficient, 0.9);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_bad_calibration() {
        let s = EvaluatorSettings {
            extrapolation_exponent: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            s.validate(),
            Err(FlowTestError::InvalidSetting {
                what: "extrapolation_exponent",
                ..
            })
        ));

        let s = EvaluatorSettings {
            default_discharge_coefficient: 0.0,
            ..Default::default()
        };
        assert!(s.validate().is_err());

        let s = EvaluatorSettings {
            orifice_constant: f64::NAN,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }
}
