//! Outlet readings and pitot-tube discharge.

use crate::error::{EvalResult, FlowTestError};
use crate::settings::{EvaluatorSettings, is_valid_coefficient};
use hf_core::numeric::ensure_non_negative;
use serde::{Deserialize, Serialize};

/// Nominal outlet diameter.
///
/// The three standard hydrant nozzles get their own variants; anything else
/// is carried as a free diameter in inches. On the wire this is a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum OutletSize {
    /// 1-1/2 in. auxiliary outlet
    Small,
    /// 2-1/2 in. hose outlet
    Hose,
    /// 4-1/2 in. pumper (steamer) outlet
    Pumper,
    Other(f64),
}

impl OutletSize {
    pub fn inches(self) -> f64 {
        match self {
            OutletSize::Small => 1.5,
            OutletSize::Hose => 2.5,
            OutletSize::Pumper => 4.5,
            OutletSize::Other(d) => d,
        }
    }
}

impl From<f64> for OutletSize {
    fn from(d: f64) -> Self {
        if d == 1.5 {
            OutletSize::Small
        } else if d == 2.5 {
            OutletSize::Hose
        } else if d == 4.5 {
            OutletSize::Pumper
        } else {
            OutletSize::Other(d)
        }
    }
}

impl From<OutletSize> for f64 {
    fn from(size: OutletSize) -> Self {
        size.inches()
    }
}

/// One measured discharge point during a test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutletReading {
    pub size: OutletSize,
    pub pitot_pressure_psi: f64,
    /// `None` means the field crew did not record one; the evaluator's
    /// default coefficient is used and quality scoring counts it as missing.
    pub discharge_coefficient: Option<f64>,
}

impl OutletReading {
    pub fn new(
        size: impl Into<OutletSize>,
        pitot_pressure_psi: f64,
        discharge_coefficient: Option<f64>,
    ) -> Self {
        Self {
            size: size.into(),
            pitot_pressure_psi,
            discharge_coefficient,
        }
    }

    /// Reading with an explicitly recorded coefficient.
    pub fn with_coefficient(size: impl Into<OutletSize>, pitot_pressure_psi: f64, cd: f64) -> Self {
        Self::new(size, pitot_pressure_psi, Some(cd))
    }

    pub fn coefficient_or(&self, default: f64) -> f64 {
        self.discharge_coefficient.unwrap_or(default)
    }

    /// A closed outlet (zero pitot) is valid; it just flows nothing.
    pub fn is_flowing(&self) -> bool {
        self.pitot_pressure_psi > 0.0
    }

    pub fn validate(&self) -> EvalResult<()> {
        let d = self.size.inches();
        if !d.is_finite() || d <= 0.0 {
            return Err(FlowTestError::reading(format!(
                "outlet size must be positive and finite, got {d} in"
            )));
        }
        ensure_non_negative(self.pitot_pressure_psi, "pitot pressure")?;
        if let Some(cd) = self.discharge_coefficient
            && !is_valid_coefficient(cd)
        {
            return Err(FlowTestError::reading(format!(
                "discharge coefficient must be in (0, 1], got {cd}"
            )));
        }
        Ok(())
    }

    /// Flow through this outlet:
    /// `Q = k * c * d^2 * sqrt(p)` with `k` the orifice constant.
    pub fn flow_gpm(&self, settings: &EvaluatorSettings) -> EvalResult<f64> {
        self.validate()?;
        if !self.is_flowing() {
            return Ok(0.0);
        }
        let d = self.size.inches();
        let cd = self.coefficient_or(settings.default_discharge_coefficient);
        Ok(settings.orifice_constant * cd * d * d * self.pitot_pressure_psi.sqrt())
    }
}

/// Per-outlet flow with the conventional constants.
pub fn compute_per_outlet_flow(reading: &OutletReading) -> EvalResult<f64> {
    reading.flow_gpm(&EvaluatorSettings::default())
}
