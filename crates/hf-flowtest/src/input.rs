//! A complete flow-test event and its validation.

use crate::error::{EvalResult, FlowTestError};
use crate::outlet::OutletReading;
use crate::settings::EvaluatorSettings;

/// One full test event. Only constructible through [`FlowTestInput::new`],
/// so every value of this type has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowTestInput {
    static_pressure_psi: f64,
    residual_pressure_psi: f64,
    outlets: Vec<OutletReading>,
}

impl FlowTestInput {
    pub fn new(
        static_pressure_psi: f64,
        residual_pressure_psi: f64,
        outlets: Vec<OutletReading>,
    ) -> EvalResult<Self> {
        validate_pressures(static_pressure_psi, residual_pressure_psi)?;
        if outlets.is_empty() {
            return Err(FlowTestError::EmptyOutletSet);
        }
        for (i, outlet) in outlets.iter().enumerate() {
            outlet.validate().map_err(|e| e.at_outlet(i))?;
        }
        Ok(Self {
            static_pressure_psi,
            residual_pressure_psi,
            outlets,
        })
    }

    pub fn static_pressure_psi(&self) -> f64 {
        self.static_pressure_psi
    }

    pub fn residual_pressure_psi(&self) -> f64 {
        self.residual_pressure_psi
    }

    pub fn pressure_drop_psi(&self) -> f64 {
        self.static_pressure_psi - self.residual_pressure_psi
    }

    pub fn outlets(&self) -> &[OutletReading] {
        &self.outlets
    }
}

/// Static > 0, residual >= 0, residual <= static, and a non-zero drop.
pub(crate) fn validate_pressures(static_psi: f64, residual_psi: f64) -> EvalResult<()> {
    if !static_psi.is_finite() || static_psi <= 0.0 {
        return Err(FlowTestError::InvalidPressure {
            what: "static_pressure_psi",
            value: static_psi,
            reason: "must be positive and finite",
        });
    }
    if !residual_psi.is_finite() || residual_psi < 0.0 {
        return Err(FlowTestError::InvalidPressure {
            what: "residual_pressure_psi",
            value: residual_psi,
            reason: "must be non-negative and finite",
        });
    }
    if residual_psi > static_psi {
        return Err(FlowTestError::InvalidPressure {
            what: "residual_pressure_psi",
            value: residual_psi,
            reason: "flowing pressure cannot exceed static pressure",
        });
    }
    if residual_psi == static_psi {
        return Err(FlowTestError::DegenerateTest {
            static_psi,
            residual_psi,
        });
    }
    Ok(())
}

/// Per-outlet flows, aligned with `outlets`.
pub fn per_outlet_flows(
    outlets: &[OutletReading],
    settings: &EvaluatorSettings,
) -> EvalResult<Vec<f64>> {
    outlets
        .iter()
        .enumerate()
        .map(|(i, o)| o.flow_gpm(settings).map_err(|e| e.at_outlet(i)))
        .collect()
}

/// Total discharge over a set of readings.
pub fn aggregate_outlets(outlets: &[OutletReading], settings: &EvaluatorSettings) -> EvalResult<f64> {
    if outlets.is_empty() {
        return Err(FlowTestError::EmptyOutletSet);
    }
    Ok(per_outlet_flows(outlets, settings)?.iter().sum())
}

/// Total discharge of a test with the conventional constants.
pub fn aggregate_flow(input: &FlowTestInput) -> EvalResult<f64> {
    aggregate_outlets(input.outlets(), &EvaluatorSettings::default())
}
