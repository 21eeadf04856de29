//! Extrapolation of measured flow to the rating residual pressure.

use crate::error::EvalResult;
use crate::input::validate_pressures;
use crate::settings::{EXTRAPOLATION_EXPONENT, EvaluatorSettings};
use hf_core::numeric::ensure_non_negative;
use hf_core::units::constants::STANDARD_RESIDUAL_PSI;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrapolation {
    pub available_fire_flow_gpm: f64,
    /// Static pressure was already at or below the target residual, so no
    /// extrapolation was possible and the measured total is reported as-is.
    pub below_target_residual: bool,
}

/// `Q_avail = Q_total * ((Ps - Pt) / (Ps - Pr))^n`
pub fn extrapolate(
    static_psi: f64,
    residual_psi: f64,
    total_flow_gpm: f64,
    target_residual_psi: f64,
    exponent: f64,
) -> EvalResult<Extrapolation> {
    validate_pressures(static_psi, residual_psi)?;
    ensure_non_negative(total_flow_gpm, "total flow")?;
    ensure_non_negative(target_residual_psi, "target residual")?;

    if static_psi <= target_residual_psi {
        return Ok(Extrapolation {
            available_fire_flow_gpm: total_flow_gpm,
            below_target_residual: true,
        });
    }

    let ratio = (static_psi - target_residual_psi) / (static_psi - residual_psi);
    Ok(Extrapolation {
        available_fire_flow_gpm: total_flow_gpm * ratio.powf(exponent),
        below_target_residual: false,
    })
}

/// Extrapolate with the conventional exponent.
pub fn extrapolate_to_standard_residual(
    static_psi: f64,
    residual_psi: f64,
    total_flow_gpm: f64,
    target_residual_psi: f64,
) -> EvalResult<Extrapolation> {
    extrapolate(
        static_psi,
        residual_psi,
        total_flow_gpm,
        target_residual_psi,
        EXTRAPOLATION_EXPONENT,
    )
}

/// Extrapolate to 20 psi with the conventional exponent.
pub fn extrapolate_to_20_psi(
    static_psi: f64,
    residual_psi: f64,
    total_flow_gpm: f64,
) -> EvalResult<Extrapolation> {
    extrapolate_to_standard_residual(static_psi, residual_psi, total_flow_gpm, STANDARD_RESIDUAL_PSI)
}

impl EvaluatorSettings {
    pub fn extrapolate(
        &self,
        static_psi: f64,
        residual_psi: f64,
        total_flow_gpm: f64,
    ) -> EvalResult<Extrapolation> {
        extrapolate(
            static_psi,
            residual_psi,
            total_flow_gpm,
            self.target_residual_psi,
            self.extrapolation_exponent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowTestError;

    #[test]
    fn extrapolates_above_observed_flow_when_residual_is_above_target() {
        let e = extrapolate_to_20_psi(65.0, 45.0, 2000.0).unwrap();
        let expected = 2000.0 * (45.0_f64 / 20.0).powf(0.54);
        assert_eq!(e.available_fire_flow_gpm, expected);
        assert!(e.available_fire_flow_gpm > 2000.0);
        assert!(!e.below_target_residual);
    }

    #[test]
    fn residual_below_target_reduces_flow() {
        let e = extrapolate_to_20_psi(60.0, 10.0, 1500.0).unwrap();
        assert!(e.available_fire_flow_gpm < 1500.0);
    }

    #[test]
    fn residual_at_target_keeps_flow() {
        let e = extrapolate_to_20_psi(60.0, 20.0, 1500.0).unwrap();
        assert_eq!(e.available_fire_flow_gpm, 1500.0);
        assert!(!e.below_target_residual);
    }

    #[test]
    fn equal_pressures_are_degenerate() {
        assert!(matches!(
            extrapolate_to_20_psi(50.0, 50.0, 1000.0),
            Err(FlowTestError::DegenerateTest { .. })
        ));
    }

    #[test]
    fn static_at_or_below_target_is_guarded() {
        for static_psi in [20.0, 18.0] {
            let e = extrapolate_to_20_psi(static_psi, 10.0, 800.0).unwrap();
            assert_eq!(e.available_fire_flow_gpm, 800.0);
            assert!(e.below_target_residual);
            assert!(e.available_fire_flow_gpm.is_finite());
        }
    }

    #[test]
    fn custom_target_is_honoured() {
        let e = extrapolate_to_standard_residual(80.0, 40.0, 1000.0, 40.0).unwrap();
        assert_eq!(e.available_fire_flow_gpm, 1000.0);
    }
}
