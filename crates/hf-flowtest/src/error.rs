//! Error types for flow-test evaluation.

use hf_core::HfError;
use thiserror::Error;

/// Validation failures. All of them are raised before any flow is computed,
/// so an evaluation either succeeds for the whole test or fails for all of it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowTestError {
    #[error("Invalid outlet reading{}: {reason}", outlet_label(.outlet))]
    InvalidReading {
        /// Position in the outlet list, when the reading came from a test.
        outlet: Option<usize>,
        reason: String,
    },

    #[error("Flow test has no outlets")]
    EmptyOutletSet,

    #[error(
        "Degenerate test: static ({static_psi} psi) equals residual ({residual_psi} psi), no pressure drop observed"
    )]
    DegenerateTest { static_psi: f64, residual_psi: f64 },

    #[error("Invalid pressure: {what} = {value} ({reason})")]
    InvalidPressure {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid setting: {what} = {value} ({reason})")]
    InvalidSetting {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type EvalResult<T> = Result<T, FlowTestError>;

fn outlet_label(outlet: &Option<usize>) -> String {
    match outlet {
        Some(i) => format!(" at outlet {i}"),
        None => String::new(),
    }
}

impl FlowTestError {
    pub(crate) fn reading(reason: impl Into<String>) -> Self {
        FlowTestError::InvalidReading {
            outlet: None,
            reason: reason.into(),
        }
    }

    /// Attach the outlet position to a reading error raised for a single outlet.
    pub(crate) fn at_outlet(self, index: usize) -> Self {
        match self {
            FlowTestError::InvalidReading { reason, .. } => FlowTestError::InvalidReading {
                outlet: Some(index),
                reason,
            },
            other => other,
        }
    }
}

impl From<HfError> for FlowTestError {
    fn from(e: HfError) -> Self {
        FlowTestError::reading(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlowTestError::reading("pitot pressure must be >= 0").at_outlet(2);
        let msg = err.to_string();
        assert!(msg.contains("outlet 2"));
        assert!(msg.contains("pitot"));

        let err = FlowTestError::reading("outlet size must be > 0");
        assert!(!err.to_string().contains("at outlet"));
    }

    #[test]
    fn error_conversion() {
        let core = HfError::NonFinite {
            what: "pitot pressure",
            value: f64::NAN,
        };
        let err: FlowTestError = core.into();
        assert!(matches!(err, FlowTestError::InvalidReading { outlet: None, .. }));
    }

    #[test]
    fn at_outlet_leaves_other_errors_alone() {
        let err = FlowTestError::EmptyOutletSet.at_outlet(3);
        assert_eq!(err, FlowTestError::EmptyOutletSet);
    }
}
