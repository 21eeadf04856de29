//! hf-flowtest: NFPA 291 hydrant flow-test evaluation.
//!
//! Turns raw outlet readings plus static/residual pressure into:
//! - per-outlet and total discharge (pitot-tube orifice formula)
//! - available fire flow at the rating residual (20 psi by default)
//! - an NFPA class and a compliance verdict
//! - a data-quality score with the issues that lowered it
//!
//! Every function is a pure computation over its arguments; there is no
//! shared state, so evaluations may run concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use hf_flowtest::{FlowTestInput, NfpaClass, OutletReading, evaluate};
//!
//! let input = FlowTestInput::new(
//!     65.0,
//!     45.0,
//!     vec![
//!         OutletReading::with_coefficient(2.5, 42.0, 0.9),
//!         OutletReading::with_coefficient(2.5, 38.0, 0.9),
//!     ],
//! )
//! .unwrap();
//!
//! let result = evaluate(&input).unwrap();
//! assert_eq!(result.nfpa_class, NfpaClass::AA);
//! assert!(result.meets_nfpa_291);
//! assert_eq!(result.quality_score, 100);
//! ```

pub mod classify;
pub mod error;
pub mod evaluate;
pub mod extrapolate;
pub mod input;
pub mod outlet;
pub mod quality;
pub mod settings;

// Re-exports
pub use classify::{MarkingColor, NfpaClass, classify};
pub use error::{EvalResult, FlowTestError};
pub use evaluate::{Evaluator, FlowTestResult, evaluate, evaluate_compliance};
pub use extrapolate::{Extrapolation, extrapolate_to_20_psi, extrapolate_to_standard_residual};
pub use input::{FlowTestInput, aggregate_flow};
pub use outlet::{OutletReading, OutletSize, compute_per_outlet_flow};
pub use quality::{QualityIssue, QualityReport, score_quality};
pub use settings::{EvaluatorSettings, QualityWeights};
