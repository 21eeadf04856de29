//! Data-quality scoring of a flow test.
//!
//! This is a completeness/consistency heuristic, not an NFPA requirement.
//! The score starts at 100 and each detected issue deducts its weight from
//! [`QualityWeights`]; the result floors at 0.

use crate::input::FlowTestInput;
use crate::outlet::OutletReading;
use crate::settings::QualityWeights;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_QUALITY_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QualityIssue {
    MissingCoefficient { outlet: usize },
    TooFewOutlets { count: usize },
    LowDifferential { differential_psi: f64 },
    LowPitot { outlet: usize, pitot_psi: f64 },
}

impl QualityIssue {
    pub fn penalty(&self, weights: &QualityWeights) -> u32 {
        match self {
            QualityIssue::MissingCoefficient { .. } => weights.missing_coefficient,
            QualityIssue::TooFewOutlets { .. } => weights.too_few_outlets,
            QualityIssue::LowDifferential { .. } => weights.low_differential,
            QualityIssue::LowPitot { .. } => weights.low_pitot,
        }
    }
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityIssue::MissingCoefficient { outlet } => {
                write!(f, "outlet {outlet}: discharge coefficient missing or zero")
            }
            QualityIssue::TooFewOutlets { count } => {
                write!(f, "only {count} outlet(s) flowed")
            }
            QualityIssue::LowDifferential { differential_psi } => {
                write!(
                    f,
                    "static-residual differential of {differential_psi:.1} psi is too small for a reliable extrapolation"
                )
            }
            QualityIssue::LowPitot { outlet, pitot_psi } => {
                write!(
                    f,
                    "outlet {outlet}: pitot reading {pitot_psi:.1} psi is below reliable gauge range"
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub score: u8,
    pub issues: Vec<QualityIssue>,
}

/// Detect issues in raw readings. Works on unvalidated data so a caller can
/// score a record even before it is accepted.
pub fn detect_issues(
    static_psi: f64,
    residual_psi: f64,
    outlets: &[OutletReading],
    weights: &QualityWeights,
) -> Vec<QualityIssue> {
    let mut issues = Vec::new();

    for (outlet, reading) in outlets.iter().enumerate() {
        if reading.discharge_coefficient.is_none_or(|cd| cd == 0.0) {
            issues.push(QualityIssue::MissingCoefficient { outlet });
        }
    }

    if outlets.len() < weights.min_outlets {
        issues.push(QualityIssue::TooFewOutlets {
            count: outlets.len(),
        });
    }

    let differential_psi = static_psi - residual_psi;
    if differential_psi < weights.min_differential_psi {
        issues.push(QualityIssue::LowDifferential { differential_psi });
    }

    for (outlet, reading) in outlets.iter().enumerate() {
        if reading.pitot_pressure_psi < weights.min_pitot_psi {
            issues.push(QualityIssue::LowPitot {
                outlet,
                pitot_psi: reading.pitot_pressure_psi,
            });
        }
    }

    issues
}

pub fn score_issues(issues: &[QualityIssue], weights: &QualityWeights) -> u8 {
    let deducted = issues
        .iter()
        .fold(0_u32, |acc, issue| acc.saturating_add(issue.penalty(weights)));
    // Bounded by MAX_QUALITY_SCORE, so the narrowing cannot truncate.
    u32::from(MAX_QUALITY_SCORE).saturating_sub(deducted) as u8
}

pub fn quality_report(input: &FlowTestInput, weights: &QualityWeights) -> QualityReport {
    let issues = detect_issues(
        input.static_pressure_psi(),
        input.residual_pressure_psi(),
        input.outlets(),
        weights,
    );
    QualityReport {
        score: score_issues(&issues, weights),
        issues,
    }
}

/// Quality score with the default weights.
pub fn score_quality(input: &FlowTestInput) -> u8 {
    quality_report(input, &QualityWeights::default()).score
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn issue() -> impl Strategy<Value = QualityIssue> {
        prop_oneof![
            (0_usize..8).prop_map(|outlet| QualityIssue::MissingCoefficient { outlet }),
            (0_usize..2).prop_map(|count| QualityIssue::TooFewOutlets { count }),
            (0.0_f64..5.0).prop_map(|differential_psi| QualityIssue::LowDifferential {
                differential_psi
            }),
            (0_usize..8, 0.0_f64..5.0)
                .prop_map(|(outlet, pitot_psi)| QualityIssue::LowPitot { outlet, pitot_psi }),
        ]
    }

    proptest! {
        #[test]
        fn more_issues_never_raise_the_score(
            issues in prop::collection::vec(issue(), 0..12),
            extra in issue(),
        ) {
            let w = QualityWeights::default();
            let before = score_issues(&issues, &w);
            let mut more = issues.clone();
            more.push(extra);
            let after = score_issues(&more, &w);
            prop_assert!(after <= before);
            prop_assert!(after <= MAX_QUALITY_SCORE);
        }
    }
}
