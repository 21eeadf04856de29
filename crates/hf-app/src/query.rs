//! Query helpers over stored results.

use hf_flowtest::NfpaClass;
use hf_results::{ResultManifest, ResultStore};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Test history of one hydrant (or of a whole organization).
#[derive(Debug, Clone)]
pub struct HistorySummary {
    pub test_count: usize,
    pub compliant_count: usize,
    pub best_class: NfpaClass,
    pub worst_class: NfpaClass,
    pub mean_quality_score: f64,
    /// Most recent test by test date.
    pub latest: ResultManifest,
}

/// Summarize a set of manifests.
pub fn summarize(manifests: &[ResultManifest]) -> AppResult<HistorySummary> {
    let latest = manifests
        .iter()
        .max_by(|a, b| {
            a.tested_on
                .cmp(&b.tested_on)
                .then_with(|| a.evaluated_at.cmp(&b.evaluated_at))
        })
        .ok_or_else(|| AppError::InvalidInput("No stored results".to_string()))?;

    let best_class = manifests
        .iter()
        .map(|m| m.nfpa_class)
        .min()
        .unwrap_or(NfpaClass::Unclassified);
    let worst_class = manifests
        .iter()
        .map(|m| m.nfpa_class)
        .max()
        .unwrap_or(NfpaClass::Unclassified);

    let score_sum: f64 = manifests.iter().map(|m| f64::from(m.quality_score)).sum();

    Ok(HistorySummary {
        test_count: manifests.len(),
        compliant_count: manifests.iter().filter(|m| m.meets_nfpa_291).count(),
        best_class,
        worst_class,
        mean_quality_score: score_sum / manifests.len() as f64,
        latest: latest.clone(),
    })
}

/// Which slice of the store to look at.
#[derive(Debug, Clone, Copy)]
pub enum HistoryScope {
    Hydrant(Uuid),
    Organization(Uuid),
}

pub fn list_history(store: &ResultStore, scope: HistoryScope) -> AppResult<Vec<ResultManifest>> {
    let manifests = match scope {
        HistoryScope::Hydrant(id) => store.list_for_hydrant(id)?,
        HistoryScope::Organization(id) => store.list_for_organization(id)?,
    };
    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(class: NfpaClass, score: u8, tested_on: &str) -> ResultManifest {
        ResultManifest {
            result_id: format!("{class}-{tested_on}"),
            record_id: Uuid::new_v4(),
            organization_id: Uuid::from_u128(1),
            hydrant_id: Uuid::from_u128(2),
            tested_on: tested_on.to_string(),
            evaluated_at: "2026-01-01T00:00:00+00:00".to_string(),
            evaluator_version: "0.1.0".to_string(),
            nfpa_class: class,
            available_fire_flow_gpm: class.min_flow_gpm().unwrap_or(100.0),
            meets_nfpa_291: class.is_classified(),
            quality_score: score,
        }
    }

    #[test]
    fn summary_over_history() {
        let manifests = vec![
            manifest(NfpaClass::A, 100, "2024-05-01"),
            manifest(NfpaClass::B, 80, "2025-05-01"),
            manifest(NfpaClass::Unclassified, 60, "2023-05-01"),
        ];
        let s = summarize(&manifests).unwrap();
        assert_eq!(s.test_count, 3);
        assert_eq!(s.compliant_count, 2);
        assert_eq!(s.best_class, NfpaClass::A);
        assert_eq!(s.worst_class, NfpaClass::Unclassified);
        assert_eq!(s.mean_quality_score, 80.0);
        assert_eq!(s.latest.tested_on, "2025-05-01");
    }

    #[test]
    fn empty_history_is_an_error() {
        assert!(matches!(summarize(&[]), Err(AppError::InvalidInput(_))));
    }
}
