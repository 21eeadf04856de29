//! Flow-test evaluation for front ends: single requests, parallel batches,
//! and evaluate-then-store with a content-addressed cache.

use chrono::Utc;
use hf_flowtest::{Evaluator, EvaluatorSettings, FlowTestResult};
use hf_record::{FlowTestRecord, FlowTestRequest, FlowTestResponse};
use hf_results::{ResultManifest, ResultStore, compute_result_id};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::AppResult;

/// Part of every result ID; bump when evaluation semantics change.
pub const EVALUATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Evaluate a request and keep the full typed result.
pub fn evaluate_request_full(
    request: &FlowTestRequest,
    settings: &EvaluatorSettings,
) -> AppResult<FlowTestResult> {
    let evaluator = Evaluator::new(*settings)?;
    let input = request.to_input()?;
    let result = evaluator.evaluate(&input)?;
    log_outcome(&result);
    Ok(result)
}

/// Evaluate a request into the response body.
pub fn evaluate_request(
    request: &FlowTestRequest,
    settings: &EvaluatorSettings,
) -> AppResult<FlowTestResponse> {
    let result = evaluate_request_full(request, settings)?;
    Ok(FlowTestResponse::from(&result))
}

/// Evaluate many requests across the rayon pool. Output order matches input
/// order; one failed request does not affect the others.
pub fn evaluate_batch(
    requests: &[FlowTestRequest],
    settings: &EvaluatorSettings,
) -> Vec<AppResult<FlowTestResponse>> {
    requests
        .par_iter()
        .map(|request| evaluate_request(request, settings))
        .collect()
}

/// Outcome of [`evaluate_and_store`].
#[derive(Debug, Clone)]
pub struct StoredEvaluation {
    /// `record_id` is always the record passed in, even on a cache hit where
    /// the stored manifest still names the record that first produced it.
    pub manifest: ResultManifest,
    pub response: FlowTestResponse,
    pub loaded_from_cache: bool,
}

pub fn evaluate_and_store(
    record: &FlowTestRecord,
    settings: &EvaluatorSettings,
    store: &ResultStore,
    use_cache: bool,
) -> AppResult<StoredEvaluation> {
    hf_record::validate_record(record)?;
    let result_id = compute_result_id(record, settings, EVALUATOR_VERSION);

    if use_cache && store.has_result(&result_id) {
        debug!(%result_id, "serving flow test result from store");
        let mut manifest = store.load_manifest(&result_id)?;
        manifest.record_id = record.id;
        return Ok(StoredEvaluation {
            manifest,
            response: store.load_response(&result_id)?,
            loaded_from_cache: true,
        });
    }

    let result = evaluate_request_full(&record.test, settings)?;
    let response = FlowTestResponse::from(&result);
    let manifest = ResultManifest {
        result_id,
        record_id: record.id,
        organization_id: record.organization_id,
        hydrant_id: record.hydrant_id,
        tested_on: record.tested_on.clone(),
        evaluated_at: Utc::now().to_rfc3339(),
        evaluator_version: EVALUATOR_VERSION.to_string(),
        nfpa_class: result.nfpa_class,
        available_fire_flow_gpm: result.available_fire_flow_gpm,
        meets_nfpa_291: result.meets_nfpa_291,
        quality_score: result.quality_score,
    };
    store.save_result(&manifest, &response)?;

    Ok(StoredEvaluation {
        manifest,
        response,
        loaded_from_cache: false,
    })
}

fn log_outcome(result: &FlowTestResult) {
    debug!(
        total_flow_gpm = result.total_flow_gpm,
        available_fire_flow_gpm = result.available_fire_flow_gpm,
        class = %result.nfpa_class,
        quality_score = result.quality_score,
        "evaluated flow test"
    );
    if result.below_target_residual {
        warn!(
            target_residual_psi = result.target_residual_psi,
            "static pressure at or below target residual; reporting measured flow"
        );
    }
    for issue in &result.quality_issues {
        warn!(%issue, "flow test quality issue");
    }
}
