//! End-to-end behaviour of the evaluator through its public API.

use hf_flowtest::*;

fn outlets(readings: &[(f64, f64, Option<f64>)]) -> Vec<OutletReading> {
    readings
        .iter()
        .map(|&(d, p, cd)| OutletReading::new(d, p, cd))
        .collect()
}

#[test]
fn two_hose_outlet_test_rates_aa() {
    let input = FlowTestInput::new(
        65.0,
        45.0,
        outlets(&[(2.5, 42.0, Some(0.9)), (2.5, 38.0, Some(0.9))]),
    )
    .unwrap();

    let flows: Vec<f64> = input
        .outlets()
        .iter()
        .map(|o| compute_per_outlet_flow(o).unwrap())
        .collect();
    // Second outlet scales with sqrt of the pitot ratio.
    let ratio = flows[1] / flows[0];
    assert!((ratio - (38.0_f64 / 42.0).sqrt()).abs() < 1e-12);

    let total = aggregate_flow(&input).unwrap();
    let extrapolated = extrapolate_to_20_psi(65.0, 45.0, total).unwrap();
    assert!(extrapolated.available_fire_flow_gpm > total);

    let result = evaluate(&input).unwrap();
    assert_eq!(result.total_flow_gpm, total);
    assert_eq!(
        result.available_fire_flow_gpm,
        extrapolated.available_fire_flow_gpm
    );
    assert_eq!(result.nfpa_class, NfpaClass::AA);
    assert!(result.meets_nfpa_291);
    assert_eq!(result.quality_score, 100);
    assert_eq!(score_quality(&input), 100);
}

#[test]
fn pumper_outlet_without_recorded_coefficient() {
    let input = FlowTestInput::new(72.0, 58.0, outlets(&[(4.5, 25.0, None)])).unwrap();
    let result = evaluate(&input).unwrap();

    let expected = 29.83 * 0.9 * 4.5 * 4.5 * 5.0;
    assert!((result.per_outlet_flow_gpm[0] - expected).abs() < 1e-9);
    // One outlet (-15) and no coefficient recorded (-10).
    assert_eq!(result.quality_score, 75);
    assert_eq!(result.quality_issues.len(), 2);
    assert!(result.meets_nfpa_291);
}

#[test]
fn validation_errors_are_atomic() {
    let err = FlowTestInput::new(
        65.0,
        45.0,
        outlets(&[(2.5, 42.0, Some(0.9)), (2.5, 38.0, Some(1.2))]),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FlowTestError::InvalidReading {
            outlet: Some(1),
            ..
        }
    ));

    assert_eq!(
        FlowTestInput::new(65.0, 45.0, vec![]).unwrap_err(),
        FlowTestError::EmptyOutletSet
    );
    assert!(matches!(
        FlowTestInput::new(50.0, 50.0, outlets(&[(2.5, 10.0, None)])).unwrap_err(),
        FlowTestError::DegenerateTest { .. }
    ));
    assert!(matches!(
        extrapolate_to_standard_residual(50.0, 50.0, 900.0, 20.0),
        Err(FlowTestError::DegenerateTest { .. })
    ));
}

#[test]
fn every_class_is_reachable() {
    let cases = [
        (1500.0, NfpaClass::AA),
        (1000.0, NfpaClass::A),
        (999.999, NfpaClass::B),
        (250.0, NfpaClass::C),
        (249.999, NfpaClass::Unclassified),
    ];
    for (flow, class) in cases {
        assert_eq!(classify(flow), class, "flow {flow}");
    }
}

#[test]
fn result_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FlowTestResult>();
    assert_send_sync::<FlowTestInput>();
    assert_send_sync::<Evaluator>();
}
