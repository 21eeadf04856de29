use hf_record::*;
use uuid::Uuid;

fn sample_record() -> FlowTestRecord {
    let mut record = FlowTestRecord::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "2026-06-02",
        FlowTestRequest {
            static_pressure_psi: 65.0,
            residual_pressure_psi: 45.0,
            outlets: vec![
                OutletDef {
                    size: hf_flowtest::OutletSize::Hose,
                    pitot_pressure: 42.0,
                    coefficient: Some(0.9),
                },
                OutletDef {
                    size: hf_flowtest::OutletSize::Other(2.0),
                    pitot_pressure: 38.0,
                    coefficient: None,
                },
            ],
        },
    );
    record.tested_by = Some("Engine 7".to_string());
    record
}

#[test]
fn roundtrip_yaml_record() {
    let record = sample_record();
    let path = std::env::temp_dir().join("hf_record_roundtrip.yaml");

    save_yaml(&path, &record).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(record, loaded);
}

#[test]
fn roundtrip_json_record() {
    let record = sample_record();
    let path = std::env::temp_dir().join("hf_record_roundtrip.json");

    save_json(&path, &record).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(record, loaded);
}

#[test]
fn save_refuses_invalid_record() {
    let mut record = sample_record();
    record.test.residual_pressure_psi = 70.0;
    let path = std::env::temp_dir().join("hf_record_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &record),
        Err(RecordError::Validation(_))
    ));
}

#[test]
fn settings_yaml_overrides_only_given_keys() {
    let path = std::env::temp_dir().join("hf_record_settings.yaml");
    std::fs::write(&path, "target_residual_psi: 25.0\nquality:\n  low_pitot: 5\n").unwrap();

    let settings = load_settings_yaml(&path).unwrap();
    assert_eq!(settings.target_residual_psi, 25.0);
    assert_eq!(settings.orifice_constant, 29.83);
    assert_eq!(settings.quality.low_pitot, 5);
    assert_eq!(settings.quality.too_few_outlets, 15);
}

#[test]
fn settings_yaml_is_validated() {
    let path = std::env::temp_dir().join("hf_record_settings_bad.yaml");
    std::fs::write(&path, "extrapolation_exponent: 2.0\n").unwrap();
    assert!(matches!(
        load_settings_yaml(&path),
        Err(RecordError::Settings(_))
    ));
}
