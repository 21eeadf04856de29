//! Record validation logic.

use crate::schema::FlowTestRecord;
use chrono::NaiveDate;
use hf_flowtest::FlowTestError;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid flow test: {0}")]
    FlowTest(#[from] FlowTestError),
}

pub fn validate_record(record: &FlowTestRecord) -> Result<(), ValidationError> {
    if record.version == 0 || record.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: record.version,
        });
    }

    // Only the zero-padded form: stored manifests order by this string.
    let canonical = NaiveDate::parse_from_str(&record.tested_on, "%Y-%m-%d")
        .is_ok_and(|date| date.format("%Y-%m-%d").to_string() == record.tested_on);
    if !canonical {
        return Err(ValidationError::InvalidValue {
            field: "tested_on".to_string(),
            value: record.tested_on.clone(),
            reason: "must be a YYYY-MM-DD date".to_string(),
        });
    }

    if let Some(tester) = &record.tested_by
        && tester.trim().is_empty()
    {
        return Err(ValidationError::InvalidValue {
            field: "tested_by".to_string(),
            value: tester.clone(),
            reason: "must not be blank when present".to_string(),
        });
    }

    if record.organization_id.is_nil() {
        return Err(ValidationError::InvalidValue {
            field: "organization_id".to_string(),
            value: record.organization_id.to_string(),
            reason: "must not be the nil UUID".to_string(),
        });
    }

    if record.hydrant_id.is_nil() {
        return Err(ValidationError::InvalidValue {
            field: "hydrant_id".to_string(),
            value: record.hydrant_id.to_string(),
            reason: "must not be the nil UUID".to_string(),
        });
    }

    record.test.to_input()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FlowTestRequest, OutletDef};
    use hf_flowtest::OutletSize;
    use uuid::Uuid;

    fn record() -> FlowTestRecord {
        FlowTestRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "2026-05-14",
            FlowTestRequest {
                static_pressure_psi: 65.0,
                residual_pressure_psi: 45.0,
                outlets: vec![OutletDef {
                    size: OutletSize::Hose,
                    pitot_pressure: 42.0,
                    coefficient: Some(0.9),
                }],
            },
        )
    }

    #[test]
    fn valid_record_passes() {
        validate_record(&record()).unwrap();
    }

    #[test]
    fn rejects_bad_date() {
        let mut r = record();
        r.tested_on = "14/05/2026".to_string();
        assert!(matches!(
            validate_record(&r),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_unpadded_date() {
        for date in ["2026-5-1", "2026-05-1", "2026-5-01"] {
            let mut r = record();
            r.tested_on = date.to_string();
            assert!(
                matches!(
                    validate_record(&r),
                    Err(ValidationError::InvalidValue { ref field, .. }) if field == "tested_on"
                ),
                "{date} should be rejected"
            );
        }

        let mut r = record();
        r.tested_on = "2026-10-01".to_string();
        validate_record(&r).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut r = record();
        r.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_record(&r),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_nil_hydrant() {
        let mut r = record();
        r.hydrant_id = Uuid::nil();
        assert!(validate_record(&r).is_err());
    }

    #[test]
    fn surfaces_evaluator_errors() {
        let mut r = record();
        r.test.outlets.clear();
        assert!(matches!(
            validate_record(&r),
            Err(ValidationError::FlowTest(FlowTestError::EmptyOutletSet))
        ));
    }
}
