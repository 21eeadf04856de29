use crate::HfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HfError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`. Gauge readings and sizes go through this.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, HfError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(HfError::Negative { what, value: v });
    }
    Ok(v)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
            prop_assert!(nearly_equal(a, a, tol));
        }

        #[test]
        fn ensure_non_negative_splits_at_zero(v in -1e6_f64..1e6) {
            let checked = ensure_non_negative(v, "reading");
            if v >= 0.0 {
                prop_assert_eq!(checked, Ok(v));
            } else {
                prop_assert!(
                    matches!(checked, Err(HfError::Negative { .. })),
                    "expected a Negative error, got {:?}", checked
                );
            }
        }
    }
}
