// hf-core/src/units.rs
//
// Field measurements arrive in US customary units (psi, inches, gpm) and the
// flow formulas are calibrated in those units. uom is used at the edges when
// a caller wants SI figures for a report.

use uom::si::f64::{Length as UomLength, Pressure as UomPressure, VolumeRate as UomVolumeRate};

pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn inches(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn gpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::gallon_per_minute;
    VolumeRate::new::<gallon_per_minute>(v)
}

#[inline]
pub fn to_kpa(p: Pressure) -> f64 {
    use uom::si::pressure::kilopascal;
    p.get::<kilopascal>()
}

#[inline]
pub fn to_liters_per_second(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::liter_per_second;
    q.get::<liter_per_second>()
}

#[inline]
pub fn to_millimeters(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}

pub mod constants {
    /// The conventional residual pressure at which available fire flow is rated.
    pub const STANDARD_RESIDUAL_PSI: f64 = 20.0;
}
