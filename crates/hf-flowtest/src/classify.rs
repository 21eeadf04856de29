//! NFPA 291 hydrant classification by rated capacity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hydrant class, strongest first. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NfpaClass {
    AA,
    A,
    B,
    C,
    Unclassified,
}

/// Bonnet and nozzle-cap marking color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkingColor {
    LightBlue,
    Green,
    Orange,
    Red,
}

const BANDS: [(f64, NfpaClass); 4] = [
    (1500.0, NfpaClass::AA),
    (1000.0, NfpaClass::A),
    (500.0, NfpaClass::B),
    (250.0, NfpaClass::C),
];

impl NfpaClass {
    /// Classify an available fire flow. NaN falls through to `Unclassified`.
    pub fn from_flow_gpm(available_fire_flow_gpm: f64) -> Self {
        BANDS
            .iter()
            .find(|(min, _)| available_fire_flow_gpm >= *min)
            .map(|(_, class)| *class)
            .unwrap_or(NfpaClass::Unclassified)
    }

    pub fn min_flow_gpm(self) -> Option<f64> {
        BANDS.iter().find(|(_, c)| *c == self).map(|(min, _)| *min)
    }

    pub fn is_classified(self) -> bool {
        self != NfpaClass::Unclassified
    }

    pub fn label(self) -> &'static str {
        match self {
            NfpaClass::AA => "AA",
            NfpaClass::A => "A",
            NfpaClass::B => "B",
            NfpaClass::C => "C",
            NfpaClass::Unclassified => "Unclassified",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NfpaClass::AA => "Class AA: 1500 GPM or greater",
            NfpaClass::A => "Class A: 1000 to 1499 GPM",
            NfpaClass::B => "Class B: 500 to 999 GPM",
            NfpaClass::C => "Class C: 250 to 499 GPM",
            NfpaClass::Unclassified => "Unclassified: less than 250 GPM",
        }
    }

    pub fn marking_color(self) -> Option<MarkingColor> {
        match self {
            NfpaClass::AA => Some(MarkingColor::LightBlue),
            NfpaClass::A => Some(MarkingColor::Green),
            NfpaClass::B => Some(MarkingColor::Orange),
            NfpaClass::C => Some(MarkingColor::Red),
            NfpaClass::Unclassified => None,
        }
    }
}

impl fmt::Display for NfpaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl fmt::Display for MarkingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarkingColor::LightBlue => "light blue",
            MarkingColor::Green => "green",
            MarkingColor::Orange => "orange",
            MarkingColor::Red => "red",
        };
        f.pad(s)
    }
}

/// Classify an available fire flow (never the raw measured total).
pub fn classify(available_fire_flow_gpm: f64) -> NfpaClass {
    NfpaClass::from_flow_gpm(available_fire_flow_gpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(classify(999.999), NfpaClass::B);
        assert_eq!(classify(1000.0), NfpaClass::A);
        assert_eq!(classify(1499.999), NfpaClass::A);
        assert_eq!(classify(1500.0), NfpaClass::AA);
        assert_eq!(classify(500.0), NfpaClass::B);
        assert_eq!(classify(250.0), NfpaClass::C);
        assert_eq!(classify(249.999), NfpaClass::Unclassified);
        assert_eq!(classify(0.0), NfpaClass::Unclassified);
        assert_eq!(classify(f64::NAN), NfpaClass::Unclassified);
    }

    #[test]
    fn classes_order_strongest_first() {
        assert!(NfpaClass::AA < NfpaClass::A);
        assert!(NfpaClass::C < NfpaClass::Unclassified);
        assert_eq!(NfpaClass::AA.min_flow_gpm(), Some(1500.0));
        assert_eq!(NfpaClass::Unclassified.min_flow_gpm(), None);
    }

    #[test]
    fn markings() {
        assert_eq!(NfpaClass::AA.marking_color(), Some(MarkingColor::LightBlue));
        assert_eq!(NfpaClass::Unclassified.marking_color(), None);
        assert_eq!(MarkingColor::LightBlue.to_string(), "light blue");
        assert_eq!(NfpaClass::Unclassified.to_string(), "Unclassified");
    }
}
