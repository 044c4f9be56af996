//! Host measurement values
//!
//! The host reports lengths either as bare numbers (already in pixels) or as
//! unit descriptors such as `{"_unit": "pointsUnit", "_value": 12}`. Physical
//! units are turned into pixels using the document resolution in pixels per
//! inch.

use serde::{Deserialize, Serialize};

/// Resolution assumed when a descriptor does not carry one
pub const DEFAULT_RESOLUTION: f64 = 300.0;

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per inch
const MM_PER_INCH: f64 = 25.4;

/// Centimeters per inch
const CM_PER_INCH: f64 = 2.54;

/// Length units understood by the converter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Pixels,
    Points,
    Millimeters,
    Centimeters,
    Inches,
}

impl Unit {
    /// Map a host unit name onto a known unit
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pixelsUnit" => Some(Unit::Pixels),
            // Stroke and shape descriptors report distances in points
            "pointsUnit" | "distanceUnit" => Some(Unit::Points),
            "millimetersUnit" => Some(Unit::Millimeters),
            "rulerCm" => Some(Unit::Centimeters),
            "rulerInches" => Some(Unit::Inches),
            _ => None,
        }
    }

    /// Convert `value` expressed in this unit into pixels
    pub fn to_pixels(self, value: f64, resolution: f64) -> f64 {
        match self {
            Unit::Pixels => value,
            Unit::Points => value * resolution / POINTS_PER_INCH,
            Unit::Millimeters => value * resolution / MM_PER_INCH,
            Unit::Centimeters => value * resolution / CM_PER_INCH,
            Unit::Inches => value * resolution,
        }
    }
}

/// A length as it appears in a host descriptor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitValue {
    /// Bare number, interpreted as pixels
    Number(f64),
    /// Unit descriptor
    Tagged {
        #[serde(rename = "_unit")]
        unit: String,
        #[serde(rename = "_value")]
        value: f64,
    },
}

impl UnitValue {
    /// Create a tagged value from a unit name and a magnitude
    pub fn tagged(unit: impl Into<String>, value: f64) -> Self {
        UnitValue::Tagged {
            unit: unit.into(),
            value,
        }
    }

    /// Convert to pixels at the given resolution
    ///
    /// Returns `None` for unit names the converter does not know.
    pub fn to_pixels(&self, resolution: f64) -> Option<f64> {
        match self {
            UnitValue::Number(value) => Some(*value),
            UnitValue::Tagged { unit, value } => {
                Unit::from_name(unit).map(|unit| unit.to_pixels(*value, resolution))
            }
        }
    }
}
