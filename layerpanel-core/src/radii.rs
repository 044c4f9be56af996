//! Corner radii of rectangular vector shapes
//!
//! Radii are derived from a layer's [`ShapeOrigin`]. Plain rectangles have
//! square corners; rounded rectangles carry four measurements that are
//! converted to pixels at the stroke resolution. Every other shape has no
//! corner geometry at all, which is reported as `None` rather than as zero.

use crate::descriptor::{LayerDescriptor, RawRadii, ShapeGeometry, ShapeOrigin};
use crate::unit::{UnitValue, DEFAULT_RESOLUTION};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Border radii of a rectangle, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    /// Radius of the top-left corner
    pub top_left: f64,
    /// Radius of the top-right corner
    pub top_right: f64,
    /// Radius of the bottom-right corner
    pub bottom_right: f64,
    /// Radius of the bottom-left corner
    pub bottom_left: f64,
}

impl CornerRadii {
    /// Create radii from individual corners
    pub fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Create radii with the same value at every corner
    pub fn uniform(radius: f64) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// The single radius shared by all four corners, or `None` if they differ
    pub fn scalar(&self) -> Option<f64> {
        if self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
        {
            Some(self.top_left)
        } else {
            None
        }
    }

    /// Extract radii from a layer descriptor, defaulting the resolution to 300
    pub fn from_descriptor(descriptor: &LayerDescriptor) -> Option<Self> {
        Self::from_descriptor_with_resolution(descriptor, DEFAULT_RESOLUTION)
    }

    /// Extract radii from a layer descriptor
    ///
    /// `default_resolution` is used when the descriptor carries no stroke
    /// resolution, which is common for shapes without a stroke.
    pub fn from_descriptor_with_resolution(
        descriptor: &LayerDescriptor,
        default_resolution: f64,
    ) -> Option<Self> {
        Self::from_origin(
            descriptor.origin.as_ref()?,
            descriptor.stroke_resolution.unwrap_or(default_resolution),
        )
    }

    /// Extract radii from shape geometry read straight off a host payload
    pub fn from_geometry(geometry: &ShapeGeometry, default_resolution: f64) -> Option<Self> {
        Self::from_origin(
            geometry.origin.as_ref()?,
            geometry.stroke_resolution.unwrap_or(default_resolution),
        )
    }

    fn from_origin(origin: &ShapeOrigin, resolution: f64) -> Option<Self> {
        match origin {
            ShapeOrigin::Rect => Some(Self::default()),
            ShapeOrigin::RoundedRect(raw) => Self::from_raw(raw, resolution),
            ShapeOrigin::Other(_) | ShapeOrigin::Malformed => None,
        }
    }

    /// Convert raw measurements to pixels
    ///
    /// Returns `None` if any corner uses an unknown unit or converts to a
    /// negative or non-finite length.
    pub fn from_raw(raw: &RawRadii, resolution: f64) -> Option<Self> {
        let convert = |value: &UnitValue| {
            value
                .to_pixels(resolution)
                .filter(|px| px.is_finite() && *px >= 0.0)
        };

        Some(Self {
            top_left: convert(&raw.top_left)?,
            top_right: convert(&raw.top_right)?,
            bottom_right: convert(&raw.bottom_right)?,
            bottom_left: convert(&raw.bottom_left)?,
        })
    }
}

impl From<CornerRadii> for kurbo::RoundedRectRadii {
    fn from(radii: CornerRadii) -> Self {
        kurbo::RoundedRectRadii::new(
            radii.top_left,
            radii.top_right,
            radii.bottom_right,
            radii.bottom_left,
        )
    }
}

/// Extract corner radii straight from a raw host descriptor
///
/// Only `keyOriginType` and `AGMStrokeStyleInfo` are read. Unreadable
/// geometry yields `None`, like any other descriptor without corners.
pub fn extract_radii(descriptor: &Value) -> Option<CornerRadii> {
    CornerRadii::from_geometry(&ShapeGeometry::from_value(descriptor), DEFAULT_RESOLUTION)
}
