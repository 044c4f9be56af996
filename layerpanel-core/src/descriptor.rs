//! Layer descriptors received from the host
//!
//! The host describes every layer with a loosely structured JSON payload.
//! This module validates that payload once, at the boundary, into a typed
//! [`LayerDescriptor`]. Shape geometry becomes a [`ShapeOrigin`] keyed by the
//! shape's origin type so downstream code can match exhaustively instead of
//! probing fields.
//!
//! Geometry is validated leniently: an unreadable origin list or stroke style
//! means no geometry, and a rounded rectangle whose radii are missing or
//! unreadable is kept as [`ShapeOrigin::Malformed`]. Neither rejects the
//! layer.

use crate::errors::DescriptorError;
use crate::id::LayerId;
use crate::unit::UnitValue;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Origin type of a vector shape, as reported in `keyOriginType`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OriginType {
    /// `ORIGIN_RECT`
    Rect,
    /// `ORIGIN_ROUNDED_RECT`
    RoundedRect,
    /// `ORIGIN_LINE`
    Line,
    /// `ORIGIN_ELLIPSE`
    Ellipse,
    /// Any code this crate does not model
    Unknown(u32),
}

impl OriginType {
    pub const ORIGIN_RECT: u32 = 1;
    pub const ORIGIN_ROUNDED_RECT: u32 = 2;
    pub const ORIGIN_LINE: u32 = 4;
    pub const ORIGIN_ELLIPSE: u32 = 5;

    /// Decode a host origin code
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::ORIGIN_RECT => OriginType::Rect,
            Self::ORIGIN_ROUNDED_RECT => OriginType::RoundedRect,
            Self::ORIGIN_LINE => OriginType::Line,
            Self::ORIGIN_ELLIPSE => OriginType::Ellipse,
            other => OriginType::Unknown(other),
        }
    }

    /// Host origin code
    pub fn code(self) -> u32 {
        match self {
            OriginType::Rect => Self::ORIGIN_RECT,
            OriginType::RoundedRect => Self::ORIGIN_ROUNDED_RECT,
            OriginType::Line => Self::ORIGIN_LINE,
            OriginType::Ellipse => Self::ORIGIN_ELLIPSE,
            OriginType::Unknown(code) => code,
        }
    }
}

/// Raw corner measurements of a rounded rectangle, before unit conversion
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRadii {
    pub top_left: UnitValue,
    pub top_right: UnitValue,
    pub bottom_right: UnitValue,
    pub bottom_left: UnitValue,
}

/// Validated vector shape geometry
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeOrigin {
    /// Plain rectangle
    Rect,
    /// Rounded rectangle with its raw corner measurements
    RoundedRect(RawRadii),
    /// Another recognized or unknown origin type without corner geometry
    Other(OriginType),
    /// Rounded rectangle whose radii could not be read
    Malformed,
}

impl ShapeOrigin {
    /// Origin type this geometry was decoded from
    pub fn origin_type(&self) -> OriginType {
        match self {
            ShapeOrigin::Rect => OriginType::Rect,
            ShapeOrigin::RoundedRect(_) | ShapeOrigin::Malformed => OriginType::RoundedRect,
            ShapeOrigin::Other(origin_type) => *origin_type,
        }
    }
}

/// The parts of a descriptor that determine corner radii
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeGeometry {
    /// Decoded from the first `keyOriginType` entry
    pub origin: Option<ShapeOrigin>,
    /// `AGMStrokeStyleInfo.value.strokeStyleResolution`, when usable
    pub stroke_resolution: Option<f64>,
}

impl ShapeGeometry {
    /// Read shape geometry from a raw host payload
    ///
    /// Identity fields such as `layerID` play no part; a payload that is not
    /// an object has no geometry.
    pub fn from_value(value: &Value) -> Self {
        Self::decode(
            &"shape descriptor",
            value.get("keyOriginType"),
            value.get("AGMStrokeStyleInfo"),
        )
    }

    fn decode(
        owner: &dyn fmt::Display,
        origins: Option<&Value>,
        stroke_style: Option<&Value>,
    ) -> Self {
        Self {
            origin: origins.and_then(|value| decode_origins(owner, value)),
            stroke_resolution: stroke_style.and_then(|value| decode_stroke_style(owner, value)),
        }
    }
}

/// Position of a layer relative to group boundaries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerSection {
    /// Ordinary layer
    #[default]
    Content,
    /// The group layer itself; closes the group when reading bottom-to-top
    GroupStart,
    /// Hidden marker below a group's children; opens the group
    GroupEnd,
}

impl LayerSection {
    fn from_name(name: &str) -> Self {
        match name {
            "layerSectionStart" => LayerSection::GroupStart,
            "layerSectionEnd" => LayerSection::GroupEnd,
            _ => LayerSection::Content,
        }
    }
}

/// Kind of content a layer holds
///
/// Only the kinds the tree treats differently are named.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Pixel,
    Vector,
    Group,
    GroupEnd,
    Other(u32),
}

impl LayerKind {
    /// Decode a host `layerKind` code
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => LayerKind::Pixel,
            4 => LayerKind::Vector,
            7 => LayerKind::Group,
            13 => LayerKind::GroupEnd,
            other => LayerKind::Other(other),
        }
    }

    /// Whether layers of this kind hold children
    pub fn is_group(self) -> bool {
        matches!(self, LayerKind::Group)
    }
}

/// Typed layer descriptor
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawLayer")]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub section: LayerSection,
    pub visible: bool,
    pub locked: bool,
    /// Vector shape geometry, `None` when the layer carries no origin type
    pub origin: Option<ShapeOrigin>,
    /// `AGMStrokeStyleInfo.value.strokeStyleResolution`, when present
    pub stroke_resolution: Option<f64>,
}

impl LayerDescriptor {
    /// Create a plain content layer descriptor
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: LayerId(id),
            name: name.into(),
            kind: LayerKind::Pixel,
            section: LayerSection::Content,
            visible: true,
            locked: false,
            origin: None,
            stroke_resolution: None,
        }
    }

    /// Create the descriptor of a group layer
    pub fn group(id: u32, name: impl Into<String>) -> Self {
        Self {
            kind: LayerKind::Group,
            section: LayerSection::GroupStart,
            ..Self::new(id, name)
        }
    }

    /// Create the hidden marker that opens a group
    pub fn group_end(id: u32) -> Self {
        Self {
            kind: LayerKind::GroupEnd,
            section: LayerSection::GroupEnd,
            visible: false,
            ..Self::new(id, "</Layer group>")
        }
    }

    /// Attach vector shape geometry
    pub fn with_origin(mut self, origin: ShapeOrigin) -> Self {
        self.kind = LayerKind::Vector;
        self.origin = Some(origin);
        self
    }

    /// Set the stroke resolution
    pub fn with_stroke_resolution(mut self, resolution: f64) -> Self {
        self.stroke_resolution = Some(resolution);
        self
    }

    /// Set visibility
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set locking
    pub fn with_locking(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Validate a raw host payload
    pub fn from_value(value: Value) -> Result<Self, DescriptorError> {
        serde_json::from_value(value).map_err(DescriptorError::from)
    }

    /// Validate a flat array of raw host payloads
    pub fn from_values(values: Vec<Value>) -> Result<Vec<Self>, DescriptorError> {
        values.into_iter().map(Self::from_value).collect()
    }
}

// === Wire format ===

#[derive(Deserialize)]
struct Wrapped<T> {
    value: T,
}

#[derive(Deserialize)]
struct RawLocking {
    #[serde(rename = "protectAll", default)]
    protect_all: bool,
}

#[derive(Deserialize)]
struct RawEnum {
    #[serde(rename = "_value")]
    value: String,
}

#[derive(Deserialize)]
struct RawOrigin {
    #[serde(rename = "keyOriginType", default)]
    origin_type: Option<Value>,
    #[serde(rename = "keyOriginRRectRadii", default)]
    radii: Option<Value>,
}

#[derive(Deserialize)]
struct RawStrokeStyle {
    #[serde(rename = "strokeStyleResolution", default)]
    resolution: Option<Value>,
}

fn default_visible() -> bool {
    true
}

#[derive(Deserialize)]
struct RawLayer {
    #[serde(rename = "layerID")]
    layer_id: LayerId,
    #[serde(default)]
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(rename = "layerLocking", default)]
    locking: Option<Wrapped<RawLocking>>,
    #[serde(rename = "layerKind", default)]
    kind: Option<u32>,
    #[serde(rename = "layerSection", default)]
    section: Option<Wrapped<RawEnum>>,
    #[serde(rename = "keyOriginType", default)]
    origins: Option<Value>,
    #[serde(rename = "AGMStrokeStyleInfo", default)]
    stroke_style: Option<Value>,
}

impl From<RawLayer> for LayerDescriptor {
    fn from(raw: RawLayer) -> Self {
        let section = raw
            .section
            .map(|section| LayerSection::from_name(&section.value.value))
            .unwrap_or_default();

        let kind = match (raw.kind, section) {
            (Some(code), _) => LayerKind::from_code(code),
            (None, LayerSection::GroupStart) => LayerKind::Group,
            (None, LayerSection::GroupEnd) => LayerKind::GroupEnd,
            (None, LayerSection::Content) => LayerKind::Pixel,
        };

        let geometry = ShapeGeometry::decode(
            &raw.layer_id,
            raw.origins.as_ref(),
            raw.stroke_style.as_ref(),
        );

        Self {
            id: raw.layer_id,
            name: raw.name,
            kind,
            section,
            visible: raw.visible,
            locked: raw.locking.map(|l| l.value.protect_all).unwrap_or(false),
            origin: geometry.origin,
            stroke_resolution: geometry.stroke_resolution,
        }
    }
}

fn decode_origins(owner: &dyn fmt::Display, value: &Value) -> Option<ShapeOrigin> {
    let first = match value {
        Value::Null => return None,
        Value::Array(items) => items.first()?,
        other => {
            log::debug!("Ignoring unreadable origin list {} on {}", other, owner);
            return None;
        }
    };

    match Wrapped::<RawOrigin>::deserialize(first) {
        Ok(origin) => decode_origin(owner, origin.value),
        Err(err) => {
            log::debug!("Ignoring unreadable origin entry on {}: {}", owner, err);
            None
        }
    }
}

fn decode_origin(owner: &dyn fmt::Display, raw: RawOrigin) -> Option<ShapeOrigin> {
    let code = u32::try_from(raw.origin_type?.as_u64()?).ok()?;

    Some(match OriginType::from_code(code) {
        OriginType::Rect => ShapeOrigin::Rect,
        OriginType::RoundedRect => {
            let radii = raw
                .radii
                .and_then(|value| serde_json::from_value::<Wrapped<RawRadii>>(value).ok());
            match radii {
                Some(radii) => ShapeOrigin::RoundedRect(radii.value),
                None => {
                    log::debug!("{} is a rounded rectangle without readable radii", owner);
                    ShapeOrigin::Malformed
                }
            }
        }
        other => {
            log::trace!("{} has origin type {} without corners", owner, other.code());
            ShapeOrigin::Other(other)
        }
    })
}

fn decode_stroke_style(owner: &dyn fmt::Display, value: &Value) -> Option<f64> {
    if value.is_null() {
        return None;
    }
    match Wrapped::<RawStrokeStyle>::deserialize(value) {
        Ok(style) => decode_resolution(owner, style.value.resolution?),
        Err(err) => {
            log::debug!("Ignoring unreadable stroke style on {}: {}", owner, err);
            None
        }
    }
}

fn decode_resolution(owner: &dyn fmt::Display, value: Value) -> Option<f64> {
    match value.as_f64() {
        Some(resolution) if resolution.is_finite() && resolution > 0.0 => Some(resolution),
        _ => {
            log::warn!(
                "Ignoring unusable stroke resolution {} on {}",
                value,
                owner
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_descriptor() {
        let desc = LayerDescriptor::from_value(json!({ "layerID": 3 })).unwrap();
        assert_eq!(desc.id, LayerId(3));
        assert_eq!(desc.name, "");
        assert!(desc.visible);
        assert!(!desc.locked);
        assert_eq!(desc.kind, LayerKind::Pixel);
        assert_eq!(desc.section, LayerSection::Content);
        assert_eq!(desc.origin, None);
        assert_eq!(desc.stroke_resolution, None);
    }

    #[test]
    fn test_missing_layer_id_is_rejected() {
        assert!(LayerDescriptor::from_value(json!({ "name": "Orphan" })).is_err());
    }

    #[test]
    fn test_flags_and_section() {
        let desc = LayerDescriptor::from_value(json!({
            "layerID": 8,
            "name": "Group 1",
            "visible": false,
            "layerLocking": { "value": { "protectAll": true } },
            "layerSection": { "value": { "_enum": "layerSectionType", "_value": "layerSectionStart" } }
        }))
        .unwrap();

        assert!(!desc.visible);
        assert!(desc.locked);
        assert_eq!(desc.section, LayerSection::GroupStart);
        assert_eq!(desc.kind, LayerKind::Group);
    }

    #[test]
    fn test_rounded_rect_origin() {
        let desc = LayerDescriptor::from_value(json!({
            "layerID": 2,
            "layerKind": 4,
            "keyOriginType": [{ "value": {
                "keyOriginType": 2,
                "keyOriginRRectRadii": { "value": {
                    "topLeft": { "_unit": "distanceUnit", "_value": 3 },
                    "topRight": 3,
                    "bottomRight": 3,
                    "bottomLeft": 3
                } }
            } }],
            "AGMStrokeStyleInfo": { "value": { "strokeStyleResolution": 144 } }
        }))
        .unwrap();

        assert_eq!(desc.kind, LayerKind::Vector);
        assert_eq!(desc.stroke_resolution, Some(144.0));
        match desc.origin {
            Some(ShapeOrigin::RoundedRect(radii)) => {
                assert_eq!(radii.top_left, UnitValue::tagged("distanceUnit", 3.0));
                assert_eq!(radii.bottom_left, UnitValue::Number(3.0));
            }
            other => panic!("unexpected origin {:?}", other),
        }
    }

    #[test]
    fn test_rounded_rect_without_radii_is_malformed() {
        let desc = LayerDescriptor::from_value(json!({
            "layerID": 2,
            "keyOriginType": [{ "value": { "keyOriginType": 2 } }]
        }))
        .unwrap();
        assert_eq!(desc.origin, Some(ShapeOrigin::Malformed));
        assert_eq!(desc.origin.unwrap().origin_type(), OriginType::RoundedRect);
    }

    #[test]
    fn test_other_origin_types() {
        let desc = LayerDescriptor::from_value(json!({
            "layerID": 2,
            "keyOriginType": [{ "value": { "keyOriginType": 5 } }]
        }))
        .unwrap();
        assert_eq!(desc.origin, Some(ShapeOrigin::Other(OriginType::Ellipse)));
        assert_eq!(desc.origin.unwrap().origin_type().code(), OriginType::ORIGIN_ELLIPSE);

        let desc = LayerDescriptor::from_value(json!({
            "layerID": 2,
            "keyOriginType": [{ "value": { "keyOriginType": 42 } }]
        }))
        .unwrap();
        assert_eq!(desc.origin, Some(ShapeOrigin::Other(OriginType::Unknown(42))));
    }

    #[test]
    fn test_empty_origin_list() {
        let desc = LayerDescriptor::from_value(json!({
            "layerID": 2,
            "keyOriginType": []
        }))
        .unwrap();
        assert_eq!(desc.origin, None);
    }

    #[test]
    fn test_unreadable_geometry_keeps_layer() {
        for (origins, stroke_style) in [
            (json!(null), json!(null)),
            (json!([{ "keyOriginType": 2 }]), json!({ "strokeStyleResolution": 72 })),
            (json!({ "value": { "keyOriginType": 1 } }), json!([300])),
            (json!(["rect"]), json!({ "value": "high" })),
        ] {
            let desc = LayerDescriptor::from_value(json!({
                "layerID": 6,
                "name": "Shape",
                "keyOriginType": origins,
                "AGMStrokeStyleInfo": stroke_style
            }))
            .unwrap();
            assert_eq!(desc.id, LayerId(6));
            assert_eq!(desc.origin, None);
            assert_eq!(desc.stroke_resolution, None);
        }
    }

    #[test]
    fn test_geometry_without_identity() {
        let geometry = ShapeGeometry::from_value(&json!({
            "keyOriginType": [{ "value": { "keyOriginType": 1 } }],
            "AGMStrokeStyleInfo": { "value": { "strokeStyleResolution": 72 } }
        }));
        assert_eq!(geometry.origin, Some(ShapeOrigin::Rect));
        assert_eq!(geometry.stroke_resolution, Some(72.0));

        assert_eq!(ShapeGeometry::from_value(&json!(7)), ShapeGeometry::default());
    }

    #[test]
    fn test_unusable_resolution_is_dropped() {
        let desc = LayerDescriptor::from_value(json!({
            "layerID": 2,
            "AGMStrokeStyleInfo": { "value": { "strokeStyleResolution": "high" } }
        }))
        .unwrap();
        assert_eq!(desc.stroke_resolution, None);
    }

    #[test]
    fn test_origin_codes_round_trip_through_enum() {
        for code in [1, 2, 4, 5, 9] {
            assert_eq!(OriginType::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unnamed_layer_kinds() {
        assert_eq!(LayerKind::from_code(4), LayerKind::Vector);
        assert_eq!(LayerKind::from_code(12), LayerKind::Other(12));
        assert!(!LayerKind::from_code(12).is_group());
    }
}
