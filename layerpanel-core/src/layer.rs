//! Layer records mirrored from the host
//!
//! A [`Layer`] holds the properties the panel displays for one host layer.
//! Structure (parent and children) lives in the
//! [`LayerTree`](crate::layer_tree::LayerTree).

use crate::descriptor::{LayerDescriptor, LayerKind};
use crate::id::LayerId;
use crate::radii::CornerRadii;

/// Base layer structure
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Host identifier, unique within the document
    id: LayerId,

    /// Layer name
    name: String,

    /// Content kind
    kind: LayerKind,

    /// Whether the layer is visible
    visible: bool,

    /// Whether the layer is locked against edits
    locked: bool,

    /// Corner radii for rectangle shapes
    radii: Option<CornerRadii>,
}

impl Layer {
    /// Create a visible, unlocked layer
    pub fn new(id: LayerId, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            visible: true,
            locked: false,
            radii: None,
        }
    }

    /// Build a layer from its descriptor
    ///
    /// Radii are extracted with `default_resolution` standing in for a
    /// missing stroke resolution.
    pub fn from_descriptor(descriptor: &LayerDescriptor, default_resolution: f64) -> Self {
        Self {
            id: descriptor.id,
            name: descriptor.name.clone(),
            kind: descriptor.kind,
            visible: descriptor.visible,
            locked: descriptor.locked,
            radii: CornerRadii::from_descriptor_with_resolution(descriptor, default_resolution),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn radii(&self) -> Option<CornerRadii> {
        self.radii
    }

    /// Whether this layer is a group that can hold children
    pub fn is_group(&self) -> bool {
        self.kind.is_group()
    }

    // === MUTATION METHODS (pub(crate) - only the store mutates layers) ===

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ShapeOrigin;

    #[test]
    fn test_layer_creation() {
        let layer = Layer::new(LayerId(4), "Background", LayerKind::Other(12));
        assert_eq!(layer.id(), LayerId(4));
        assert_eq!(layer.name(), "Background");
        assert!(layer.visible());
        assert!(!layer.locked());
        assert_eq!(layer.radii(), None);
    }

    #[test]
    fn test_from_descriptor() {
        let desc = LayerDescriptor::new(9, "Button")
            .with_origin(ShapeOrigin::Rect)
            .with_visibility(false)
            .with_locking(true);
        let layer = Layer::from_descriptor(&desc, 300.0);

        assert_eq!(layer.id(), LayerId(9));
        assert_eq!(layer.kind(), LayerKind::Vector);
        assert!(!layer.visible());
        assert!(layer.locked());
        assert_eq!(layer.radii(), Some(CornerRadii::default()));
    }

    #[test]
    fn test_group_detection() {
        let layer = Layer::from_descriptor(&LayerDescriptor::group(2, "Group"), 300.0);
        assert!(layer.is_group());
    }
}
