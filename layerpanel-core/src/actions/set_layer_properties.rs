//! Set layer properties action
//!
//! Handles narrow, field-scoped changes to a single layer (visibility and
//! locking). The rest of the tree is left untouched.

use crate::id::LayerId;
use crate::layer::Layer;
use crate::layer_tree::LayerTree;

/// Property that can be set on a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerProperty {
    Visible(bool),
    Locked(bool),
}

impl LayerProperty {
    /// Current value of this property on `layer`, as the same variant
    fn read(&self, layer: &Layer) -> LayerProperty {
        match self {
            LayerProperty::Visible(_) => LayerProperty::Visible(layer.visible()),
            LayerProperty::Locked(_) => LayerProperty::Locked(layer.locked()),
        }
    }

    fn write(&self, layer: &mut Layer) {
        match *self {
            LayerProperty::Visible(v) => layer.set_visible(v),
            LayerProperty::Locked(l) => layer.set_locked(l),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LayerProperty::Visible(_) => "visibility",
            LayerProperty::Locked(_) => "lock",
        }
    }
}

/// Action that sets a property on one layer of a tree
#[derive(Clone, Debug)]
pub struct SetLayerPropertyAction {
    /// ID of the layer to modify
    layer_id: LayerId,

    /// Property to set
    property: LayerProperty,
}

impl SetLayerPropertyAction {
    /// Create a new action to set a property on a single layer
    pub fn new(layer_id: LayerId, property: LayerProperty) -> Self {
        Self { layer_id, property }
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    pub fn property(&self) -> LayerProperty {
        self.property
    }

    /// Apply the property to the tree
    ///
    /// Returns the previous value, or `None` if the tree has no such layer
    /// (in which case nothing is changed).
    pub fn execute(&self, tree: &mut LayerTree) -> Option<LayerProperty> {
        let layer = tree.layer_mut(self.layer_id)?;
        let old = self.property.read(layer);
        self.property.write(layer);
        Some(old)
    }

    /// Human-readable description (for logs)
    pub fn description(&self) -> String {
        format!("Set layer {} on {}", self.property.name(), self.layer_id)
    }
}
