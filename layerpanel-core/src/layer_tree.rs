//! Hierarchical layer tree
//!
//! A [`LayerTree`] mirrors the layer structure of one host document. It is
//! rebuilt from the host's flat layer array, where groups are delimited by
//! section markers, and keeps every node in a flat map keyed by [`LayerId`] so
//! a single layer can be addressed without walking the hierarchy.
//!
//! Root and child lists are kept in host order, bottom-most layer first.

use crate::descriptor::{LayerDescriptor, LayerSection};
use crate::errors::TreeError;
use crate::id::LayerId;
use crate::layer::Layer;
use crate::unit::DEFAULT_RESOLUTION;
use std::collections::HashMap;

/// Node in the layer tree
#[derive(Clone, Debug, PartialEq)]
pub struct LayerNode {
    /// The layer data
    pub layer: Layer,

    /// Enclosing group, `None` for root layers
    pub parent: Option<LayerId>,

    /// Child layers, bottom-most first
    pub children: Vec<LayerId>,
}

impl LayerNode {
    /// Create a new layer node
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Get the layer ID
    pub fn id(&self) -> LayerId {
        self.layer.id()
    }

    /// Get number of children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Layer tree of a single document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerTree {
    /// Root layers (no parent), bottom-most first
    roots: Vec<LayerId>,

    /// Every node of the tree, keyed by layer ID
    layer_set: HashMap<LayerId, LayerNode>,
}

impl LayerTree {
    /// Create a new empty layer tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from the host's flat layer array
    ///
    /// Uses the default resolution of 300 for shapes without a stroke
    /// resolution.
    pub fn from_descriptors(descriptors: &[LayerDescriptor]) -> Result<Self, TreeError> {
        Self::from_descriptors_with_resolution(descriptors, DEFAULT_RESOLUTION)
    }

    /// Build a tree from the host's flat layer array
    ///
    /// The array is ordered bottom-to-top. A group's end marker comes before
    /// its children and the group layer itself comes after them, so a marker
    /// opens a scope and the group layer closes it. End markers do not become
    /// nodes.
    pub fn from_descriptors_with_resolution(
        descriptors: &[LayerDescriptor],
        default_resolution: f64,
    ) -> Result<Self, TreeError> {
        let mut layer_set: HashMap<LayerId, LayerNode> = HashMap::with_capacity(descriptors.len());
        let mut scopes: Vec<Vec<LayerId>> = vec![Vec::new()];

        for descriptor in descriptors {
            let id = descriptor.id;
            let node = match descriptor.section {
                LayerSection::GroupEnd => {
                    scopes.push(Vec::new());
                    continue;
                }
                LayerSection::Content => {
                    LayerNode::new(Layer::from_descriptor(descriptor, default_resolution))
                }
                LayerSection::GroupStart => {
                    if scopes.len() < 2 {
                        return Err(TreeError::UnmatchedGroupStart(id));
                    }
                    let mut node =
                        LayerNode::new(Layer::from_descriptor(descriptor, default_resolution));
                    node.children = scopes.pop().unwrap_or_default();
                    node
                }
            };

            if layer_set.contains_key(&id) {
                return Err(TreeError::DuplicateLayer(id));
            }

            for child in &node.children {
                if let Some(child) = layer_set.get_mut(child) {
                    child.parent = Some(id);
                }
            }

            layer_set.insert(id, node);
            if let Some(scope) = scopes.last_mut() {
                scope.push(id);
            }
        }

        if scopes.len() > 1 {
            return Err(TreeError::UnclosedGroup(scopes.len() - 1));
        }

        Ok(Self {
            roots: scopes.pop().unwrap_or_default(),
            layer_set,
        })
    }

    /// Root layer IDs, bottom-most first
    pub fn roots(&self) -> &[LayerId] {
        &self.roots
    }

    /// Look up a node by ID
    pub fn get(&self, id: LayerId) -> Option<&LayerNode> {
        self.layer_set.get(&id)
    }

    /// Look up a layer by ID
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.get(id).map(|node| &node.layer)
    }

    /// Get mutable access to a layer by ID
    ///
    /// This method is intentionally `pub(crate)` to ensure mutations
    /// only happen through the store.
    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layer_set.get_mut(&id).map(|node| &mut node.layer)
    }

    /// Whether the tree contains a layer
    pub fn contains(&self, id: LayerId) -> bool {
        self.layer_set.contains_key(&id)
    }

    /// Child IDs of a layer, empty for unknown or non-group layers
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Parent ID of a layer
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Number of layers in the tree
    pub fn len(&self) -> usize {
        self.layer_set.len()
    }

    /// Whether the tree has no layers
    pub fn is_empty(&self) -> bool {
        self.layer_set.is_empty()
    }

    /// Iterate over all layers in no particular order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layer_set.values().map(|node| &node.layer)
    }

    /// Layers whose own visibility flag is set
    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers().filter(|layer| layer.visible())
    }

    /// Walk the tree in panel order: top-most layer first, groups before
    /// their children. Yields each node with its nesting depth.
    pub fn walk(&self) -> Vec<(usize, &LayerNode)> {
        let mut out = Vec::with_capacity(self.layer_set.len());
        // Pushing bottom-to-top makes the top-most sibling pop first
        let mut stack: Vec<(usize, LayerId)> = self.roots.iter().map(|id| (0, *id)).collect();

        while let Some((depth, id)) = stack.pop() {
            if let Some(node) = self.get(id) {
                out.push((depth, node));
                stack.extend(node.children.iter().map(|child| (depth + 1, *child)));
            }
        }

        out
    }

    /// Whether a layer and all of its ancestors are visible
    pub fn is_effectively_visible(&self, id: LayerId) -> bool {
        self.contains(id) && self.ancestors_and_self(id).all(|layer| layer.visible())
    }

    /// Whether a layer or any of its ancestors is locked
    pub fn is_effectively_locked(&self, id: LayerId) -> bool {
        self.ancestors_and_self(id).any(|layer| layer.locked())
    }

    fn ancestors_and_self(&self, id: LayerId) -> impl Iterator<Item = &Layer> {
        let mut next = self.get(id);
        std::iter::from_fn(move || {
            let node = next?;
            next = node.parent.and_then(|parent| self.get(parent));
            Some(&node.layer)
        })
    }
}
