//! Document layer store
//!
//! The store keeps one [`LayerTree`] per open document and is the only
//! writer of those trees. Events are applied one at a time through `&mut
//! self`; readers get shared borrows or `Arc` snapshots.
//!
//! ## Memory Model
//!
//! Each tree is stored in an `Arc<LayerTree>` so views can hold a snapshot
//! cheaply. When an event mutates a tree, `Arc::make_mut()` provides
//! copy-on-write semantics: if a snapshot is still held elsewhere, the tree
//! is cloned before mutation and the snapshot keeps its old state.

use crate::actions::{LayerProperty, SetLayerPropertyAction};
use crate::application::ActiveDocument;
use crate::config::{StoreConfig, UnknownLayerPolicy};
use crate::descriptor::LayerDescriptor;
use crate::errors::StoreError;
use crate::events::LayerEvent;
use crate::id::{DocumentId, LayerId};
use crate::layer_tree::LayerTree;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle returned by [`LayerStore::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeListener = Box<dyn FnMut() + Send>;

/// Per-document layer trees plus change notification
pub struct LayerStore {
    /// Layer tree of every document that has been loaded
    trees: HashMap<DocumentId, Arc<LayerTree>>,

    config: StoreConfig,

    /// Called after every state change
    listeners: Vec<(SubscriptionId, ChangeListener)>,

    next_subscription: u64,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            trees: HashMap::new(),
            config,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // === QUERIES ===

    /// Get the layer tree of a document
    ///
    /// `None` means the document has not been loaded yet.
    pub fn layer_tree(&self, document_id: DocumentId) -> Option<&LayerTree> {
        self.trees.get(&document_id).map(|tree| tree.as_ref())
    }

    /// Get a cheap snapshot of a document's layer tree
    ///
    /// The snapshot is not affected by later events.
    pub fn layer_tree_snapshot(&self, document_id: DocumentId) -> Option<Arc<LayerTree>> {
        self.trees.get(&document_id).map(Arc::clone)
    }

    /// IDs of all loaded documents
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.trees.keys().copied()
    }

    // === CHANGE NOTIFICATION ===

    /// Register a listener called after every state change
    pub fn subscribe(&mut self, listener: impl FnMut() + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener
    ///
    /// Returns false if the subscription was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit_change(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    // === EVENT HANDLERS ===

    /// Apply an inbound event
    pub fn dispatch(
        &mut self,
        event: LayerEvent,
        active: &impl ActiveDocument,
    ) -> Result<(), StoreError> {
        match event {
            LayerEvent::DocumentUpdated {
                document_id,
                layers,
            } => self.update_document_layers(document_id, &layers),
            LayerEvent::VisibilityChanged { id, visible } => {
                self.set_layer_visibility(active, id, visible)
            }
            LayerEvent::LockChanged { id, locked } => self.set_layer_locking(active, id, locked),
            LayerEvent::DocumentClosed { document_id } => {
                self.close_document(document_id);
                Ok(())
            }
        }
    }

    /// Replace a document's tree with one built from its full layer array
    ///
    /// Any field changes made since the previous reload are discarded. If the
    /// array does not form a valid tree, the previous tree is kept.
    pub fn update_document_layers(
        &mut self,
        document_id: DocumentId,
        layers: &[LayerDescriptor],
    ) -> Result<(), StoreError> {
        let tree =
            LayerTree::from_descriptors_with_resolution(layers, self.config.default_resolution)?;

        log::debug!(
            "Rebuilt layer tree for {} ({} layers)",
            document_id,
            tree.len()
        );
        self.trees.insert(document_id, Arc::new(tree));

        if self.config.emit_change_on_reload {
            self.emit_change();
        }
        Ok(())
    }

    /// Show or hide a layer of the active document
    pub fn set_layer_visibility(
        &mut self,
        active: &impl ActiveDocument,
        layer_id: LayerId,
        visible: bool,
    ) -> Result<(), StoreError> {
        self.set_layer_property(active, layer_id, LayerProperty::Visible(visible))
    }

    /// Lock or unlock a layer of the active document
    pub fn set_layer_locking(
        &mut self,
        active: &impl ActiveDocument,
        layer_id: LayerId,
        locked: bool,
    ) -> Result<(), StoreError> {
        self.set_layer_property(active, layer_id, LayerProperty::Locked(locked))
    }

    /// Drop a document's tree
    ///
    /// Returns true if the document had been loaded.
    pub fn close_document(&mut self, document_id: DocumentId) -> bool {
        if self.trees.remove(&document_id).is_some() {
            log::debug!("Dropped layer tree for {}", document_id);
            self.emit_change();
            true
        } else {
            false
        }
    }

    fn set_layer_property(
        &mut self,
        active: &impl ActiveDocument,
        layer_id: LayerId,
        property: LayerProperty,
    ) -> Result<(), StoreError> {
        let document_id = active
            .current_document_id()
            .ok_or(StoreError::NoActiveDocument)?;
        let tree = self
            .trees
            .get_mut(&document_id)
            .ok_or(StoreError::NoLayerTree(document_id))?;

        // Check before make_mut so a rejected event never clones the tree
        if !tree.contains(layer_id) {
            return match self.config.unknown_layer {
                UnknownLayerPolicy::Error => Err(StoreError::UnknownLayer {
                    document: document_id,
                    layer: layer_id,
                }),
                UnknownLayerPolicy::Ignore => {
                    log::warn!(
                        "Ignoring {:?} for unknown {} in {}",
                        property,
                        layer_id,
                        document_id
                    );
                    Ok(())
                }
            };
        }

        let action = SetLayerPropertyAction::new(layer_id, property);
        let old = action.execute(Arc::make_mut(tree));
        log::trace!("{} in {} (was {:?})", action.description(), document_id, old);

        self.emit_change();
        Ok(())
    }
}

impl std::fmt::Debug for LayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerStore")
            .field("trees", &self.trees)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
