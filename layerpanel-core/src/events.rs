//! Events delivered to the layer store

use crate::descriptor::LayerDescriptor;
use crate::errors::EventError;
use crate::id::{DocumentId, LayerId};
use serde::Deserialize;
use serde_json::Value;

/// An inbound store event
///
/// Serialized payloads carry the event name in a `type` field, e.g.
/// `{"type": "VISIBILITY_CHANGED", "id": 7, "visible": false}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayerEvent {
    /// The host sent the complete layer array of a document
    DocumentUpdated {
        #[serde(rename = "documentID")]
        document_id: DocumentId,
        #[serde(rename = "layerArray")]
        layers: Vec<LayerDescriptor>,
    },
    /// A layer of the active document was shown or hidden
    VisibilityChanged { id: LayerId, visible: bool },
    /// A layer of the active document was locked or unlocked
    LockChanged { id: LayerId, locked: bool },
    /// A document was closed
    DocumentClosed {
        #[serde(rename = "documentID")]
        document_id: DocumentId,
    },
}

impl LayerEvent {
    /// Decode an event from its JSON payload
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        serde_json::from_value(value).map_err(EventError::from)
    }

    /// Event name, as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            LayerEvent::DocumentUpdated { .. } => "DOCUMENT_UPDATED",
            LayerEvent::VisibilityChanged { .. } => "VISIBILITY_CHANGED",
            LayerEvent::LockChanged { .. } => "LOCK_CHANGED",
            LayerEvent::DocumentClosed { .. } => "DOCUMENT_CLOSED",
        }
    }
}
