use crate::id::{DocumentId, LayerId};
use thiserror::Error;

/// A raw payload could not be read as a layer descriptor
#[derive(Error, Debug)]
#[error("Invalid layer descriptor: {0}")]
pub struct DescriptorError(#[from] serde_json::Error);

/// A raw payload could not be read as a store event
#[derive(Error, Debug)]
#[error("Invalid store event: {0}")]
pub struct EventError(#[from] serde_json::Error);

/// The flat layer array does not describe a well-formed tree
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("Duplicate {0} in layer array")]
    DuplicateLayer(LayerId),
    #[error("Group {0} has no matching section end marker")]
    UnmatchedGroupStart(LayerId),
    #[error("{0} unclosed group(s) at the top of the layer array")]
    UnclosedGroup(usize),
}

/// A store event could not be applied
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("No active document")]
    NoActiveDocument,
    #[error("No layer tree for {0}")]
    NoLayerTree(DocumentId),
    #[error("Unknown {layer} in {document}")]
    UnknownLayer { document: DocumentId, layer: LayerId },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Store configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
