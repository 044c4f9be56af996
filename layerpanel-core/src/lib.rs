// Layer panel core library
// Mirrors the layer structure of documents open in the host editor

pub mod id;
pub mod unit;
pub mod descriptor;
pub mod radii;
pub mod layer;
pub mod layer_tree;
pub mod actions;
pub mod events;
pub mod application;
pub mod config;
pub mod errors;
pub mod store;

pub use application::ActiveDocument;
pub use config::{StoreConfig, UnknownLayerPolicy};
pub use descriptor::{
    LayerDescriptor, LayerKind, LayerSection, OriginType, ShapeGeometry, ShapeOrigin,
};
pub use errors::{ConfigError, DescriptorError, EventError, StoreError, TreeError};
pub use events::LayerEvent;
pub use id::{DocumentId, LayerId};
pub use layer::Layer;
pub use layer_tree::{LayerNode, LayerTree};
pub use radii::{extract_radii, CornerRadii};
pub use store::{LayerStore, SubscriptionId};
