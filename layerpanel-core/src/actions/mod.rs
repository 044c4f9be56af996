//! Mutations the store applies to layer trees

pub mod set_layer_properties;

pub use set_layer_properties::{LayerProperty, SetLayerPropertyAction};
