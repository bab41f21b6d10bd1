//! Layer management and compositing.
//!
//! This module owns the per-layer raster surfaces:
//! - [`Layer`]: one annotation with stable identity and an owned surface
//! - [`LayerStack`]: append-ordered z-stack with id-based removal
//! - [`compose`]: flattens the base image and stack for export

pub mod compose;
pub mod layer;
pub mod stack;

// Re-export commonly used types at module level
pub use compose::compose;
pub use layer::Layer;
pub use stack::LayerStack;
