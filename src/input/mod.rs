//! Input handling: gesture state machine, event types, and display scale.
//!
//! This module translates host pointer and touch events into drawing
//! operations. It defines the gesture phase machine, the drag geometry it
//! records, and the viewport that maps on-screen coordinates into the base
//! image's logical pixel space.

pub mod events;
pub mod gesture;
pub mod viewport;

// Re-export commonly used types at module level
pub use events::{PointerButton, TouchPoint};
pub use gesture::{DragGeometry, GesturePhase};
pub use viewport::{Viewport, ZoomDirection};
