//! Gesture phase state machine for pointer and touch drawing.

use crate::tools::ToolKind;

/// Drag geometry in logical pixel space.
///
/// Both endpoints are stored at one-decimal precision in the base image's
/// native resolution, independent of the on-screen zoom level. Tools read
/// whichever endpoints they care about; single-point tools use only the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGeometry {
    /// Starting X coordinate (where the gesture began)
    pub start_x: f64,
    /// Starting Y coordinate (where the gesture began)
    pub start_y: f64,
    /// Current/final X coordinate
    pub end_x: f64,
    /// Current/final Y coordinate
    pub end_y: f64,
}

impl DragGeometry {
    /// Starts a drag at a single point; start and end coincide.
    pub fn at_point(x: f64, y: f64) -> Self {
        Self {
            start_x: x,
            start_y: y,
            end_x: x,
            end_y: y,
        }
    }

    /// Builds a drag with both endpoints known up front (two-finger touch).
    pub fn with_endpoints(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Moves the end point, leaving the start in place.
    pub fn set_end(&mut self, x: f64, y: f64) {
        self.end_x = x;
        self.end_y = y;
    }
}

/// Current gesture phase.
///
/// One instance lives inside each editor; no gesture state is shared
/// process-wide. Transitions happen synchronously as the editor processes
/// input events, so a gesture can never be interleaved with another.
#[derive(Debug)]
pub enum GesturePhase {
    /// Not drawing - waiting for a pointer press or two-finger touch
    Idle,
    /// A drag is in flight and live-redrawing its provisional layer
    Dragging {
        /// Tool bound at gesture start; tool switches don't affect it
        tool: ToolKind,
        /// Arena id of the provisional layer being redrawn
        layer_id: u32,
        /// Current drag endpoints in logical space
        geom: DragGeometry,
    },
}

impl GesturePhase {
    /// Whether a gesture is currently in flight.
    pub fn is_dragging(&self) -> bool {
        matches!(self, GesturePhase::Dragging { .. })
    }
}
