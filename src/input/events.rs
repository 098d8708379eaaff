//! Discrete gesture events delivered to drawing tools.

use crate::util::{Point, Velocity};
use serde::{Deserialize, Serialize};

/// A recognized pointer gesture step.
///
/// The gesture layer guarantees ordering (start, continue*, end|cancel) but
/// tools must tolerate anything arriving out of order.
///
/// Serialized form, as used by replay logs:
/// ```json
/// { "event": "drag-continue", "point": {"x": 4.0, "y": 2.0}, "velocity": {"x": 120.0, "y": 0.0} }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ToolEvent {
    /// Press and release without movement
    Tap { point: Point },
    /// Pointer pressed and started moving
    DragStart { point: Point },
    /// Pointer moved while pressed
    DragContinue {
        point: Point,
        /// Pointer velocity in units per second
        #[serde(default)]
        velocity: Velocity,
    },
    /// Pointer released
    DragEnd { point: Point },
    /// Gesture interrupted by the system
    DragCancel { point: Point },
}

impl ToolEvent {
    pub fn point(&self) -> Point {
        match self {
            ToolEvent::Tap { point }
            | ToolEvent::DragStart { point }
            | ToolEvent::DragContinue { point, .. }
            | ToolEvent::DragEnd { point }
            | ToolEvent::DragCancel { point } => *point,
        }
    }
}
