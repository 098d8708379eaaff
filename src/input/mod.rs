//! Input handling and the pen tool state machine.
//!
//! This module translates discrete gesture events into stroke mutations. It
//! owns the stroke currently being drawn and its scratch buffer, and hands
//! finished strokes to a [`ShapeSink`].

pub mod context;
pub mod events;
pub mod state;

// Re-export commonly used types at module level
pub use context::{ShapeSink, ToolContext, UserSettings};
pub use events::ToolEvent;
pub use state::{PenTool, TimeProvider, ToolError, ToolState, ViewportProvider, system_time_provider};
