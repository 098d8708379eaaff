//! Stroke model, persisted records and Cairo rendering.
//!
//! This module defines the core drawing types:
//! - [`PenStroke`] / [`LineSegment`]: the freehand stroke model
//! - [`Shape`] / [`ShapeRegistry`]: tagged persisted shapes and their decoders
//! - [`Frame`]: finished shapes with undo/redo
//! - [`modulated_width`]: velocity-based width modulation
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod dirty;
pub mod frame;
pub mod pen;
pub mod render;
pub mod scratch;
pub mod shape;
pub mod width;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use frame::Frame;
pub use pen::{LineSegment, PenStroke};
pub use render::{LogRenderObserver, RenderObserver, render_pen_stroke, render_shape, render_shapes};
pub use scratch::{ScratchBuffer, ScratchError};
pub use shape::{DecodeError, Shape, ShapeRegistry};
pub use width::modulated_width;
