//! Freehand stroke capture and variable-width rendering.
//!
//! The crate turns a stream of pointer gestures into smoothed, optionally
//! velocity-modulated pen strokes, renders them with Cairo, and persists them
//! as tagged JSON records.
//!
//! - [`draw`]: stroke model, width modulation, rendering and persistence
//! - [`input`]: the pen tool state machine fed by gesture events
//! - [`config`]: TOML settings shared by the library and the binary

pub mod config;
pub mod draw;
pub mod input;
pub mod util;

pub use config::Config;
