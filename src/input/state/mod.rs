mod core;
mod pointer;
mod render;

pub use core::{PenTool, TimeProvider, ToolError, ToolState, ViewportProvider, system_time_provider};
