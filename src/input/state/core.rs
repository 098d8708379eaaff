//! Pen tool state machine and its configuration.

use crate::config::Config;
use crate::draw::{DirtyTracker, PenStroke, RenderObserver, ScratchBuffer};
use crate::util::{Rect, Velocity};
use chrono::Utc;
use thiserror::Error;

/// Zero-argument clock. Returning `None` prevents a gesture from starting.
pub type TimeProvider = Box<dyn Fn() -> Option<f64>>;

/// Zero-argument viewport tag source. Returning `None` prevents a gesture from starting.
pub type ViewportProvider = Box<dyn Fn() -> Option<String>>;

/// Wall-clock provider: seconds since the Unix epoch.
pub fn system_time_provider() -> TimeProvider {
    Box::new(|| {
        let now = Utc::now();
        Some(now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0)
    })
}

/// Reasons a drag cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("a stroke is already in progress")]
    NotIdle,
    #[error("time provider returned no value")]
    TimeUnavailable,
    #[error("viewport provider returned no value")]
    ViewportUnavailable,
}

/// Current gesture state.
#[derive(Debug)]
pub enum ToolState {
    /// Waiting for a drag to start
    Idle,
    /// A drag is in progress
    Drawing {
        /// The stroke being built; only this tool mutates it
        stroke: PenStroke,
        /// Velocity reported with the previous sample
        last_velocity: Velocity,
        /// In-progress pixels; dropped together with this state
        scratch: Option<ScratchBuffer>,
    },
}

/// Freehand pen tool.
///
/// Drives a [`PenStroke`] through `Idle -> Drawing -> Idle`, appending one
/// segment per distinct pointer sample and rendering each new segment into an
/// owned scratch buffer. Settings are captured once at drag start.
pub struct PenTool {
    pub(super) state: ToolState,
    pub(super) time: TimeProvider,
    pub(super) viewport: ViewportProvider,
    /// Narrow the stroke as the pointer speeds up
    pub velocity_based_width: bool,
    /// Render only the newest segment per sample instead of the whole stroke
    pub progressive_render: bool,
    /// Logical drawing size, used to size the scratch buffer
    pub drawing_width: i32,
    pub drawing_height: i32,
    /// Opacity applied when compositing the scratch buffer
    pub opacity: f64,
    pub(super) dirty: DirtyTracker,
    pub(super) observer: Option<Box<dyn RenderObserver>>,
}

impl std::fmt::Debug for PenTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PenTool")
            .field("state", &self.state)
            .field("velocity_based_width", &self.velocity_based_width)
            .field("progressive_render", &self.progressive_render)
            .field("drawing_width", &self.drawing_width)
            .field("drawing_height", &self.drawing_height)
            .field("opacity", &self.opacity)
            .finish_non_exhaustive()
    }
}

impl PenTool {
    /// Creates an idle tool with flat width, progressive rendering and an
    /// empty drawing size (the scratch buffer is then one pixel).
    pub fn new(time: TimeProvider, viewport: ViewportProvider) -> Self {
        Self {
            state: ToolState::Idle,
            time,
            viewport,
            velocity_based_width: false,
            progressive_render: true,
            drawing_width: 0,
            drawing_height: 0,
            opacity: 1.0,
            dirty: DirtyTracker::new(),
            observer: None,
        }
    }

    /// Creates an idle tool using the pen and surface sections of `config`.
    pub fn from_config(config: &Config, time: TimeProvider, viewport: ViewportProvider) -> Self {
        let mut tool = Self::new(time, viewport);
        tool.velocity_based_width = config.pen.velocity_based_width;
        tool.progressive_render = config.pen.progressive_render;
        tool.set_drawing_size(config.surface.width, config.surface.height);
        tool.opacity = config.surface.opacity;
        tool
    }

    pub fn set_drawing_size(&mut self, width: u32, height: u32) {
        self.drawing_width = width.min(i32::MAX as u32) as i32;
        self.drawing_height = height.min(i32::MAX as u32) as i32;
    }

    /// Installs a hook that is told how long each in-progress render took.
    pub fn set_render_observer(&mut self, observer: Option<Box<dyn RenderObserver>>) {
        self.observer = observer;
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// The stroke being drawn, if any.
    pub fn in_progress(&self) -> Option<&PenStroke> {
        match &self.state {
            ToolState::Drawing { stroke, .. } => Some(stroke),
            ToolState::Idle => None,
        }
    }

    /// Drains damage rectangles produced since the last call.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        self.dirty.take_regions()
    }
}
