//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pen settings.
///
/// Controls the default appearance of the pen and how strokes are built.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PenConfig {
    /// Default pen color - a named color, a `#rrggbb` hex string, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Narrow the stroke as the pointer moves faster
    #[serde(default)]
    pub velocity_based_width: bool,

    /// Start with the eraser selected: strokes clear pixels instead of painting
    #[serde(default)]
    pub eraser: bool,

    /// Render only the newest segment on each pointer sample.
    /// Set to false to re-render the whole stroke on every sample.
    #[serde(default = "default_progressive_render")]
    pub progressive_render: bool,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            velocity_based_width: false,
            eraser: false,
            progressive_render: default_progressive_render(),
        }
    }
}

/// Drawing surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Logical drawing width in pixels (minimum 1)
    #[serde(default = "default_surface_width")]
    pub width: u32,

    /// Logical drawing height in pixels (minimum 1)
    #[serde(default = "default_surface_height")]
    pub height: u32,

    /// Opacity used when compositing the stroke being drawn (0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
            opacity: default_opacity(),
        }
    }
}

/// Finished-shape storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FrameConfig {
    /// Maximum number of finished shapes kept (0 = unlimited)
    #[serde(default)]
    pub max_shapes: usize,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_width() -> f64 {
    10.0
}

fn default_progressive_render() -> bool {
    true
}

fn default_surface_width() -> u32 {
    1920
}

fn default_surface_height() -> u32 {
    1080
}

fn default_opacity() -> f64 {
    1.0
}
