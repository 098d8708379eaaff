//! Collaborators a tool consults while handling gestures.

use crate::config::Config;
use crate::draw::{Color, PenStroke};

/// Current user-chosen drawing settings, read at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserSettings {
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub is_eraser: bool,
}

impl UserSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            stroke_color: config.pen.default_color.to_color(),
            stroke_width: config.pen.default_width,
            is_eraser: config.pen.eraser,
        }
    }
}

/// Receives finished strokes and takes ownership of them (e.g. an undo stack).
pub trait ShapeSink {
    fn add_shape(&mut self, stroke: PenStroke);
}

/// Everything a tool needs from its host for one event.
pub struct ToolContext<'a> {
    pub settings: &'a UserSettings,
    pub sink: &'a mut dyn ShapeSink,
}

impl<'a> ToolContext<'a> {
    pub fn new(settings: &'a UserSettings, sink: &'a mut dyn ShapeSink) -> Self {
        Self { settings, sink }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLUE;

    #[test]
    fn settings_follow_pen_config() {
        let mut config = Config::default();
        assert!(!UserSettings::from_config(&config).is_eraser);

        config.pen.default_color = crate::config::ColorSpec::Name("blue".into());
        config.pen.default_width = 3.0;
        config.pen.eraser = true;
        let settings = UserSettings::from_config(&config);
        assert_eq!(settings.stroke_color, BLUE);
        assert_eq!(settings.stroke_width, 3.0);
        assert!(settings.is_eraser);
    }
}
