use crate::draw::PenStroke;

use super::{PenTool, ToolState};

impl PenTool {
    /// Composites the in-progress stroke onto `target`.
    ///
    /// # Returns
    /// `true` if a stroke in progress was drawn, `false` otherwise
    pub fn render_in_progress(&self, target: &cairo::Context) -> bool {
        match &self.state {
            ToolState::Drawing {
                scratch: Some(scratch),
                ..
            } => {
                scratch.composite(target);
                true
            }
            _ => false,
        }
    }

    /// Copies the stroke so far for rendering off the input thread.
    ///
    /// The copy is detached, so later samples never affect a render that is
    /// already running.
    pub fn snapshot(&self) -> Option<PenStroke> {
        self.in_progress().cloned()
    }
}
