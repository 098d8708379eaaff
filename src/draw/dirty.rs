//! Dirty region tracking for incremental rendering.
//!
//! Collects axis-aligned rectangles that need repainting between frames.

use crate::util::Rect;

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dirty rectangle; degenerate rectangles are ignored.
    pub fn mark_rect(&mut self, rect: Rect) {
        if rect.is_valid() {
            self.regions.push(rect);
        }
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    /// Drains the dirty regions gathered so far, oldest first.
    pub fn take_regions(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_rectangles_and_skips_degenerate() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_optional_rect(Rect::new(0, 0, 10, 10));
        tracker.mark_optional_rect(None);
        tracker.mark_rect(Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 4,
        });
        tracker.mark_optional_rect(Rect::new(20, 20, 5, 5));

        let rects = tracker.take_regions();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 10, 10).unwrap(),
                Rect::new(20, 20, 5, 5).unwrap()
            ]
        );
        assert!(tracker.take_regions().is_empty());
    }
}
