//! Off-screen buffer holding the stroke currently being drawn.
//!
//! The in-progress stroke is rasterized here with opaque color and then
//! composited onto the visible surface with the user's alpha, so overlapping
//! segment caps never double-blend.

use super::pen::PenStroke;
use super::render::render_pen_stroke;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to create scratch buffer: {0}")]
pub struct ScratchError(#[from] cairo::Error);

/// Owned ARGB surface the size of the drawing area.
pub struct ScratchBuffer {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
    alpha: f64,
}

impl std::fmt::Debug for ScratchBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchBuffer")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("alpha", &self.alpha)
            .finish()
    }
}

impl ScratchBuffer {
    /// Allocates a transparent buffer. Sizes below one pixel are raised to one.
    pub fn new(width: i32, height: i32, alpha: f64) -> Result<Self, ScratchError> {
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))?;
        let ctx = cairo::Context::new(&surface)?;
        Ok(Self {
            surface,
            ctx,
            alpha: alpha.clamp(0.0, 1.0),
        })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Draws only the newest segment on top of what is already buffered.
    pub fn render_latest(&self, stroke: &PenStroke) {
        render_pen_stroke(&self.ctx, stroke, true);
    }

    /// Clears the buffer and draws the whole stroke.
    pub fn render_full(&self, stroke: &PenStroke) {
        self.clear();
        render_pen_stroke(&self.ctx, stroke, false);
    }

    pub fn clear(&self) {
        let _ = self.ctx.save();
        self.ctx.set_operator(cairo::Operator::Clear);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();
    }

    /// Paints the buffer onto `target` at the origin with the buffer's alpha.
    pub fn composite(&self, target: &cairo::Context) {
        let _ = target.save();
        if target
            .set_source_surface(&self.surface, 0.0, 0.0)
            .is_ok()
        {
            let _ = target.paint_with_alpha(self.alpha);
        }
        let _ = target.restore();
    }

    /// Exposes the buffered pixels (ARGB32 rows of `stride` bytes) to `inspect`.
    pub fn with_data<R>(&self, inspect: impl FnOnce(&[u8], i32) -> R) -> Option<R> {
        let stride = self.surface.stride();
        let mut result = None;
        self.surface
            .with_data(|data| result = Some(inspect(data, stride)))
            .ok()?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;
    use crate::draw::pen::LineSegment;
    use crate::util::Point;

    fn painted(buffer: &ScratchBuffer) -> bool {
        buffer
            .with_data(|data, _| data.iter().any(|byte| *byte != 0))
            .unwrap_or(false)
    }

    #[test]
    fn tiny_sizes_are_raised() {
        let buffer = ScratchBuffer::new(0, -3, 2.0).expect("buffer");
        assert_eq!((buffer.width(), buffer.height()), (1, 1));
        assert_eq!(buffer.alpha(), 1.0);
    }

    #[test]
    fn render_then_clear() {
        let buffer = ScratchBuffer::new(32, 32, 0.5).expect("buffer");
        let mut stroke = PenStroke::begin(Point::new(4.0, 4.0), BLACK, 3.0, false);
        stroke.add_segment(LineSegment::new(Point::new(4.0, 4.0), Point::new(28.0, 28.0), 3.0));

        buffer.render_latest(&stroke);
        assert!(painted(&buffer));

        buffer.clear();
        assert!(!painted(&buffer));
    }
}
