use crate::draw::{LineSegment, PenStroke, ScratchBuffer, modulated_width};
use crate::input::{ShapeSink, ToolContext, ToolEvent, UserSettings};
use crate::util::{Point, Velocity};
use log::{debug, trace, warn};
use std::time::Instant;

use super::{PenTool, ToolError, ToolState};

impl PenTool {
    /// Dispatches one gesture event to the matching handler.
    ///
    /// Only a drag start can fail; every other event out of sequence is ignored.
    pub fn handle_event(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: ToolEvent,
    ) -> Result<(), ToolError> {
        match event {
            ToolEvent::Tap { point } => self.on_tap(point),
            ToolEvent::DragStart { point } => return self.on_drag_start(ctx.settings, point),
            ToolEvent::DragContinue { point, velocity } => self.on_drag_continue(point, velocity),
            ToolEvent::DragEnd { point } => self.on_drag_end(ctx.sink, point),
            ToolEvent::DragCancel { point } => self.on_drag_cancel(ctx.sink, point),
        }
        Ok(())
    }

    /// Taps do nothing for the pen; a dot comes from a drag with no motion.
    pub fn on_tap(&mut self, point: Point) {
        trace!("pen tap at ({:.1}, {:.1}) ignored", point.x, point.y);
    }

    /// Begins a new stroke at `point` using the current settings.
    ///
    /// Both providers must yield a value now or the drag does not start.
    pub fn on_drag_start(&mut self, settings: &UserSettings, point: Point) -> Result<(), ToolError> {
        if self.is_drawing() {
            return Err(ToolError::NotIdle);
        }

        let timestamp = (self.time)().ok_or(ToolError::TimeUnavailable)?;
        let viewport_tag = (self.viewport)().ok_or(ToolError::ViewportUnavailable)?;

        let mut stroke = PenStroke::begin(
            point,
            settings.stroke_color,
            settings.stroke_width,
            settings.is_eraser,
        );
        stroke.timestamp = timestamp;
        stroke.viewport_tag = viewport_tag;

        let alpha = settings.stroke_color.a * self.opacity;
        let scratch = match ScratchBuffer::new(self.drawing_width, self.drawing_height, alpha) {
            Ok(buffer) => Some(buffer),
            Err(err) => {
                warn!("{err}; in-progress stroke will not be previewed");
                None
            }
        };

        debug!(
            "pen drag start at ({:.1}, {:.1}) width={} eraser={}",
            point.x, point.y, stroke.stroke_width, stroke.is_eraser
        );
        self.state = ToolState::Drawing {
            stroke,
            last_velocity: Velocity::ZERO,
            scratch,
        };
        Ok(())
    }

    /// Extends the stroke to `point` and renders the new segment.
    ///
    /// A sample identical to the previous endpoint adds nothing.
    pub fn on_drag_continue(&mut self, point: Point, velocity: Velocity) {
        let ToolState::Drawing {
            stroke,
            last_velocity,
            scratch,
        } = &mut self.state
        else {
            return;
        };

        let last_point = stroke.last_point();
        if point == last_point {
            trace!("skipping zero-length segment at ({:.1}, {:.1})", point.x, point.y);
            *last_velocity = velocity;
            return;
        }

        let width = if self.velocity_based_width {
            modulated_width(
                stroke.stroke_width,
                velocity,
                *last_velocity,
                stroke.last_width(),
            )
        } else {
            stroke.stroke_width
        };

        let mut segment = LineSegment::new(last_point, point, width);
        segment.timestamp = (self.time)();
        segment.viewport_tag = (self.viewport)();
        stroke.add_segment(segment);
        *last_velocity = velocity;

        let Some(scratch) = scratch else {
            return;
        };

        let started = Instant::now();
        if self.progressive_render {
            scratch.render_latest(stroke);
            self.dirty.mark_optional_rect(stroke.latest_damage_rect());
        } else {
            scratch.render_full(stroke);
            self.dirty.mark_optional_rect(stroke.damage_rect());
        }
        if let Some(observer) = &self.observer {
            observer.render_completed(
                self.progressive_render,
                stroke.segments().len(),
                started.elapsed(),
            );
        }
    }

    /// Seals the stroke and hands it to `sink`, then returns to idle.
    ///
    /// The scratch buffer is destroyed with the drawing state.
    pub fn on_drag_end(&mut self, sink: &mut dyn ShapeSink, point: Point) {
        let ToolState::Drawing { mut stroke, .. } =
            std::mem::replace(&mut self.state, ToolState::Idle)
        else {
            return;
        };

        stroke.finish();
        self.dirty.mark_optional_rect(stroke.damage_rect());
        debug!(
            "pen drag end at ({:.1}, {:.1}) with {} segments",
            point.x,
            point.y,
            stroke.segments().len()
        );
        sink.add_shape(stroke);
    }

    /// Cancellation keeps whatever was drawn: it ends the stroke normally.
    pub fn on_drag_cancel(&mut self, sink: &mut dyn ShapeSink, point: Point) {
        self.on_drag_end(sink, point);
    }
}
