//! Cairo-based rendering functions for shapes.

use super::pen::PenStroke;
use super::shape::Shape;
use crate::util::Point;
use log::debug;
use std::time::Duration;

/// Receives timing information for stroke renders.
///
/// Install one on the pen tool to measure interactive redraw cost without
/// wiring clocks into the renderer itself.
pub trait RenderObserver {
    fn render_completed(&self, only_latest: bool, segments: usize, elapsed: Duration);
}

/// Reports render timings through the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderObserver;

impl RenderObserver for LogRenderObserver {
    fn render_completed(&self, only_latest: bool, segments: usize, elapsed: Duration) {
        debug!(
            "pen render: only_latest={only_latest} segments={segments} took {:.3} ms",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

/// Renders all shapes in a collection to a Cairo context.
///
/// Shapes are drawn in the order they appear (first shape = bottom layer).
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders a single shape to a Cairo context.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Pen(stroke) => render_pen_stroke(ctx, stroke, false),
    }
}

/// Renders a pen stroke with midpoint smoothing.
///
/// Consecutive segment midpoints are joined by quadratic curves whose control
/// point is the shared sample, which rounds every corner. The first segment
/// contributes a straight run from its start to its midpoint; a finished
/// stroke additionally runs from the last midpoint to the true endpoint.
///
/// With `only_latest` set, only the newest segment is drawn, using the
/// segment before it as smoothing context. Drawing a stroke's prefix and then
/// each newest segment in turn covers the same pixels as one full render.
///
/// Eraser strokes use `Operator::Clear`; the operator and all other context
/// state are restored before returning.
pub fn render_pen_stroke(ctx: &cairo::Context, stroke: &PenStroke, only_latest: bool) {
    let _ = ctx.save();
    if stroke.is_eraser {
        ctx.set_operator(cairo::Operator::Clear);
    }
    let color = stroke.stroke_color;
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.new_path();

    let segments = stroke.segments();
    if segments.is_empty() {
        // A tap leaves a dot; an unfinished empty stroke draws nothing yet.
        if stroke.is_finished() {
            let Point { x, y } = stroke.start;
            ctx.arc(x, y, stroke.stroke_width / 2.0, 0.0, std::f64::consts::PI * 2.0);
            let _ = ctx.fill();
        }
        let _ = ctx.restore();
        return;
    }

    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let last_index = segments.len() - 1;
    let first_index = if only_latest { last_index } else { 0 };
    let mut previous = first_index.checked_sub(1).map(|i| &segments[i]);
    let mut path_width: Option<f64> = None;

    for (index, segment) in segments.iter().enumerate().skip(first_index) {
        // Line width is fixed per stroke call, so flush the pending path
        // before switching.
        if path_width.is_some_and(|width| width != segment.width) {
            let _ = ctx.stroke();
        }
        ctx.set_line_width(segment.width);
        path_width = Some(segment.width);

        match previous {
            Some(prev) => {
                let from = prev.midpoint();
                ctx.move_to(from.x, from.y);
                quad_to(ctx, from, segment.a, segment.midpoint());
                if index == last_index && stroke.is_finished() {
                    ctx.line_to(segment.b.x, segment.b.y);
                }
            }
            None if segments.len() == 1 => {
                ctx.move_to(segment.a.x, segment.a.y);
                ctx.line_to(segment.b.x, segment.b.y);
            }
            None => {
                let mid = segment.midpoint();
                ctx.move_to(segment.a.x, segment.a.y);
                ctx.line_to(mid.x, mid.y);
            }
        }

        previous = Some(segment);
    }

    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Appends a quadratic Bézier from `from` as its exact cubic equivalent.
fn quad_to(ctx: &cairo::Context, from: Point, control: Point, to: Point) {
    const TWO_THIRDS: f64 = 2.0 / 3.0;
    let c1x = from.x + TWO_THIRDS * (control.x - from.x);
    let c1y = from.y + TWO_THIRDS * (control.y - from.y);
    let c2x = to.x + TWO_THIRDS * (control.x - to.x);
    let c2y = to.y + TWO_THIRDS * (control.y - to.y);
    ctx.curve_to(c1x, c1y, c2x, c2y, to.x, to.y);
}
