//! Freehand pen stroke model.

use super::color::Color;
use crate::util::{Bounds, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One straight piece between two consecutive pointer samples.
///
/// The midpoint is always derived from the endpoints and never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub a: Point,
    pub b: Point,
    /// Stroke width for this piece
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_tag: Option<String>,
}

impl LineSegment {
    pub fn new(a: Point, b: Point, width: f64) -> Self {
        Self {
            a,
            b,
            width,
            timestamp: None,
            viewport_tag: None,
        }
    }

    pub fn midpoint(&self) -> Point {
        Point::midpoint(self.a, self.b)
    }
}

/// A freehand stroke: ordered segments plus stroke-level metadata.
///
/// Segments are append-only while the stroke is unfinished and are never
/// edited in place. Once [`PenStroke::finish`] has been called the stroke
/// rejects further segments.
#[derive(Clone, Debug, PartialEq)]
pub struct PenStroke {
    /// Opaque identifier, stable for the stroke's lifetime
    pub id: String,
    pub(crate) is_finished: bool,
    /// Anchor used to draw a dot when the stroke has no segments
    pub start: Point,
    /// Stroke color, stored opaque
    pub stroke_color: Color,
    /// Nominal pen width
    pub stroke_width: f64,
    pub(crate) segments: Vec<LineSegment>,
    /// Render with clear compositing instead of source-over
    pub is_eraser: bool,
    pub timestamp: f64,
    pub viewport_tag: String,
}

impl Default for PenStroke {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            is_finished: true,
            start: Point::ZERO,
            stroke_color: super::color::BLACK,
            stroke_width: 10.0,
            segments: Vec::new(),
            is_eraser: false,
            timestamp: 0.0,
            viewport_tag: String::new(),
        }
    }
}

impl PenStroke {
    /// Starts an unfinished stroke anchored at `start` with a fresh id.
    pub fn begin(start: Point, color: Color, width: f64, is_eraser: bool) -> Self {
        Self {
            is_finished: false,
            start,
            stroke_color: color.with_full_alpha().quantized(),
            stroke_width: width,
            is_eraser,
            ..Self::default()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Appends a segment. Returns `false` (and drops it) once finished.
    pub fn add_segment(&mut self, segment: LineSegment) -> bool {
        if self.is_finished {
            return false;
        }
        self.segments.push(segment);
        true
    }

    /// Seals the stroke. Has no effect when already finished.
    pub fn finish(&mut self) {
        self.is_finished = true;
    }

    /// Endpoint of the newest segment, or the start anchor.
    pub fn last_point(&self) -> Point {
        self.segments.last().map_or(self.start, |segment| segment.b)
    }

    /// Width of the newest segment, or the base width.
    pub fn last_width(&self) -> f64 {
        self.segments
            .last()
            .map_or(self.stroke_width, |segment| segment.width)
    }

    /// Min/max envelope over both endpoints of every segment.
    ///
    /// Zero-size at the origin when there are no segments.
    pub fn bounding_box(&self) -> Bounds {
        Bounds::enclosing(self.segments.iter().flat_map(|s| [s.a, s.b]))
    }

    /// Pixel area the rendered stroke may touch.
    ///
    /// Covers the dot for a finished tap and pads segment geometry by half of
    /// the widest segment so round caps are included.
    pub fn damage_rect(&self) -> Option<Rect> {
        if self.segments.is_empty() {
            if !self.is_finished {
                return None;
            }
            return Bounds::enclosing([self.start]).to_rect(self.stroke_width / 2.0 + 1.0);
        }

        let widest = self
            .segments
            .iter()
            .map(|segment| segment.width)
            .fold(0.0_f64, f64::max);
        self.bounding_box().to_rect(widest / 2.0 + 1.0)
    }

    /// Damage area of the newest segment's incremental render.
    ///
    /// The only-latest render spans from the previous segment's midpoint to
    /// the newest segment's endpoint, so both are covered.
    pub fn latest_damage_rect(&self) -> Option<Rect> {
        let latest = self.segments.last()?;
        let mut points = vec![latest.a, latest.b];
        if let Some(previous) = self.segments.len().checked_sub(2).map(|i| &self.segments[i]) {
            points.push(previous.midpoint());
        }
        Bounds::enclosing(points).to_rect(latest.width / 2.0 + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> LineSegment {
        LineSegment::new(Point::new(ax, ay), Point::new(bx, by), 4.0)
    }

    #[test]
    fn bounding_box_covers_all_endpoints() {
        let mut stroke = PenStroke::begin(Point::ZERO, RED, 4.0, false);
        stroke.add_segment(seg(0.0, 0.0, 4.0, 2.0));
        stroke.add_segment(seg(4.0, 2.0, 10.0, 0.0));

        let bounds = stroke.bounding_box();
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 10.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 2.0);
    }

    #[test]
    fn empty_stroke_has_zero_box_at_origin() {
        let stroke = PenStroke::begin(Point::new(50.0, 60.0), RED, 4.0, false);
        assert_eq!(stroke.bounding_box(), Bounds::default());
    }

    #[test]
    fn begin_forces_opaque_color() {
        let translucent = Color { a: 0.4, ..BLUE };
        let stroke = PenStroke::begin(Point::ZERO, translucent, 6.0, true);
        assert_eq!(stroke.stroke_color, BLUE);
        assert!(!stroke.is_finished());
        assert!(stroke.is_eraser);
    }

    #[test]
    fn finished_stroke_rejects_segments() {
        let mut stroke = PenStroke::begin(Point::ZERO, RED, 4.0, false);
        assert!(stroke.add_segment(seg(0.0, 0.0, 1.0, 1.0)));
        stroke.finish();
        assert!(!stroke.add_segment(seg(1.0, 1.0, 2.0, 2.0)));
        assert_eq!(stroke.segments().len(), 1);
    }

    #[test]
    fn last_point_falls_back_to_start() {
        let mut stroke = PenStroke::begin(Point::new(3.0, 4.0), RED, 4.0, false);
        assert_eq!(stroke.last_point(), Point::new(3.0, 4.0));
        assert_eq!(stroke.last_width(), 4.0);
        stroke.add_segment(LineSegment::new(Point::new(3.0, 4.0), Point::new(7.0, 9.0), 2.5));
        assert_eq!(stroke.last_point(), Point::new(7.0, 9.0));
        assert_eq!(stroke.last_width(), 2.5);
    }

    #[test]
    fn ids_are_unique() {
        let a = PenStroke::begin(Point::ZERO, RED, 4.0, false);
        let b = PenStroke::begin(Point::ZERO, RED, 4.0, false);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn damage_rect_includes_dot_only_when_finished() {
        let mut stroke = PenStroke::begin(Point::new(10.0, 10.0), RED, 8.0, false);
        assert!(stroke.damage_rect().is_none());
        stroke.finish();
        let rect = stroke.damage_rect().expect("dot damage");
        assert!(rect.x <= 6 && rect.y <= 6);
        assert!(rect.x + rect.width >= 14 && rect.y + rect.height >= 14);
    }

    #[test]
    fn latest_damage_spans_previous_midpoint() {
        let mut stroke = PenStroke::begin(Point::ZERO, RED, 2.0, false);
        stroke.add_segment(seg(0.0, 0.0, 20.0, 0.0));
        stroke.add_segment(seg(20.0, 0.0, 20.0, 20.0));
        let rect = stroke.latest_damage_rect().expect("latest damage");
        // previous midpoint is (10, 0)
        assert!(rect.x <= 10 - 2);
        assert!(rect.x + rect.width >= 20 + 2);
        assert!(rect.y + rect.height >= 20 + 2);
    }
}
