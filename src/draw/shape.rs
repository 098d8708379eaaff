//! Shape variants and their persisted record format.
//!
//! Every persisted shape is a JSON object carrying a `type` discriminator.
//! [`ShapeRegistry`] maps each discriminator to a decoder; an unregistered
//! tag, or a tag that disagrees with the decoder the caller asked for, is a
//! hard [`DecodeError`] and never a partially built shape.

use super::color::Color;
use super::pen::{LineSegment, PenStroke};
use crate::util::{Bounds, Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced while decoding a persisted shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected shape type '{expected}', found '{found}'")]
    WrongShapeType {
        expected: &'static str,
        found: String,
    },

    #[error("no decoder registered for shape type '{0}'")]
    UnknownShapeType(String),

    #[error("shape record has no string 'type' field")]
    MissingType,

    #[error("malformed shape record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A drawable, persistable shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Freehand pen or eraser stroke
    Pen(PenStroke),
}

impl Shape {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Shape::Pen(_) => PenStroke::TYPE,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Shape::Pen(stroke) => &stroke.id,
        }
    }

    pub fn bounding_box(&self) -> Bounds {
        match self {
            Shape::Pen(stroke) => stroke.bounding_box(),
        }
    }

    /// Pixel area touched when rendering, if any.
    pub fn damage_rect(&self) -> Option<Rect> {
        match self {
            Shape::Pen(stroke) => stroke.damage_rect(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Shape::Pen(stroke) => stroke.to_value(),
        }
    }
}

impl From<PenStroke> for Shape {
    fn from(stroke: PenStroke) -> Self {
        Shape::Pen(stroke)
    }
}

type DecodeFn = fn(Value) -> Result<Shape, DecodeError>;

/// Lookup table from `type` discriminator to decoder.
pub struct ShapeRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ShapeRegistry {
    /// Creates a registry with no decoders.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Creates a registry that knows every built-in shape kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(PenStroke::TYPE, |value| {
            PenStroke::from_value(value).map(Shape::Pen)
        });
        registry
    }

    pub fn register(&mut self, tag: &'static str, decoder: DecodeFn) {
        self.decoders.insert(tag, decoder);
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Decodes a record using the decoder selected by its `type` field.
    pub fn decode(&self, value: Value) -> Result<Shape, DecodeError> {
        let tag = type_tag(&value)?;
        let decoder = self
            .decoders
            .get(tag)
            .ok_or_else(|| DecodeError::UnknownShapeType(tag.to_string()))?;
        decoder(value)
    }

    /// Decodes a record that must be of kind `expected`.
    pub fn decode_as(&self, expected: &'static str, value: Value) -> Result<Shape, DecodeError> {
        let tag = type_tag(&value)?;
        if tag != expected {
            return Err(DecodeError::WrongShapeType {
                expected,
                found: tag.to_string(),
            });
        }
        self.decode(value)
    }
}

fn type_tag(value: &Value) -> Result<&str, DecodeError> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingType)
}

// ============================================================================
// Pen record
// ============================================================================

/// Wire shape of a pen stroke. Every field is required.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PenRecord {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    is_finished: bool,
    start: Point,
    stroke_color: Color,
    stroke_width: f64,
    segments: Vec<LineSegment>,
    is_eraser: bool,
    timestamp: f64,
    viewport_tag: String,
}

impl PenStroke {
    /// Discriminator stored in the `type` field of pen records.
    pub const TYPE: &'static str = "Pen";

    pub fn to_value(&self) -> Value {
        let record = PenRecord {
            kind: Self::TYPE.to_string(),
            id: self.id.clone(),
            is_finished: self.is_finished,
            start: self.start,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            segments: self.segments.clone(),
            is_eraser: self.is_eraser,
            timestamp: self.timestamp,
            viewport_tag: self.viewport_tag.clone(),
        };
        // A record of plain numbers, strings and bools always serializes.
        serde_json::to_value(record).unwrap_or(Value::Null)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Decodes a pen record, rejecting any other `type`.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let tag = type_tag(&value)?;
        if tag != Self::TYPE {
            return Err(DecodeError::WrongShapeType {
                expected: Self::TYPE,
                found: tag.to_string(),
            });
        }

        let record: PenRecord = serde_json::from_value(value)?;
        Ok(Self {
            id: record.id,
            is_finished: record.is_finished,
            start: record.start,
            stroke_color: record.stroke_color,
            stroke_width: record.stroke_width,
            segments: record.segments,
            is_eraser: record.is_eraser,
            timestamp: record.timestamp,
            viewport_tag: record.viewport_tag,
        })
    }

    pub fn from_json(input: &str) -> Result<Self, DecodeError> {
        Self::from_value(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_stroke() -> PenStroke {
        let mut stroke = PenStroke::begin(
            Point::new(1.0, 2.0),
            Color::from_rgba8(0x33, 0x66, 0x99, 0xFF),
            7.5,
            true,
        );
        stroke.timestamp = 1_700_000_000.25;
        stroke.viewport_tag = "page-3".to_string();
        let points = [(1.0, 2.0), (5.0, 3.5), (9.0, -2.0), (12.25, 4.0)];
        for pair in points.windows(2) {
            let mut segment = LineSegment::new(
                Point::new(pair[0].0, pair[0].1),
                Point::new(pair[1].0, pair[1].1),
                5.0,
            );
            segment.timestamp = Some(1_700_000_000.5);
            stroke.add_segment(segment);
        }
        stroke.finish();
        stroke
    }

    #[test]
    fn pen_record_round_trips() {
        let stroke = sample_stroke();
        let decoded = PenStroke::from_json(&stroke.to_json()).expect("decode");
        assert_eq!(decoded, stroke);
        for (original, restored) in stroke.segments().iter().zip(decoded.segments()) {
            assert_eq!(original.midpoint(), restored.midpoint());
        }
    }

    #[test]
    fn palette_color_survives_round_trip() {
        let mut stroke = PenStroke::begin(
            Point::new(3.0, 4.0),
            crate::draw::color::ORANGE,
            6.0,
            false,
        );
        stroke.add_segment(LineSegment::new(Point::new(3.0, 4.0), Point::new(8.0, 9.0), 6.0));
        stroke.finish();

        assert!(stroke.to_json().contains("\"strokeColor\":\"#FF8000\""));
        let decoded = PenStroke::from_json(&stroke.to_json()).expect("decode");
        assert_eq!(decoded, stroke);
    }

    #[test]
    fn record_carries_exact_field_set() {
        let value = sample_stroke().to_value();
        let object = value.as_object().expect("object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "id",
                "isEraser",
                "isFinished",
                "segments",
                "start",
                "strokeColor",
                "strokeWidth",
                "timestamp",
                "type",
                "viewportTag",
            ]
        );
        assert_eq!(object["type"], "Pen");
        assert_eq!(object["strokeColor"], "#336699");
        assert_eq!(object["start"], json!({"x": 1.0, "y": 2.0}));

        let segment = object["segments"][0].as_object().expect("segment");
        assert!(segment.contains_key("timestamp"));
        assert!(!segment.contains_key("viewportTag"));
        assert!(!segment.contains_key("midpoint"));
    }

    #[test]
    fn wrong_type_tag_is_rejected() {
        let mut value = sample_stroke().to_value();
        value["type"] = json!("Line");
        match PenStroke::from_value(value) {
            Err(DecodeError::WrongShapeType { expected, found }) => {
                assert_eq!(expected, "Pen");
                assert_eq!(found, "Line");
            }
            other => panic!("expected WrongShapeType, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_fails_whole_decode() {
        let mut value = sample_stroke().to_value();
        value.as_object_mut().unwrap().remove("isEraser");
        assert!(matches!(
            PenStroke::from_value(value),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn missing_type_is_reported() {
        let mut value = sample_stroke().to_value();
        value.as_object_mut().unwrap().remove("type");
        assert!(matches!(
            PenStroke::from_value(value),
            Err(DecodeError::MissingType)
        ));
    }

    #[test]
    fn registry_dispatches_on_tag() {
        let registry = ShapeRegistry::with_defaults();
        let stroke = sample_stroke();
        let shape = registry.decode(stroke.to_value()).expect("decode");
        assert_eq!(shape, Shape::Pen(stroke));
        assert_eq!(shape.type_tag(), "Pen");
    }

    #[test]
    fn registry_rejects_unknown_and_mismatched_tags() {
        let registry = ShapeRegistry::with_defaults();
        let mut value = sample_stroke().to_value();
        value["type"] = json!("Line");

        assert!(matches!(
            registry.decode(value.clone()),
            Err(DecodeError::UnknownShapeType(tag)) if tag == "Line"
        ));
        assert!(matches!(
            registry.decode_as(PenStroke::TYPE, value),
            Err(DecodeError::WrongShapeType { .. })
        ));
        assert!(!ShapeRegistry::empty().is_registered("Pen"));
    }
}
