//! Frame container for finished shapes, with undo/redo.

use super::shape::{DecodeError, Shape, ShapeRegistry};
use super::pen::PenStroke;
use crate::input::ShapeSink;
use log::warn;
use serde_json::Value;

/// Container for all finished shapes in the current drawing.
///
/// Acts as the operation stack that finished strokes are handed to: adding a
/// shape is an undoable operation, and undone shapes can be redone until a
/// new shape is added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// All shapes in draw order (first = bottom layer, last = top layer)
    pub shapes: Vec<Shape>,
    undone: Vec<Shape>,
    /// Maximum number of shapes (0 = unlimited)
    max_shapes: usize,
}

impl Frame {
    /// Creates a new empty frame with no shapes and no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty frame that holds at most `max_shapes` shapes (0 = unlimited).
    pub fn with_limit(max_shapes: usize) -> Self {
        Self {
            max_shapes,
            ..Self::default()
        }
    }

    /// Attempts to add a shape, enforcing the frame's shape limit.
    ///
    /// Returns `true` if the shape was added, `false` if the limit would be exceeded.
    /// A successful add discards the redo history.
    pub fn try_add_shape(&mut self, shape: Shape) -> bool {
        if self.max_shapes == 0 || self.shapes.len() < self.max_shapes {
            self.shapes.push(shape);
            self.undone.clear();
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently added shape, if any.
    pub fn undo(&mut self) -> Option<&Shape> {
        let shape = self.shapes.pop()?;
        self.undone.push(shape);
        self.undone.last()
    }

    /// Re-applies the most recently undone shape, if any.
    pub fn redo(&mut self) -> Option<&Shape> {
        let shape = self.undone.pop()?;
        self.shapes.push(shape);
        self.shapes.last()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Encodes the shapes as a JSON array of persisted records.
    pub fn to_json(&self) -> Value {
        Value::Array(self.shapes.iter().map(Shape::to_value).collect())
    }

    /// Decodes a JSON array of records. Any bad entry fails the whole decode.
    pub fn from_json(value: Value, registry: &ShapeRegistry) -> Result<Self, DecodeError> {
        let records: Vec<Value> = serde_json::from_value(value)?;
        let shapes = records
            .into_iter()
            .map(|record| registry.decode(record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            shapes,
            ..Self::default()
        })
    }
}

impl ShapeSink for Frame {
    fn add_shape(&mut self, stroke: PenStroke) {
        if !self.try_add_shape(Shape::Pen(stroke)) {
            warn!(
                "Shape limit ({}) reached; discarding finished stroke",
                self.max_shapes
            );
        }
    }
}
