//! Axis-aligned geometry read from node bounding boxes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{num_attr, Attributes};

/// Attribute holding a node's absolute bounding box.
pub const BOUNDING_BOX: &str = "absoluteBoundingBox";

/// Axis-aligned bounding box in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Read a `{x, y, width, height}` object. Missing fields default to 0.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            x: num_attr(map, "x").unwrap_or(0.0),
            y: num_attr(map, "y").unwrap_or(0.0),
            width: num_attr(map, "width").unwrap_or(0.0),
            height: num_attr(map, "height").unwrap_or(0.0),
        })
    }

    /// Bounding box of a node, if it declares one.
    pub fn of(attrs: &Attributes) -> Option<Self> {
        attrs.get(BOUNDING_BOX).and_then(Self::from_value)
    }

    /// Bounding box of a node, or a zero box at the origin.
    pub fn of_or_default(attrs: &Attributes) -> Self {
        Self::of(attrs).unwrap_or_default()
    }

    /// Width and height differ by at most `tolerance`.
    pub fn is_square(&self, tolerance: f64) -> bool {
        (self.width - self.height).abs() <= tolerance
    }
}

/// Number of distinct rounded values in a sequence of coordinates.
pub fn distinct_rounded(values: impl IntoIterator<Item = f64>) -> usize {
    let mut rounded: Vec<i64> = values.into_iter().map(|v| v.round() as i64).collect();
    rounded.sort_unstable();
    rounded.dedup();
    rounded.len()
}
