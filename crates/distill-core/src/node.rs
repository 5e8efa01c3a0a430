//! The filtered node tree.
//!
//! A [`FilteredNode`] is a raw design node reduced to its essential
//! attributes. Children live in a typed vector rather than inside the
//! attribute map, so a filtered tree can never carry raw or malformed
//! children.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::geometry::Bounds;
use crate::value::{self, Attributes};
use crate::MAX_TREE_DEPTH;

/// Attribute key under which children are serialized.
pub const CHILDREN: &str = "children";

/// A design node after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredNode {
    /// Kept and simplified attributes, in producer order. Never contains `children`.
    pub attributes: Attributes,
    /// Visible, well-formed children.
    pub children: Vec<FilteredNode>,
}

impl FilteredNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: FilteredNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Node id.
    pub fn id(&self) -> Option<&str> {
        value::str_attr(&self.attributes, "id")
    }

    /// Node name.
    pub fn name(&self) -> Option<&str> {
        value::str_attr(&self.attributes, "name")
    }

    /// Node type (`FRAME`, `TEXT`, `INSTANCE`, ...).
    pub fn node_type(&self) -> Option<&str> {
        value::str_attr(&self.attributes, "type")
    }

    /// Absolute bounding box, if declared.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.attributes)
    }

    /// A node with no attributes and no children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FilteredNode::node_count).sum::<usize>()
    }

    /// Convert back into a plain JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = self.attributes.clone();
        if !self.children.is_empty() {
            let children = self.children.iter().map(FilteredNode::to_value).collect();
            map.insert(CHILDREN.to_string(), Value::Array(children));
        }
        Value::Object(map)
    }

    /// Adopt JSON that is already filtered (for example a cached result).
    ///
    /// No attributes are dropped. Non-object and invisible children are
    /// skipped, the former with a warning. Returns `None` if `value` is not
    /// an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::adopt(value, 0)
    }

    fn adopt(value: &Value, depth: usize) -> Option<Self> {
        let map = value.as_object()?;
        let mut node = FilteredNode::new();

        for (key, attr) in map {
            if key != CHILDREN {
                node.attributes.insert(key.clone(), attr.clone());
            }
        }

        let Some(children) = map.get(CHILDREN).and_then(Value::as_array) else {
            return Some(node);
        };

        if depth >= MAX_TREE_DEPTH {
            warn!(
                "Dropping {} children below depth limit {} in {}",
                children.len(),
                MAX_TREE_DEPTH,
                node.name().unwrap_or("Unknown")
            );
            return Some(node);
        }

        for child in children {
            match child {
                Value::Object(attrs) => {
                    if attrs.get("visible").map_or(true, value::is_truthy) {
                        if let Some(adopted) = Self::adopt(child, depth + 1) {
                            node.children.push(adopted);
                        }
                    }
                }
                other => warn!("Skipping non-object child: {}", value::type_name(other)),
            }
        }

        Some(node)
    }
}

impl Serialize for FilteredNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.children.is_empty());
        let mut map = serializer.serialize_map(Some(self.attributes.len() + extra))?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, value)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry(CHILDREN, &self.children)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_skips_malformed_children() {
        let value = json!({
            "id": "1:1",
            "name": "Root",
            "type": "FRAME",
            "children": [
                {"id": "1:2", "type": "TEXT"},
                "not a node",
                42,
                {"id": "1:3", "type": "RECTANGLE", "visible": false}
            ]
        });

        let node = FilteredNode::from_value(&value).unwrap();
        assert_eq!(node.id(), Some("1:1"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].node_type(), Some("TEXT"));
        assert!(node.get(CHILDREN).is_none());
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(FilteredNode::from_value(&json!([1, 2, 3])).is_none());
        assert!(FilteredNode::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let node = FilteredNode::new()
            .with_attribute("id", "1:1")
            .with_attribute("name", "Root")
            .with_child(FilteredNode::new().with_attribute("id", "1:2"));

        let serialized = serde_json::to_value(&node).unwrap();
        assert_eq!(serialized, node.to_value());
        assert_eq!(serialized["children"][0]["id"], json!("1:2"));
        assert_eq!(node.node_count(), 2);
    }

    #[test]
    fn test_leaf_serializes_without_children_key() {
        let node = FilteredNode::new().with_attribute("id", "9");
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(text, r#"{"id":"9"}"#);
    }
}
