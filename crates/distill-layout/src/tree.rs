//! Reconstructed layout tree.

use std::fmt;

use distill_core::FilteredNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutType {
    /// Free positioning, or a leaf
    #[default]
    Absolute,
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
    /// Two-dimensional grid
    Grid,
    /// Synthetic row wrapping horizontally aligned siblings
    RowGroup,
}

impl LayoutType {
    /// Parse a `layoutMode` value.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            "HORIZONTAL" => Some(Self::Horizontal),
            "VERTICAL" => Some(Self::Vertical),
            "GRID" => Some(Self::Grid),
            "ABSOLUTE" | "NONE" => Some(Self::Absolute),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "ABSOLUTE",
            Self::Horizontal => "HORIZONTAL",
            Self::Vertical => "VERTICAL",
            Self::Grid => "GRID",
            Self::RowGroup => "ROW_GROUP",
        }
    }

    /// Containers whose children follow a flow order.
    pub fn is_flow(self) -> bool {
        !matches!(self, Self::Absolute)
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts recorded about a node while its layout was decided.
///
/// Built once per node and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_layout: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inferred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_sizing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_sizing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_wrap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_grids: Option<Value>,
    /// Distinct rounded x positions among grid children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    /// Distinct rounded y positions among grid children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_row_groups: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    /// Members of a synthetic row group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node of the reconstructed layout tree.
///
/// Borrows the filtered node it was built from. Synthetic row groups have
/// no source.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode<'a> {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub layout_type: LayoutType,
    pub metadata: LayoutMetadata,
    pub children: Vec<LayoutNode<'a>>,
    #[serde(skip)]
    pub source: Option<&'a FilteredNode>,
}

impl<'a> LayoutNode<'a> {
    /// Leaf node for a filtered node, laid out absolutely.
    pub fn from_filtered(source: &'a FilteredNode) -> Self {
        Self {
            id: source.id().map(str::to_string),
            name: source.name().map(str::to_string),
            node_type: source.node_type().map(str::to_string),
            layout_type: LayoutType::Absolute,
            metadata: LayoutMetadata::default(),
            children: Vec::new(),
            source: Some(source),
        }
    }

    /// Synthetic row wrapping `children`.
    pub fn row_group(parent_id: Option<&str>, index: usize, children: Vec<LayoutNode<'a>>) -> Self {
        Self {
            id: Some(format!("{}-row-{}", parent_id.unwrap_or("unknown"), index)),
            name: Some(format!("Inferred Row {}", index + 1)),
            node_type: Some("GROUP".to_string()),
            layout_type: LayoutType::RowGroup,
            metadata: LayoutMetadata {
                inferred: true,
                item_count: Some(children.len()),
                ..LayoutMetadata::default()
            },
            children,
            source: None,
        }
    }

    pub fn with_layout(mut self, layout_type: LayoutType, metadata: LayoutMetadata) -> Self {
        self.layout_type = layout_type;
        self.metadata = metadata;
        self
    }

    pub fn with_children(mut self, children: Vec<LayoutNode<'a>>) -> Self {
        self.children = children;
        self
    }

    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().or(self.id.as_deref()).unwrap_or("Unnamed")
    }

    pub fn is_synthetic(&self) -> bool {
        self.source.is_none()
    }

    /// An attribute of the source node.
    pub fn attribute(&self, key: &str) -> Option<&'a Value> {
        self.source.and_then(|node| node.get(key))
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk(&self) -> Walk<'_, 'a> {
        Walk { stack: vec![self] }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Pre-order iterator over a layout tree.
pub struct Walk<'n, 'a> {
    stack: Vec<&'n LayoutNode<'a>>,
}

impl<'n, 'a> Iterator for Walk<'n, 'a> {
    type Item = &'n LayoutNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
