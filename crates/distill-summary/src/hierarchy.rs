//! The hierarchical summary.

use distill_layout::{LayoutNode, LayoutType};
use distill_mapper::Properties;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::ComponentIndex;

/// Summary limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Levels of nodes shown, root included.
    pub max_depth: usize,
    /// Levels shown regardless of content.
    pub always_show_depth: usize,
    /// Pure-layout nodes with more children than this are pruned.
    pub prune_threshold: usize,
    /// Fan-out above which children are collapsed.
    pub collapse_threshold: usize,
    /// Children kept in front of a truncation marker.
    pub preview_count: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            always_show_depth: 3,
            prune_threshold: 5,
            collapse_threshold: 20,
            preview_count: 3,
        }
    }
}

impl SummaryOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }
}

/// One entry in a summary's child list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryEntry {
    Node(SummaryNode),
    Marker(Marker),
}

impl SummaryEntry {
    pub fn as_node(&self) -> Option<&SummaryNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Marker(_) => None,
        }
    }

    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Self::Marker(marker) => Some(marker),
            Self::Node(_) => None,
        }
    }
}

/// A summarized layout node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryNode {
    pub name: String,
    pub layout: LayoutType,
    /// Component tag, or `container` / `element` for unclassified nodes.
    pub component: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SummaryEntry>,
}

impl SummaryNode {
    /// Markers anywhere in this subtree.
    pub fn markers(&self) -> Vec<&Marker> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for child in &node.children {
                match child {
                    SummaryEntry::Node(n) => stack.push(n),
                    SummaryEntry::Marker(m) => found.push(m),
                }
            }
        }
        found
    }
}

/// Why children are missing from a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerKind {
    /// Children sit below the depth cap.
    DepthLimit,
    /// Pure-layout children were pruned.
    Omitted,
    /// A wide list was cut after a preview.
    Truncated,
    /// Identically named siblings were folded into one entry.
    RepeatedPattern,
}

/// Stand-in for children left out of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub name: String,
    /// Number of children this marker stands for.
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Marker {
    fn depth_limit(count: usize) -> Self {
        Self {
            kind: MarkerKind::DepthLimit,
            name: format!("{count} children below depth limit"),
            count,
            note: None,
        }
    }

    fn omitted(count: usize) -> Self {
        Self {
            kind: MarkerKind::Omitted,
            name: format!("{count} layout-only nodes omitted"),
            count,
            note: None,
        }
    }

    fn truncated(count: usize) -> Self {
        Self {
            kind: MarkerKind::Truncated,
            name: format!("... and {count} more items"),
            count,
            note: None,
        }
    }

    fn repeated(name: &str, count: usize) -> Self {
        Self {
            kind: MarkerKind::RepeatedPattern,
            name: format!("{name} (×{count})"),
            count,
            note: Some(format!("Collapsed {count} identical elements")),
        }
    }
}

/// Summarize a classified layout tree.
///
/// The root is always present. Below it:
///
/// - nodes deeper than `max_depth` are replaced by a `DEPTH_LIMIT` marker
/// - unclassified VECTOR/GROUP nodes past `always_show_depth` with many
///   children and nothing classified beneath are pruned, and reported by an
///   `OMITTED` marker on their parent
/// - lists wider than `collapse_threshold` collapse to one
///   `REPEATED_PATTERN` entry when all names match, or to a preview and a
///   `TRUNCATED` marker otherwise
pub fn hierarchical_summary(root: &LayoutNode<'_>, index: &ComponentIndex<'_>, options: &SummaryOptions) -> SummaryNode {
    let summary = Summarizer { index, options }.summarize(root, 0);
    debug!(markers = summary.markers().len(), max_depth = options.max_depth, "summarized layout");
    summary
}

struct Summarizer<'i, 'm> {
    index: &'i ComponentIndex<'m>,
    options: &'i SummaryOptions,
}

impl Summarizer<'_, '_> {
    fn summarize(&self, node: &LayoutNode<'_>, depth: usize) -> SummaryNode {
        let component = self.index.lookup(node);

        let mut summary = SummaryNode {
            name: node.display_name().to_string(),
            layout: node.layout_type,
            component: match component {
                Some(c) => c.kind.tag().to_string(),
                None if node.children.is_empty() => "element".to_string(),
                None => "container".to_string(),
            },
            properties: component.map(|c| c.properties.clone()).unwrap_or_default(),
            children: Vec::new(),
        };

        if node.children.is_empty() {
            return summary;
        }

        let expand = node.layout_type.is_flow()
            || component.is_some()
            || depth < self.options.always_show_depth
            || self.index.has_classified_descendant(node);
        if !expand {
            summary.children.push(SummaryEntry::Marker(Marker::omitted(node.children.len())));
            return summary;
        }

        if depth + 1 >= self.options.max_depth {
            summary.children.push(SummaryEntry::Marker(Marker::depth_limit(node.children.len())));
            return summary;
        }

        summary.children = self.summarize_children(&node.children, depth + 1);
        summary
    }

    fn summarize_children(&self, children: &[LayoutNode<'_>], depth: usize) -> Vec<SummaryEntry> {
        let total = children.len();

        if total > self.options.collapse_threshold {
            let first = &children[0];
            if children.iter().all(|c| c.name == first.name) {
                let name = first.name.as_deref().or(first.node_type.as_deref()).unwrap_or("Unnamed");
                return vec![SummaryEntry::Marker(Marker::repeated(name, total))];
            }

            let preview = self.options.preview_count.min(total);
            let mut entries = self.summarize_all(&children[..preview], depth);
            if total > preview {
                entries.push(SummaryEntry::Marker(Marker::truncated(total - preview)));
            }
            return entries;
        }

        self.summarize_all(children, depth)
    }

    fn summarize_all(&self, children: &[LayoutNode<'_>], depth: usize) -> Vec<SummaryEntry> {
        let mut entries = Vec::with_capacity(children.len());
        let mut omitted = 0;

        for child in children {
            if self.is_prunable(child, depth) {
                omitted += 1;
            } else {
                entries.push(SummaryEntry::Node(self.summarize(child, depth)));
            }
        }

        if omitted > 0 {
            entries.push(SummaryEntry::Marker(Marker::omitted(omitted)));
        }
        entries
    }

    /// Unclassified VECTOR/GROUP nodes with many children and nothing
    /// classified beneath them.
    fn is_prunable(&self, node: &LayoutNode<'_>, depth: usize) -> bool {
        depth >= self.options.always_show_depth
            && matches!(node.node_type.as_deref(), Some("VECTOR" | "GROUP"))
            && node.children.len() > self.options.prune_threshold
            && self.index.lookup(node).is_none()
            && !self.index.has_classified_descendant(node)
    }
}
