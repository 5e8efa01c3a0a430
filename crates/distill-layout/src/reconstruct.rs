//! The reconstruction pass.

use distill_core::geometry::distinct_rounded;
use distill_core::value::{num_attr, obj_attr, str_attr};
use distill_core::{Bounds, FilteredNode, MAX_TREE_DEPTH};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rows::{group_rows, Y_TOLERANCE};
use crate::tree::{LayoutMetadata, LayoutNode, LayoutType};

/// Reconstruction configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructOptions {
    /// Vertical tolerance for heuristic row grouping.
    pub y_tolerance: f64,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self { y_tolerance: Y_TOLERANCE }
    }
}

impl ReconstructOptions {
    pub fn with_y_tolerance(mut self, y_tolerance: f64) -> Self {
        self.y_tolerance = y_tolerance;
        self
    }
}

/// Counters collected during reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutStats {
    pub total_nodes: usize,
    pub auto_layout_nodes: usize,
    pub inferred_layout_nodes: usize,
    pub heuristic_layout_nodes: usize,
    pub row_groups_created: usize,
    /// Nodes dropped because they sat below the depth ceiling.
    pub skipped_nodes: usize,
    pub auto_layout_percentage: f64,
    pub inference_percentage: f64,
}

/// Result of reconstruction.
#[derive(Debug, Clone)]
pub struct Reconstruction<'a> {
    /// `None` when the input node was empty.
    pub root: Option<LayoutNode<'a>>,
    pub stats: LayoutStats,
}

/// Reconstruct the layout of a filtered tree with default options.
pub fn reconstruct(node: &FilteredNode) -> Reconstruction<'_> {
    reconstruct_with(node, &ReconstructOptions::default())
}

/// Reconstruct the layout of a filtered tree.
pub fn reconstruct_with<'a>(node: &'a FilteredNode, options: &ReconstructOptions) -> Reconstruction<'a> {
    if node.is_empty() {
        return Reconstruction {
            root: None,
            stats: LayoutStats::default(),
        };
    }

    let mut pass = Reconstructor {
        options: *options,
        stats: LayoutStats::default(),
    };
    let root = pass.process(node, 0);

    let mut stats = pass.stats;
    if stats.total_nodes > 0 {
        let total = stats.total_nodes as f64;
        stats.auto_layout_percentage = stats.auto_layout_nodes as f64 / total * 100.0;
        stats.inference_percentage = stats.inferred_layout_nodes as f64 / total * 100.0;
    }

    debug!(
        total = stats.total_nodes,
        auto_layout = stats.auto_layout_nodes,
        inferred = stats.inferred_layout_nodes,
        row_groups = stats.row_groups_created,
        "reconstructed layout"
    );

    Reconstruction { root: Some(root), stats }
}

struct Reconstructor {
    options: ReconstructOptions,
    stats: LayoutStats,
}

impl Reconstructor {
    fn process<'a>(&mut self, source: &'a FilteredNode, depth: usize) -> LayoutNode<'a> {
        self.stats.total_nodes += 1;
        let node = LayoutNode::from_filtered(source);

        if source.children.is_empty() {
            return node;
        }
        if depth + 1 >= MAX_TREE_DEPTH {
            let dropped: usize = source.children.iter().map(FilteredNode::node_count).sum();
            warn!(
                "Depth ceiling {} reached in {}; dropping {} nodes",
                MAX_TREE_DEPTH,
                node.display_name(),
                dropped
            );
            self.stats.skipped_nodes += dropped;
            return node;
        }

        if let Some(layout) = explicit_layout(source) {
            self.stats.auto_layout_nodes += 1;
            let metadata = auto_layout_metadata(source, layout);
            let children = self.process_all(&source.children, depth);
            return node.with_layout(layout, metadata).with_children(children);
        }

        let inferred = obj_attr(&source.attributes, "inferredAutoLayout").filter(|map| !map.is_empty());
        if let Some(inferred) = inferred {
            self.stats.inferred_layout_nodes += 1;
            let layout = str_attr(inferred, "layoutMode")
                .and_then(LayoutType::from_mode)
                .unwrap_or_default();
            let metadata = LayoutMetadata {
                inferred: true,
                item_spacing: Some(num_attr(inferred, "itemSpacing").unwrap_or(0.0)),
                ..LayoutMetadata::default()
            };
            let children = self.process_all(&source.children, depth);
            return node.with_layout(layout, metadata).with_children(children);
        }

        self.stats.heuristic_layout_nodes += 1;
        self.heuristic(node, source, depth)
    }

    fn process_all<'a>(&mut self, children: &'a [FilteredNode], depth: usize) -> Vec<LayoutNode<'a>> {
        children.iter().map(|child| self.process(child, depth + 1)).collect()
    }

    fn heuristic<'a>(&mut self, node: LayoutNode<'a>, source: &'a FilteredNode, depth: usize) -> LayoutNode<'a> {
        let position = |child: &&FilteredNode| {
            let bounds = Bounds::of_or_default(&child.attributes);
            (bounds.x, bounds.y)
        };
        let rows = group_rows(source.children.iter().collect(), position, self.options.y_tolerance);

        if rows.len() == 1 {
            let children = rows
                .into_iter()
                .flatten()
                .map(|child| self.process(child, depth + 1))
                .collect();
            let metadata = LayoutMetadata {
                inferred: true,
                ..LayoutMetadata::default()
            };
            return node.with_layout(LayoutType::Horizontal, metadata).with_children(children);
        }

        let metadata = LayoutMetadata {
            inferred: true,
            has_row_groups: true,
            row_count: Some(rows.len()),
            ..LayoutMetadata::default()
        };

        let mut children = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            if let [single] = row.as_slice() {
                children.push(self.process(*single, depth + 1));
                continue;
            }
            let members = row.into_iter().map(|child| self.process(child, depth + 1)).collect();
            children.push(LayoutNode::row_group(source.id(), index, members));
            self.stats.row_groups_created += 1;
        }

        node.with_layout(LayoutType::Vertical, metadata).with_children(children)
    }
}

fn explicit_layout(source: &FilteredNode) -> Option<LayoutType> {
    match str_attr(&source.attributes, "layoutMode")? {
        "HORIZONTAL" => Some(LayoutType::Horizontal),
        "VERTICAL" => Some(LayoutType::Vertical),
        "GRID" => Some(LayoutType::Grid),
        _ => None,
    }
}

fn auto_layout_metadata(source: &FilteredNode, layout: LayoutType) -> LayoutMetadata {
    let attrs = &source.attributes;
    let text = |key: &str| str_attr(attrs, key).map(str::to_string);

    let mut metadata = LayoutMetadata {
        auto_layout: true,
        item_spacing: Some(num_attr(attrs, "itemSpacing").unwrap_or(0.0)),
        primary_axis_align: text("primaryAxisAlignItems"),
        counter_axis_align: text("counterAxisAlignItems"),
        primary_axis_sizing: text("primaryAxisSizingMode"),
        counter_axis_sizing: text("counterAxisSizingMode"),
        layout_wrap: text("layoutWrap"),
        ..LayoutMetadata::default()
    };

    if layout == LayoutType::Grid {
        let positioned: Vec<Bounds> = source.children.iter().filter_map(FilteredNode::bounds).collect();
        metadata.layout_grids = source.get("layoutGrids").cloned();
        metadata.columns = Some(distinct_rounded(positioned.iter().map(|b| b.x)).max(1));
        metadata.rows = Some(distinct_rounded(positioned.iter().map(|b| b.y)).max(1));
    }

    metadata
}
