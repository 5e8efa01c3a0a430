//! The compact, component-only summary.

use std::collections::BTreeMap;

use distill_layout::{LayoutNode, LayoutType};
use distill_mapper::Properties;
use serde::{Deserialize, Serialize};

use crate::index::ComponentIndex;

/// Classified nodes grouped by depth, plus page-wide layout facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactSummary {
    pub page_layout: LayoutType,
    pub total_components: usize,
    /// Layout depth to the components found there.
    pub component_hierarchy: BTreeMap<usize, Vec<CompactItem>>,
    pub layout_patterns: LayoutPatterns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactItem {
    pub name: String,
    pub component: String,
    /// Layout type of the classified node itself.
    pub layout_context: LayoutType,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPatterns {
    pub has_row_groups: bool,
    pub has_grid: bool,
    pub uses_auto_layout: bool,
}

/// Summarize only the classified nodes of a layout tree.
pub fn compact_summary(root: &LayoutNode<'_>, index: &ComponentIndex<'_>) -> CompactSummary {
    let mut hierarchy: BTreeMap<usize, Vec<CompactItem>> = BTreeMap::new();
    let mut patterns = LayoutPatterns::default();
    let mut total = 0;

    let mut stack = vec![(0usize, root)];
    while let Some((depth, node)) = stack.pop() {
        patterns.has_row_groups |= node.layout_type == LayoutType::RowGroup;
        patterns.has_grid |= node.layout_type == LayoutType::Grid;
        patterns.uses_auto_layout |= node.metadata.auto_layout;

        if let Some(component) = index.lookup(node) {
            total += 1;
            hierarchy.entry(depth).or_default().push(CompactItem {
                name: node.display_name().to_string(),
                component: component.kind.tag().to_string(),
                layout_context: node.layout_type,
                properties: component.properties.clone(),
            });
        }

        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }

    CompactSummary {
        page_layout: root.layout_type,
        total_components: total,
        component_hierarchy: hierarchy,
        layout_patterns: patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_core::FilteredNode;
    use distill_layout::reconstruct;
    use distill_mapper::map_components;
    use serde_json::json;

    fn named(name: &str, x: f64, y: f64) -> FilteredNode {
        FilteredNode::new()
            .with_attribute("id", name)
            .with_attribute("name", name)
            .with_attribute("type", "FRAME")
            .with_attribute("absoluteBoundingBox", json!({"x": x, "y": y, "width": 120, "height": 40}))
    }

    #[test]
    fn test_compact_summary_groups_by_depth() {
        let page = named("Page", 0.0, 0.0)
            .with_attribute("absoluteBoundingBox", json!({"x": 0, "y": 0, "width": 800, "height": 600}))
            .with_child(named("Header", 0.0, 0.0))
            .with_child(named("Save Button", 0.0, 100.0))
            .with_child(named("Cancel Button", 200.0, 100.0));
        let layout = reconstruct(&page).root.unwrap();
        let mapping = map_components(&layout);
        let index = ComponentIndex::from_mapping(&mapping);

        let summary = compact_summary(&layout, &index);

        assert_eq!(summary.page_layout, LayoutType::Vertical);
        assert_eq!(summary.total_components, 3);
        assert_eq!(summary.component_hierarchy[&1].len(), 1);
        assert_eq!(summary.component_hierarchy[&1][0].component, "navbar");
        assert_eq!(summary.component_hierarchy[&2].len(), 2);
        assert_eq!(summary.component_hierarchy[&2][0].name, "Save Button");
        assert!(summary.layout_patterns.has_row_groups);
        assert!(!summary.layout_patterns.has_grid);
        assert!(!summary.layout_patterns.uses_auto_layout);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["component_hierarchy"]["2"][1]["component"], json!("button"));
    }
}
