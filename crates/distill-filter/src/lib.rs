//! Attribute pruning for raw design nodes.
//!
//! The filter is the first pipeline stage. It walks a raw node tree and
//! keeps only what later stages and a size-constrained reader need:
//!
//! 1. **Denylisted** attributes (prototyping, export, internal versioning)
//!    are always dropped
//! 2. **Simplifiable** attributes (fills, strokes, text style, grids, blend
//!    mode, constraints) are replaced by compact values
//! 3. **Essential** attributes (identity, geometry, auto-layout, component
//!    linkage) are kept verbatim
//! 4. Everything else is kept only when it is a primitive or a small composite
//!
//! Vector-family nodes lose their path geometry, and every node gets cheap
//! `_hint` / `_layout_hint` annotations.
//!
//! # Example
//!
//! ```ignore
//! use distill_filter::filter;
//!
//! let filtered = filter(&raw_node, Some(10));
//! println!("kept {} of {} nodes", filtered.stats.filtered_nodes, filtered.stats.total_nodes);
//! ```

pub mod hints;
pub mod simplify;

use distill_core::node::CHILDREN;
use distill_core::value::{is_truthy, serialized_len, str_attr, type_name};
use distill_core::{FilteredNode, MAX_TREE_DEPTH};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Attributes always dropped, whatever their value.
pub const REMOVED_PROPERTIES: &[&str] = &[
    "styles",
    "effects",
    "exportSettings",
    "transitionNodeID",
    "transitionDuration",
    "transitionEasing",
    "overflowDirection",
    "numberOfFixedChildren",
    "overlayPositionType",
    "overlayBackgroundInteraction",
    "preserveRatio",
    "reactions",
    "playbackSettings",
    "individualStrokeWeights",
    "strokeDashes",
    "relativeTransform",
    "size",
    "counterAxisSizingMode",
    "primaryAxisSizingMode",
    "paddingLeft",
    "paddingRight",
    "paddingTop",
    "paddingBottom",
    "gridStyleId",
    "backgroundStyleId",
    "fillStyleId",
    "strokeStyleId",
    "textAutoResize",
    "layoutVersion",
    "componentPropertyDefinitions",
    "componentProperties",
    "overrides",
    "prototypeDevice",
    "flowStartingPoints",
];

/// Attributes kept verbatim.
///
/// A few names also appear in [`REMOVED_PROPERTIES`]; the denylist wins.
pub const ESSENTIAL_PROPERTIES: &[&str] = &[
    "id",
    "name",
    "type",
    "visible",
    "absoluteBoundingBox",
    "layoutMode",
    "layoutAlign",
    "itemSpacing",
    "componentId",
    "mainComponent",
    "characters",
    "opacity",
    "clipsContent",
    "locked",
    "isMask",
    "primaryAxisAlignItems",
    "counterAxisAlignItems",
    "layoutWrap",
    "layoutGrow",
    "layoutPositioning",
    "inferredAutoLayout",
    "variantProperties",
];

/// Node types whose path geometry is stripped.
pub const VECTOR_TYPES: &[&str] = &[
    "VECTOR",
    "LINE",
    "REGULAR_POLYGON",
    "ELLIPSE",
    "STAR",
    "BOOLEAN_OPERATION",
];

/// Path attributes removed from vector-family nodes.
const VECTOR_PROPERTIES: &[&str] = &["vectorPaths", "vectorNetwork", "fillGeometry", "strokeGeometry"];

/// Composites serialized below this length are always kept.
const SMALL_COMPOSITE_LEN: usize = 100;
/// Objects serialized above this length are rejected outright.
const MAX_OBJECT_LEN: usize = 200;
/// Arrays serialized above this length are rejected outright.
const MAX_ARRAY_LEN: usize = 500;

/// Filter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Levels of children to keep below the root (`None` keeps all, up to
    /// [`MAX_TREE_DEPTH`]).
    pub max_depth: Option<usize>,
}

impl FilterOptions {
    /// Set the depth budget.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Counters collected during one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    pub total_nodes: usize,
    pub filtered_nodes: usize,
    pub removed_properties: usize,
    pub simplified_properties: usize,
    pub vector_nodes_simplified: usize,
    /// Nodes whose children were cut by the depth budget or ceiling.
    pub depth_limited_nodes: usize,
    /// Children skipped because they were not objects.
    pub skipped_children: usize,
    /// Children skipped because they were invisible.
    pub hidden_children: usize,
    pub original_size: usize,
    pub filtered_size: usize,
    pub reduction_percentage: f64,
}

impl FilterStats {
    /// Rough token savings, assuming about four bytes per token.
    pub fn estimate_tokens(&self) -> TokenEstimate {
        let original_tokens = self.original_size / 4;
        let filtered_tokens = self.filtered_size / 4;
        TokenEstimate {
            original_tokens,
            filtered_tokens,
            tokens_saved: original_tokens.saturating_sub(filtered_tokens),
            reduction_percentage: reduction(original_tokens, filtered_tokens),
        }
    }
}

/// Token counts before and after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenEstimate {
    pub original_tokens: usize,
    pub filtered_tokens: usize,
    pub tokens_saved: usize,
    pub reduction_percentage: f64,
}

/// Result of a filter pass.
#[derive(Debug, Clone)]
pub struct Filtered {
    pub node: FilteredNode,
    pub stats: FilterStats,
}

/// Filter a raw node tree.
///
/// `max_depth` limits how many levels of children are kept. Malformed input
/// yields an empty node and a warning; this function never fails.
pub fn filter(node: &Value, max_depth: Option<usize>) -> Filtered {
    filter_with(node, &FilterOptions::default().with_max_depth(max_depth))
}

/// Filter a raw node tree with explicit options.
pub fn filter_with(node: &Value, options: &FilterOptions) -> Filtered {
    let mut pass = FilterPass::default();
    let filtered = pass.filter_node(node, options.max_depth, 0);

    let mut stats = pass.stats;
    stats.original_size = serialized_len(node);
    stats.filtered_size = serde_json::to_string(&filtered).map_or(0, |s| s.len());
    stats.reduction_percentage = reduction(stats.original_size, stats.filtered_size);

    debug!(
        total = stats.total_nodes,
        kept = stats.filtered_nodes,
        original_size = stats.original_size,
        filtered_size = stats.filtered_size,
        "filtered node tree"
    );

    Filtered { node: filtered, stats }
}

fn reduction(original: usize, filtered: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let percent = (1.0 - filtered as f64 / original as f64) * 100.0;
    (percent * 100.0).round() / 100.0
}

#[derive(Default)]
struct FilterPass {
    stats: FilterStats,
}

impl FilterPass {
    fn filter_node(&mut self, node: &Value, budget: Option<usize>, level: usize) -> FilteredNode {
        let map = match node {
            Value::Object(map) if map.is_empty() => return FilteredNode::new(),
            Value::Object(map) => map,
            other => {
                warn!("Expected object for node, got {}", type_name(other));
                return FilteredNode::new();
            }
        };

        self.stats.total_nodes += 1;
        let mut filtered = FilteredNode::new();

        for (key, value) in map {
            if REMOVED_PROPERTIES.contains(&key.as_str()) {
                self.stats.removed_properties += 1;
                continue;
            }

            if key == CHILDREN {
                if is_truthy(value) {
                    filtered.children = self.filter_children(map, value, budget, level);
                }
                continue;
            }

            if let Some(simplify) = simplify::simplifier(key) {
                if let Some(simplified) = simplify(value) {
                    filtered.attributes.insert(key.clone(), simplified);
                    self.stats.simplified_properties += 1;
                }
                continue;
            }

            if ESSENTIAL_PROPERTIES.contains(&key.as_str()) || is_small(value) {
                filtered.attributes.insert(key.clone(), value.clone());
            }
        }

        if str_attr(map, "type").is_some_and(|t| VECTOR_TYPES.contains(&t)) {
            for key in VECTOR_PROPERTIES {
                filtered.attributes.shift_remove(*key);
            }
            filtered
                .attributes
                .insert("_simplified".to_string(), Value::from("vector_paths_removed"));
            self.stats.vector_nodes_simplified += 1;
        }

        hints::annotate(&mut filtered.attributes, map);

        self.stats.filtered_nodes += 1;
        filtered
    }

    fn filter_children(
        &mut self,
        parent: &serde_json::Map<String, Value>,
        children: &Value,
        budget: Option<usize>,
        level: usize,
    ) -> Vec<FilteredNode> {
        let parent_name = str_attr(parent, "name").unwrap_or("Unknown");

        let Some(children) = children.as_array() else {
            warn!("Ignoring non-array children in {}", parent_name);
            return Vec::new();
        };

        if budget == Some(0) {
            self.stats.depth_limited_nodes += 1;
            return Vec::new();
        }
        if level + 1 >= MAX_TREE_DEPTH {
            warn!(
                "Depth ceiling {} reached in {}; dropping {} children",
                MAX_TREE_DEPTH,
                parent_name,
                children.len()
            );
            self.stats.depth_limited_nodes += 1;
            return Vec::new();
        }

        let next_budget = budget.map(|b| b - 1);
        let mut kept = Vec::new();

        for child in children {
            let Some(attrs) = child.as_object() else {
                warn!("Skipping non-object child: {}", type_name(child));
                self.stats.skipped_children += 1;
                continue;
            };
            if !attrs.get("visible").map_or(true, is_truthy) {
                self.stats.hidden_children += 1;
                continue;
            }

            let filtered = self.filter_node(child, next_budget, level + 1);
            if !filtered.is_empty() {
                kept.push(filtered);
            }
        }

        kept
    }
}

/// Non-essential values worth keeping: primitives and small composites.
fn is_small(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(_) => {
            let len = serialized_len(value);
            len <= MAX_OBJECT_LEN && len < SMALL_COMPOSITE_LEN
        }
        Value::Array(_) => {
            let len = serialized_len(value);
            len <= MAX_ARRAY_LEN && len < SMALL_COMPOSITE_LEN
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Map};

    fn button_frame() -> Value {
        json!({
            "id": "2:1",
            "name": "Primary Button",
            "type": "FRAME",
            "visible": true,
            "absoluteBoundingBox": {"x": 0, "y": 0, "width": 120, "height": 40},
            "fills": [{"type": "SOLID", "color": {"r": 0.0, "g": 0.4, "b": 0.8}}],
            "effects": [{"type": "DROP_SHADOW", "radius": 4}],
            "reactions": [{"action": {"type": "NODE"}}],
            "relativeTransform": [[1, 0, 0], [0, 1, 0]],
            "cornerRadius": 4,
            "paddingLeft": 16,
            "exportSettings": [],
            "blendMode": "PASS_THROUGH",
            "children": [
                {
                    "id": "2:2",
                    "name": "Label",
                    "type": "TEXT",
                    "characters": "Save",
                    "style": {"fontFamily": "Inter", "fontSize": 14, "fontWeight": 500}
                },
                {"id": "2:3", "name": "Hidden", "type": "TEXT", "visible": false}
            ]
        })
    }

    #[test]
    fn test_filter_button_frame() {
        let result = filter(&button_frame(), None);
        let node = &result.node;

        assert_eq!(node.id(), Some("2:1"));
        assert_eq!(node.get("fills"), Some(&json!("rgb(0,102,204)")));
        assert_eq!(node.get("cornerRadius"), Some(&json!(4)));
        assert_eq!(node.get("_hint"), Some(&json!("interactive")));
        for dropped in ["effects", "reactions", "relativeTransform", "paddingLeft", "exportSettings", "blendMode"] {
            assert!(node.get(dropped).is_none(), "{dropped} should be dropped");
        }

        assert_eq!(node.children.len(), 1);
        assert_eq!(
            node.children[0].get("style"),
            Some(&json!({"size": 14, "font": "Inter", "weight": 500}))
        );

        assert_eq!(result.stats.total_nodes, 2);
        assert_eq!(result.stats.filtered_nodes, 2);
        assert_eq!(result.stats.removed_properties, 5);
        assert_eq!(result.stats.hidden_children, 1);
        assert!(result.stats.filtered_size < result.stats.original_size);
        assert!(result.stats.reduction_percentage > 0.0);
    }

    #[test]
    fn test_large_opaque_values_dropped() {
        let big_list: Vec<i32> = (0..200).collect();
        let node = json!({
            "id": "1",
            "tiny": {"a": 1},
            "medium": {"text": "x".repeat(150)},
            "huge": big_list,
            "flag": true,
            "label": "kept",
            "nothing": null
        });

        let result = filter(&node, None);
        let attrs = &result.node.attributes;
        assert!(attrs.contains_key("tiny"));
        assert!(attrs.contains_key("flag"));
        assert!(attrs.contains_key("label"));
        assert!(!attrs.contains_key("medium"));
        assert!(!attrs.contains_key("huge"));
        assert!(!attrs.contains_key("nothing"));
    }

    #[test]
    fn test_vector_nodes_simplified() {
        let node = json!({
            "id": "3:1",
            "type": "VECTOR",
            "vectorPaths": [{"path": "M0 0"}],
            "fillGeometry": [{"path": "M0 0 L10 10"}]
        });

        let result = filter(&node, None);
        assert!(result.node.get("vectorPaths").is_none());
        assert!(result.node.get("fillGeometry").is_none());
        assert_eq!(result.node.get("_simplified"), Some(&json!("vector_paths_removed")));
        assert_eq!(result.stats.vector_nodes_simplified, 1);
    }

    #[test]
    fn test_malformed_children_skipped() {
        let node = json!({
            "id": "1",
            "type": "FRAME",
            "children": [{"id": "2", "type": "TEXT"}, "oops", 7, null, {}]
        });

        let result = filter(&node, None);
        assert_eq!(result.node.children.len(), 1);
        assert_eq!(result.stats.skipped_children, 3);
    }

    #[test]
    fn test_malformed_input_yields_empty_node() {
        assert!(filter(&json!("just a string"), None).node.is_empty());
        assert!(filter(&json!([{"id": "1"}]), None).node.is_empty());
        assert!(filter(&json!({}), None).node.is_empty());
        assert_eq!(filter(&json!(null), None).stats.total_nodes, 0);
    }

    #[test]
    fn test_depth_budget() {
        let node = json!({
            "id": "0",
            "children": [{"id": "1", "children": [{"id": "2", "children": [{"id": "3"}]}]}]
        });

        let root_only = filter(&node, Some(0));
        assert!(root_only.node.children.is_empty());
        assert_eq!(root_only.stats.depth_limited_nodes, 1);

        let two_levels = filter(&node, Some(2));
        let level2 = &two_levels.node.children[0].children[0];
        assert_eq!(level2.id(), Some("2"));
        assert!(level2.children.is_empty());

        let all = filter(&node, None);
        assert_eq!(all.node.node_count(), 4);
    }

    #[test]
    fn test_depth_ceiling_without_budget() {
        let mut node = json!({"id": "leaf"});
        for i in 0..(MAX_TREE_DEPTH + 50) {
            node = json!({"id": format!("n{i}"), "children": [node]});
        }

        let result = filter(&node, None);
        assert!(result.node.node_count() <= MAX_TREE_DEPTH);
        assert_eq!(result.stats.depth_limited_nodes, 1);
    }

    #[test]
    fn test_token_estimate() {
        let stats = FilterStats {
            original_size: 4000,
            filtered_size: 1000,
            ..FilterStats::default()
        };
        let tokens = stats.estimate_tokens();
        assert_eq!(tokens.original_tokens, 1000);
        assert_eq!(tokens.filtered_tokens, 250);
        assert_eq!(tokens.tokens_saved, 750);
        assert_eq!(tokens.reduction_percentage, 75.0);

        let grown = FilterStats {
            original_size: 40,
            filtered_size: 80,
            ..FilterStats::default()
        };
        assert_eq!(grown.estimate_tokens().tokens_saved, 0);
    }

    #[test]
    fn test_annotations_may_grow_tiny_nodes() {
        for node in [json!({"type": "VECTOR"}), json!({"name": "btn"}), json!({"layoutMode": "VERTICAL"})] {
            let result = filter(&node, None);
            assert!(result.stats.filtered_size > result.stats.original_size);
            assert!(size_without_annotations(&result.node) <= result.stats.original_size);
        }
    }

    fn contains_removed(node: &FilteredNode) -> bool {
        node.attributes.keys().any(|k| REMOVED_PROPERTIES.contains(&k.as_str()))
            || node.children.iter().any(contains_removed)
    }

    fn arb_attributes() -> impl Strategy<Value = Map<String, Value>> {
        let key = prop::sample::select(vec![
            "id", "name", "type", "layoutMode", "opacity", "cornerRadius", "effects", "reactions",
            "size", "layoutVersion", "exportSettings", "strokeDashes", "fills",
        ]);
        let value = prop_oneof![
            any::<i32>().prop_map(|v| json!(v)),
            prop::sample::select(vec![
                "VECTOR", "FRAME", "TEXT", "HORIZONTAL", "VERTICAL", "Submit Button", "Top Nav", "Email Field",
            ])
            .prop_map(|v| json!(v)),
        ];
        prop::collection::vec((key, value), 0..6)
            .prop_map(|pairs| pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Serialized size of a filtered tree with the added annotations removed.
    fn size_without_annotations(node: &FilteredNode) -> usize {
        fn strip(value: &mut Value) {
            if let Value::Object(map) = value {
                for key in [hints::HINT, hints::LAYOUT_HINT, "_simplified"] {
                    map.shift_remove(key);
                }
                if let Some(Value::Array(children)) = map.get_mut(CHILDREN) {
                    children.iter_mut().for_each(strip);
                }
            }
        }
        let mut value = node.to_value();
        strip(&mut value);
        serialized_len(&value)
    }

    fn arb_node() -> impl Strategy<Value = Value> {
        let leaf = arb_attributes().prop_map(Value::Object);
        leaf.prop_recursive(4, 48, 4, |inner| {
            (arb_attributes(), prop::collection::vec(inner, 0..4)).prop_map(|(mut attrs, children)| {
                attrs.insert(CHILDREN.to_string(), Value::Array(children));
                Value::Object(attrs)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_denylist_never_survives(node in arb_node()) {
            let result = filter(&node, None);
            prop_assert!(!contains_removed(&result.node));
        }

        #[test]
        fn prop_filtered_never_larger(node in arb_node()) {
            let result = filter(&node, None);
            prop_assert!(size_without_annotations(&result.node) <= result.stats.original_size);
        }
    }
}
