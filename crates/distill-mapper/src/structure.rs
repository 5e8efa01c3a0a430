//! Structure and style detection.
//!
//! Structural predicates look at node type, geometry, children and layout.
//! Style rules are the geometry-only fallback.

use distill_core::value::{attr_truthy, is_truthy, str_attr};
use distill_core::Bounds;
use distill_layout::{LayoutNode, LayoutType};
use serde_json::Value;

use crate::kind::ComponentKind;
use crate::naming::match_rules;

type Predicate = fn(&LayoutNode<'_>) -> bool;

/// Structural predicates, evaluated in order.
const PREDICATES: &[(ComponentKind, Predicate, &str)] = &[
    (ComponentKind::Button, is_button, "button structure"),
    (ComponentKind::TextInput, is_text_input, "input structure"),
    (ComponentKind::Card, is_card, "card structure"),
    (ComponentKind::Navbar, is_navbar, "navbar structure"),
    (ComponentKind::Table, is_table, "table structure"),
    (ComponentKind::Chip, is_chip, "chip structure"),
    (ComponentKind::Avatar, is_avatar, "avatar structure"),
];

/// Classify by structure. Returns the kind and a short description of the
/// signal that fired.
pub fn detect_by_structure(node: &LayoutNode<'_>) -> Option<(ComponentKind, String)> {
    instance_kind(node).or_else(|| {
        PREDICATES
            .iter()
            .find(|(_, predicate, _)| predicate(node))
            .map(|(kind, _, signal)| (*kind, signal.to_string()))
    })
}

/// Component instances: the instance name, then the variant `type`.
fn instance_kind(node: &LayoutNode<'_>) -> Option<(ComponentKind, String)> {
    let source = node.source?;
    if source.node_type() != Some("INSTANCE") || !source.get("componentId").is_some_and(is_truthy) {
        return None;
    }

    let name = node.name.as_deref().unwrap_or_default().to_lowercase();
    if let Some(found) = match_rules(&name) {
        return Some((found.kind, format!("instance name '{}'", found.signal)));
    }

    let variant = source
        .get("variantProperties")
        .and_then(Value::as_object)
        .and_then(|props| str_attr(props, "type"))?
        .to_lowercase();
    let kind = if variant.contains("button") {
        ComponentKind::Button
    } else if variant.contains("input") {
        ComponentKind::TextInput
    } else if variant.contains("nav") {
        ComponentKind::Navbar
    } else {
        return None;
    };
    Some((kind, format!("variant type '{variant}'")))
}

/// Classify by style. Returns the kind and a short description of the shape.
pub fn detect_by_style(node: &LayoutNode<'_>) -> Option<(ComponentKind, String)> {
    let bounds = bounds_of(node);
    let (w, h) = (bounds.width, bounds.height);
    let node_type = node.node_type.as_deref();

    if matches!(node_type, Some("RECTANGLE" | "FRAME")) && w == h && (10.0..=50.0).contains(&w) {
        return Some((ComponentKind::Icon, format!("square {w}x{h}")));
    }

    if node_type == Some("RECTANGLE") && ((w > 100.0 && h <= 2.0) || (h > 100.0 && w <= 2.0)) {
        return Some((ComponentKind::Divider, format!("thin {w}x{h}")));
    }

    None
}

fn bounds_of(node: &LayoutNode<'_>) -> Bounds {
    node.source.and_then(|source| source.bounds()).unwrap_or_default()
}

fn type_in(node: &LayoutNode<'_>, types: &[&str]) -> bool {
    node.node_type.as_deref().is_some_and(|t| types.contains(&t))
}

fn has_text_child(node: &LayoutNode<'_>) -> bool {
    node.children.iter().any(|child| child.node_type.as_deref() == Some("TEXT"))
}

fn truthy(node: &LayoutNode<'_>, key: &str) -> bool {
    node.source.is_some_and(|source| attr_truthy(&source.attributes, key))
}

fn corner_radius(node: &LayoutNode<'_>) -> f64 {
    node.attribute("cornerRadius").and_then(Value::as_f64).unwrap_or(0.0)
}

fn has_drop_shadow(node: &LayoutNode<'_>) -> bool {
    node.attribute("effects")
        .and_then(Value::as_array)
        .is_some_and(|effects| {
            effects.iter().any(|e| e.get("type").and_then(Value::as_str) == Some("DROP_SHADOW"))
        })
}

/// A sizeable container with a text label and some visual weight.
fn is_button(node: &LayoutNode<'_>) -> bool {
    if !type_in(node, &["FRAME", "RECTANGLE", "COMPONENT", "INSTANCE"]) {
        return false;
    }
    let b = bounds_of(node);
    if b.width < 50.0 || b.height < 24.0 {
        return false;
    }
    has_text_child(node) && (truthy(node, "fills") || corner_radius(node) > 0.0 || truthy(node, "effects"))
}

fn is_text_input(node: &LayoutNode<'_>) -> bool {
    if !type_in(node, &["FRAME", "RECTANGLE"]) {
        return false;
    }
    let b = bounds_of(node);
    if b.width < 100.0 || b.height < 30.0 {
        return false;
    }
    truthy(node, "strokes") || (b.width > b.height * 3.0 && has_text_child(node))
}

fn is_card(node: &LayoutNode<'_>) -> bool {
    if !type_in(node, &["FRAME", "COMPONENT", "INSTANCE"]) {
        return false;
    }
    let b = bounds_of(node);
    if b.width < 150.0 || b.height < 100.0 {
        return false;
    }
    (truthy(node, "fills") || has_drop_shadow(node)) && node.children.len() >= 2
}

/// A wide, thin horizontal strip near the top.
fn is_navbar(node: &LayoutNode<'_>) -> bool {
    if node.layout_type != LayoutType::Horizontal {
        return false;
    }
    let Some(b) = node.source.and_then(|source| source.bounds()) else {
        return false;
    };
    b.y <= 100.0 && b.height <= b.width * 0.2 && node.children.len() >= 2
}

/// A grid with at least two rows and columns, or a vertical stack of
/// horizontal rows with matching cell counts.
fn is_table(node: &LayoutNode<'_>) -> bool {
    match node.layout_type {
        LayoutType::Grid => {
            node.metadata.rows.unwrap_or(0) >= 2 && node.metadata.columns.unwrap_or(0) >= 2
        }
        LayoutType::Vertical if node.children.len() >= 3 => {
            let first = &node.children[0];
            first.layout_type == LayoutType::Horizontal
                && node.children[1..].iter().all(|row| {
                    row.layout_type == LayoutType::Horizontal && row.children.len() == first.children.len()
                })
        }
        _ => false,
    }
}

/// A small pill with a label.
fn is_chip(node: &LayoutNode<'_>) -> bool {
    if !type_in(node, &["FRAME", "COMPONENT", "INSTANCE"]) {
        return false;
    }
    let b = bounds_of(node);
    if b.width < 40.0 || b.height < 20.0 || b.height > 40.0 {
        return false;
    }
    corner_radius(node) >= b.height / 3.0 && has_text_child(node)
}

fn is_avatar(node: &LayoutNode<'_>) -> bool {
    if !type_in(node, &["ELLIPSE", "FRAME", "RECTANGLE"]) {
        return false;
    }
    let b = bounds_of(node);
    if !b.is_square(5.0) || b.width < 24.0 || b.width > 150.0 {
        return false;
    }
    if node.node_type.as_deref() == Some("ELLIPSE") {
        return true;
    }
    corner_radius(node) >= b.width / 2.0 && !node.children.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_core::FilteredNode;
    use distill_layout::reconstruct;
    use serde_json::json;

    fn shape(node_type: &str, w: f64, h: f64) -> FilteredNode {
        FilteredNode::new()
            .with_attribute("id", "1")
            .with_attribute("name", "Shape")
            .with_attribute("type", node_type)
            .with_attribute("absoluteBoundingBox", json!({"x": 0, "y": 0, "width": w, "height": h}))
    }

    fn label() -> FilteredNode {
        FilteredNode::new()
            .with_attribute("id", "t")
            .with_attribute("type", "TEXT")
            .with_attribute("characters", "Go")
    }

    fn structure_of(node: &FilteredNode) -> Option<ComponentKind> {
        let layout = reconstruct(node).root.unwrap();
        detect_by_structure(&layout).map(|(kind, _)| kind)
    }

    fn style_of(node: &FilteredNode) -> Option<ComponentKind> {
        let layout = reconstruct(node).root.unwrap();
        detect_by_style(&layout).map(|(kind, _)| kind)
    }

    #[test]
    fn test_button_structure() {
        let button = shape("FRAME", 100.0, 40.0)
            .with_attribute("fills", "rgb(0,102,204)")
            .with_child(label());
        assert_eq!(structure_of(&button), Some(ComponentKind::Button));

        let too_small = shape("FRAME", 40.0, 20.0).with_attribute("fills", "rgb(0,0,0)").with_child(label());
        assert_ne!(structure_of(&too_small), Some(ComponentKind::Button));
    }

    #[test]
    fn test_input_structure() {
        let input = shape("FRAME", 200.0, 36.0).with_attribute("strokes", json!({"color": "rgb(0,0,0)", "weight": 1}));
        assert_eq!(structure_of(&input), Some(ComponentKind::TextInput));
    }

    #[test]
    fn test_card_structure() {
        let card = shape("FRAME", 300.0, 200.0)
            .with_attribute("fills", "rgb(255,255,255)")
            .with_child(shape("RECTANGLE", 300.0, 120.0))
            .with_child(shape("RECTANGLE", 300.0, 60.0));
        assert_eq!(structure_of(&card), Some(ComponentKind::Card));
    }

    #[test]
    fn test_grid_table_structure() {
        let cell = |x: f64, y: f64| {
            FilteredNode::new()
                .with_attribute("type", "RECTANGLE")
                .with_attribute("absoluteBoundingBox", json!({"x": x, "y": y, "width": 90, "height": 30}))
        };
        let table = FilteredNode::new()
            .with_attribute("id", "g")
            .with_attribute("type", "GROUP")
            .with_attribute("layoutMode", "GRID")
            .with_child(cell(0.0, 0.0))
            .with_child(cell(100.0, 0.0))
            .with_child(cell(0.0, 40.0))
            .with_child(cell(100.0, 40.0));
        assert_eq!(structure_of(&table), Some(ComponentKind::Table));
    }

    #[test]
    fn test_chip_and_avatar_structure() {
        let chip = shape("FRAME", 60.0, 22.0).with_attribute("cornerRadius", 11).with_child(label());
        assert_eq!(structure_of(&chip), Some(ComponentKind::Chip));

        assert_eq!(structure_of(&shape("ELLIPSE", 40.0, 40.0)), Some(ComponentKind::Avatar));
        assert_eq!(structure_of(&shape("ELLIPSE", 200.0, 200.0)), None);
    }

    #[test]
    fn test_instance_variant_type() {
        let instance = shape("INSTANCE", 10.0, 10.0)
            .with_attribute("componentId", "c:1")
            .with_attribute("variantProperties", json!({"type": "Primary Button"}));
        let layout = reconstruct(&instance).root.unwrap();
        let (kind, signal) = detect_by_structure(&layout).unwrap();

        assert_eq!(kind, ComponentKind::Button);
        assert_eq!(signal, "variant type 'primary button'");
    }

    #[test]
    fn test_style_rules() {
        assert_eq!(style_of(&shape("RECTANGLE", 24.0, 24.0)), Some(ComponentKind::Icon));
        assert_eq!(style_of(&shape("FRAME", 50.0, 50.0)), Some(ComponentKind::Icon));
        assert_eq!(style_of(&shape("RECTANGLE", 60.0, 60.0)), None);
        assert_eq!(style_of(&shape("RECTANGLE", 300.0, 1.0)), Some(ComponentKind::Divider));
        assert_eq!(style_of(&shape("RECTANGLE", 2.0, 101.0)), Some(ComponentKind::Divider));
        assert_eq!(style_of(&shape("FRAME", 300.0, 1.0)), None);
    }
}
