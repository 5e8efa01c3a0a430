//! Kind-specific property extraction.

use distill_core::value::{num_attr, str_attr};
use distill_core::Color;
use distill_layout::LayoutNode;
use serde_json::{Map, Value};

use crate::kind::ComponentKind;

/// Extracted component properties, in insertion order.
pub type Properties = Map<String, Value>;

const INTERACTION_STATES: &[&str] = &["disabled", "hover", "active", "focused"];

/// Extract properties for a node classified as `kind`.
///
/// Variant overrides on component instances win; the remaining properties
/// are inferred from geometry and paint.
pub fn extract_properties(node: &LayoutNode<'_>, kind: ComponentKind) -> Properties {
    let mut props = Properties::new();
    let Some(source) = node.source else {
        return props;
    };
    let attrs = &source.attributes;

    if source.node_type() == Some("INSTANCE") {
        if let Some(variants) = attrs.get("variantProperties").and_then(Value::as_object) {
            variant_overrides(variants, &mut props);
        }
    }

    if let Some(refs) = attrs.get("componentPropertyReferences").and_then(Value::as_object) {
        if let Some(visible) = refs.get("visible") {
            props.insert("visible".into(), visible.clone());
        }
        if let Some(text) = refs.get("characters") {
            props.insert("text".into(), text.clone());
        }
    }

    let bounds = source.bounds();
    let height = bounds.map_or(0.0, |b| b.height);

    match kind {
        ComponentKind::Button => {
            if !props.contains_key("variant") {
                if let Some(color) = attrs.get("fills").and_then(Color::from_paint) {
                    props.insert("variant".into(), button_variant(color).into());
                }
            }
            if !props.contains_key("size") {
                props.insert("size".into(), button_size(height).into());
            }
        }
        ComponentKind::TextInput => {
            let opacity = num_attr(attrs, "opacity").unwrap_or(1.0);
            if !props.contains_key("disabled") && opacity < 0.6 {
                props.insert("disabled".into(), true.into());
            }
            if attrs
                .get("strokes")
                .and_then(Color::from_paint)
                .is_some_and(|c| c.is_reddish())
            {
                props.insert("invalid".into(), true.into());
            }
            if let Some(placeholder) = placeholder_text(node, opacity) {
                props.insert("placeholder".into(), placeholder.into());
            }
        }
        ComponentKind::Chip => {
            if !props.contains_key("size") {
                let size = if height <= 24.0 { "small" } else { "medium" };
                props.insert("size".into(), size.into());
            }
        }
        ComponentKind::Navbar => {
            let fixed = str_attr(attrs, "_hint") == Some("navigation");
            props.insert("position".into(), if fixed { "fixed" } else { "static" }.into());
        }
        ComponentKind::SideNavigation => {
            if bounds.is_some_and(|b| b.width < 100.0) {
                props.insert("collapsed".into(), true.into());
            }
        }
        _ => {}
    }

    if str_attr(attrs, "layoutAlign") == Some("STRETCH") {
        props.insert("fullWidth".into(), true.into());
    }

    props
}

fn variant_overrides(variants: &Map<String, Value>, props: &mut Properties) {
    let lower = |key: &str| str_attr(variants, key).map(str::to_lowercase);

    if let Some(state) = lower("state") {
        if INTERACTION_STATES.contains(&state.as_str()) {
            if state == "disabled" {
                props.insert("disabled".into(), true.into());
            }
            props.insert("state".into(), state.into());
        }
    }
    for key in ["size", "variant", "type"] {
        if let Some(value) = lower(key) {
            props.insert(key.into(), value.into());
        }
    }
}

fn button_variant(fill: Color) -> &'static str {
    if fill.is_blueish() {
        "primary"
    } else if fill.is_grayish() {
        "secondary"
    } else {
        "tertiary"
    }
}

fn button_size(height: f64) -> &'static str {
    if height <= 32.0 {
        "small"
    } else if height >= 48.0 {
        "large"
    } else {
        "medium"
    }
}

/// Text of a placeholder child: a TEXT child named like a placeholder, or
/// any text child of a dimmed input.
fn placeholder_text(node: &LayoutNode<'_>, opacity: f64) -> Option<String> {
    node.children.iter().find_map(|child| {
        if child.node_type.as_deref() != Some("TEXT") {
            return None;
        }
        let text = child.attribute("characters").and_then(Value::as_str).filter(|t| !t.is_empty())?;
        let named = child.name.as_deref().is_some_and(|n| n.to_lowercase().contains("placeholder"));
        (named || opacity < 0.6).then(|| text.to_string())
    })
}
