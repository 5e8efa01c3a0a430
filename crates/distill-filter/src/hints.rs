//! Cheap semantic hints attached to filtered nodes.
//!
//! Hints are derived from the raw node so later stages can pick them up
//! without re-reading geometry. They are advisory only.

use distill_core::geometry::{Bounds, BOUNDING_BOX};
use distill_core::value::{str_attr, Attributes};
use serde_json::Value;

/// Attribute carrying the semantic hint.
pub const HINT: &str = "_hint";
/// Attribute carrying the layout hint.
pub const LAYOUT_HINT: &str = "_layout_hint";

/// Name fragments per semantic hint, checked in order.
const NAME_HINTS: &[(&str, &[&str])] = &[
    ("navigation", &["header", "nav", "toolbar"]),
    ("interactive", &["button", "btn", "cta"]),
    ("container", &["card", "tile", "panel"]),
    ("form_element", &["input", "field", "form"]),
];

/// Add `_hint` and `_layout_hint` to `filtered` based on the raw node.
pub fn annotate(filtered: &mut Attributes, original: &Attributes) {
    let name = str_attr(original, "name").unwrap_or_default().to_lowercase();
    let hint = NAME_HINTS
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|f| name.contains(f)))
        .map(|(hint, _)| *hint);
    if let Some(hint) = hint {
        filtered.insert(HINT.to_string(), Value::from(hint));
    }

    if let Some(layout) = layout_hint(original) {
        filtered.insert(LAYOUT_HINT.to_string(), Value::from(layout));
    }
}

fn layout_hint(original: &Attributes) -> Option<&'static str> {
    match str_attr(original, "layoutMode") {
        Some("HORIZONTAL") => return Some("row"),
        Some("VERTICAL") => return Some("column"),
        _ => {}
    }

    if str_attr(original, "type") != Some("FRAME") {
        return None;
    }
    let children = original.get("children")?.as_array()?;
    if children.len() > 2 && is_grid_arrangement(children) {
        Some("grid")
    } else {
        None
    }
}

/// At least four positioned children spanning two columns and two rows.
pub fn is_grid_arrangement(children: &[Value]) -> bool {
    if children.len() < 4 {
        return false;
    }

    let positions: Vec<Bounds> = children
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|child| child.get(BOUNDING_BOX))
        .filter_map(Bounds::from_value)
        .collect();
    if positions.len() < 4 {
        return false;
    }

    let distinct = |mut coords: Vec<f64>| {
        coords.sort_by(f64::total_cmp);
        coords.dedup();
        coords.len()
    };
    let columns = distinct(positions.iter().map(|b| b.x).collect());
    let rows = distinct(positions.iter().map(|b| b.y).collect());

    columns >= 2 && rows >= 2
}
