//! Compact replacements for verbose style attributes.
//!
//! Each simplifier returns `None` when the attribute carries nothing worth
//! keeping, in which case the filter drops it entirely. Values already in
//! compact form pass through unchanged, so filtered output can be filtered
//! again.

use distill_core::value::{is_truthy, num_attr, obj_attr, str_attr, Attributes};
use serde_json::{json, Map, Value};

/// Replaces one attribute value with its compact form.
pub type Simplifier = fn(&Value) -> Option<Value>;

/// Simplifier for an attribute key, if that key is simplifiable.
pub fn simplifier(key: &str) -> Option<Simplifier> {
    let simplify: Simplifier = match key {
        "fills" => fills,
        "strokes" => strokes,
        "constraints" => constraints,
        "style" => text_style,
        "layoutGrids" => layout_grids,
        "blendMode" => blend_mode,
        _ => return None,
    };
    Some(simplify)
}

fn is_visible(paint: &Attributes) -> bool {
    paint.get("visible").map_or(true, is_truthy)
}

/// 8-bit channels from a `{r, g, b}` object in 0..1, truncated.
fn rgb8(color: Option<&Attributes>) -> (i64, i64, i64) {
    let channel = |key: &str| {
        let value = color.and_then(|c| num_attr(c, key)).unwrap_or(0.0);
        (value * 255.0) as i64
    };
    (channel("r"), channel("g"), channel("b"))
}

/// First visible solid fill as `rgb()`/`rgba()`, else the first gradient type.
pub fn fills(value: &Value) -> Option<Value> {
    if value.is_string() {
        return Some(value.clone());
    }
    let paints = value.as_array().filter(|p| !p.is_empty())?;
    let paints: Vec<&Attributes> = paints.iter().filter_map(Value::as_object).collect();

    for paint in &paints {
        if is_visible(paint) && str_attr(paint, "type") == Some("SOLID") {
            let (r, g, b) = rgb8(obj_attr(paint, "color"));
            let opacity = num_attr(paint, "opacity").unwrap_or(1.0);
            let css = if opacity < 1.0 {
                format!("rgba({r},{g},{b},{opacity:.2})")
            } else {
                format!("rgb({r},{g},{b})")
            };
            return Some(Value::String(css));
        }
    }

    paints
        .iter()
        .filter_map(|paint| str_attr(paint, "type"))
        .find(|kind| matches!(*kind, "GRADIENT_LINEAR" | "GRADIENT_RADIAL"))
        .map(|kind| Value::String(format!("gradient:{kind}")))
}

/// First visible stroke as `{color, weight}`.
pub fn strokes(value: &Value) -> Option<Value> {
    if value.get("color").is_some_and(Value::is_string) {
        return Some(value.clone());
    }
    let stroke = value
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .find(|stroke| is_visible(stroke))?;

    let (r, g, b) = rgb8(obj_attr(stroke, "color"));
    Some(json!({
        "color": format!("rgb({r},{g},{b})"),
        "weight": stroke.get("weight").cloned().unwrap_or_else(|| json!(1)),
    }))
}

/// Constraints as `{h, v}`.
pub fn constraints(value: &Value) -> Option<Value> {
    let map = value.as_object()?;
    let raw = map.contains_key("horizontal") || map.contains_key("vertical");
    if !raw && (map.contains_key("h") || map.contains_key("v")) {
        return Some(value.clone());
    }
    Some(json!({
        "h": map.get("horizontal").cloned().unwrap_or_else(|| json!("LEFT")),
        "v": map.get("vertical").cloned().unwrap_or_else(|| json!("TOP")),
    }))
}

/// Text style reduced to size, font, weight and alignment.
pub fn text_style(value: &Value) -> Option<Value> {
    let style = value.as_object()?;
    let mut simplified = Map::new();
    for (from, to) in [
        ("fontSize", "size"),
        ("fontFamily", "font"),
        ("fontWeight", "weight"),
        ("textAlignHorizontal", "align"),
    ] {
        if let Some(v) = style.get(from).or_else(|| style.get(to)) {
            simplified.insert(to.to_string(), v.clone());
        }
    }
    Some(Value::Object(simplified))
}

/// Visible layout grid patterns, comma-joined.
pub fn layout_grids(value: &Value) -> Option<Value> {
    if value.is_string() {
        return Some(value.clone());
    }
    let patterns: Vec<&str> = value
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .filter(|grid| is_visible(grid))
        .map(|grid| str_attr(grid, "pattern").unwrap_or("GRID"))
        .collect();

    if patterns.is_empty() {
        None
    } else {
        Some(Value::String(patterns.join(",")))
    }
}

/// Blend mode, unless it is one of the defaults.
pub fn blend_mode(value: &Value) -> Option<Value> {
    match value.as_str()? {
        "" | "NORMAL" | "PASS_THROUGH" => None,
        mode => Some(Value::String(mode.to_string())),
    }
}
