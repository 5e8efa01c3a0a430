//! Paint colors as they appear in raw and filtered nodes.
//!
//! Raw nodes describe paints as `{type, color: {r, g, b, a}}` objects with
//! channels in 0..1. The filter stage compacts them to `rgb(r,g,b)` or
//! `rgba(r,g,b,a)` strings with 8-bit channels. [`Color::from_paint`] reads
//! either form so later stages work on both.

use serde_json::Value;

use crate::value::num_attr;

/// An RGBA color with channels in 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Read a `{r, g, b, a}` object with channels in 0..1.
    pub fn from_channels(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            r: num_attr(map, "r").unwrap_or(0.0) as f32,
            g: num_attr(map, "g").unwrap_or(0.0) as f32,
            b: num_attr(map, "b").unwrap_or(0.0) as f32,
            a: num_attr(map, "a").unwrap_or(1.0) as f32,
        })
    }

    /// Parse `rgb(r,g,b)` or `rgba(r,g,b,a)` with 8-bit channels.
    pub fn from_css(text: &str) -> Option<Self> {
        let text = text.trim();
        let inner = text
            .strip_prefix("rgba(")
            .or_else(|| text.strip_prefix("rgb("))?
            .strip_suffix(')')?;

        let parts: Vec<f32> = inner
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<std::result::Result<_, _>>()
            .ok()?;

        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(r / 255.0, g / 255.0, b / 255.0)),
            [r, g, b, a] => Some(Self {
                r: r / 255.0,
                g: g / 255.0,
                b: b / 255.0,
                a: *a,
            }),
            _ => None,
        }
    }

    /// Extract the color of a paint in any of the shapes nodes carry.
    ///
    /// Accepts a compact CSS string, a paint object (`SOLID` only), a
    /// filtered stroke `{color: "rgb(..)"}`, or a paint list (first entry).
    pub fn from_paint(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::from_css(s),
            Value::Array(paints) => paints.first().and_then(Self::from_paint),
            Value::Object(map) => {
                if let Some(kind) = map.get("type").and_then(Value::as_str) {
                    if kind != "SOLID" {
                        return None;
                    }
                }
                match map.get("color")? {
                    Value::String(s) => Self::from_css(s),
                    channels => Self::from_channels(channels),
                }
            }
            _ => None,
        }
    }

    /// Blue dominates and is reasonably saturated.
    pub fn is_blueish(&self) -> bool {
        self.b > 0.5 && self.b > self.r && self.b > self.g
    }

    /// Channels nearly equal and in the mid range.
    pub fn is_grayish(&self) -> bool {
        (self.r - self.g).abs() < 0.1
            && (self.g - self.b).abs() < 0.1
            && self.r > 0.3
            && self.r < 0.8
    }

    /// Red clearly dominates.
    pub fn is_reddish(&self) -> bool {
        self.r > 0.5 && self.r > self.g * 1.5 && self.r > self.b * 1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_css() {
        let c = Color::from_css("rgb(0,102,204)").unwrap();
        assert!(c.r.abs() < 0.001);
        assert!((c.g - 0.4).abs() < 0.001);
        assert!((c.b - 0.8).abs() < 0.001);
        assert!((c.a - 1.0).abs() < 0.001);

        let c = Color::from_css("rgba(255, 0, 0, 0.50)").unwrap();
        assert!((c.a - 0.5).abs() < 0.001);
        assert!(c.is_reddish());

        assert!(Color::from_css("gradient:GRADIENT_LINEAR").is_none());
        assert!(Color::from_css("rgb(1,2)").is_none());
    }

    #[test]
    fn test_from_paint_shapes() {
        let raw = json!([{"type": "SOLID", "color": {"r": 0.0, "g": 0.4, "b": 0.8}}]);
        assert!(Color::from_paint(&raw).unwrap().is_blueish());

        let gradient = json!([{"type": "GRADIENT_LINEAR"}]);
        assert!(Color::from_paint(&gradient).is_none());

        let filtered_stroke = json!({"color": "rgb(220,20,20)", "weight": 1});
        assert!(Color::from_paint(&filtered_stroke).unwrap().is_reddish());

        assert!(Color::from_paint(&json!("rgb(128,128,128)")).unwrap().is_grayish());
        assert!(Color::from_paint(&json!(42)).is_none());
    }

    #[test]
    fn test_color_families() {
        assert!(Color::rgb(0.1, 0.2, 0.9).is_blueish());
        assert!(!Color::rgb(0.1, 0.2, 0.4).is_blueish());
        assert!(Color::rgb(0.5, 0.5, 0.52).is_grayish());
        assert!(!Color::rgb(0.95, 0.95, 0.95).is_grayish());
        assert!(!Color::rgb(0.6, 0.5, 0.5).is_reddish());
    }
}
