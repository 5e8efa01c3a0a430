//! The mapping pass.

use distill_layout::{LayoutNode, LayoutType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::kind::{ComponentKind, DetectionMethod};
use crate::naming::detect_by_name;
use crate::properties::{extract_properties, Properties};
use crate::structure::{detect_by_structure, detect_by_style};

/// Undetected nodes recorded in detail; later ones are only counted.
pub const MAX_UNDETECTED_RECORDS: usize = 1000;

/// A layout node classified as a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedComponent {
    pub kind: ComponentKind,
    pub node_id: Option<String>,
    pub node_name: Option<String>,
    pub confidence: f64,
    pub method: DetectionMethod,
    /// The text or shape that triggered the classification.
    pub signal: String,
    pub properties: Properties,
    /// Classified descendants whose nearest classified ancestor is this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MappedComponent>,
}

impl MappedComponent {
    /// Number of components in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MappedComponent::count).sum::<usize>()
    }
}

/// A node no tier could classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndetectedNode {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub layout_type: LayoutType,
    pub children_count: usize,
    pub has_text: bool,
    pub possible_reasons: Vec<String>,
}

/// Counters collected during mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingStats {
    pub total_nodes: usize,
    pub detected_by_name: usize,
    pub detected_by_structure: usize,
    pub detected_by_style: usize,
    pub undetected: usize,
    pub detection_rate: f64,
    pub name_detection_rate: f64,
    pub structure_detection_rate: f64,
    pub style_detection_rate: f64,
}

impl MappingStats {
    pub fn detected(&self) -> usize {
        self.detected_by_name + self.detected_by_structure + self.detected_by_style
    }

    fn finish(&mut self) {
        if self.total_nodes == 0 {
            return;
        }
        let rate = |count: usize| count as f64 / self.total_nodes as f64 * 100.0;
        self.detection_rate = rate(self.detected());
        self.name_detection_rate = rate(self.detected_by_name);
        self.structure_detection_rate = rate(self.detected_by_structure);
        self.style_detection_rate = rate(self.detected_by_style);
    }
}

/// Result of mapping a layout tree.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    /// Top-level components; nested ones hang off their nearest
    /// classified ancestor.
    pub components: Vec<MappedComponent>,
    pub stats: MappingStats,
    /// The first [`MAX_UNDETECTED_RECORDS`] unclassified nodes, in walk order.
    pub undetected: Vec<UndetectedNode>,
}

impl Mapping {
    /// Total number of mapped components at every depth.
    pub fn component_count(&self) -> usize {
        self.components.iter().map(MappedComponent::count).sum()
    }

    /// Every component with its nesting depth, parents first.
    pub fn flatten(&self) -> Vec<(usize, &MappedComponent)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, &MappedComponent)> = self.components.iter().rev().map(|c| (0, c)).collect();
        while let Some((depth, component)) = stack.pop() {
            out.push((depth, component));
            stack.extend(component.children.iter().rev().map(|c| (depth + 1, c)));
        }
        out
    }
}

/// Classify every node of a layout tree.
pub fn map_components(root: &LayoutNode<'_>) -> Mapping {
    let mut mapper = Mapper::default();
    let mut components = Vec::new();
    mapper.map_node(root, &mut components);

    let mut stats = mapper.stats;
    stats.finish();

    debug!(
        total = stats.total_nodes,
        detected = stats.detected(),
        undetected = stats.undetected,
        "mapped components"
    );

    Mapping {
        components,
        stats,
        undetected: mapper.undetected,
    }
}

/// Classify a single node without looking at its descendants' classes.
pub fn identify(node: &LayoutNode<'_>) -> Option<MappedComponent> {
    let (kind, method, signal) = detect(node)?;
    Some(component(node, kind, method, signal))
}

fn detect(node: &LayoutNode<'_>) -> Option<(ComponentKind, DetectionMethod, String)> {
    if let Some(found) = node.name.as_deref().and_then(detect_by_name) {
        return Some((found.kind, DetectionMethod::Naming, found.signal));
    }
    if let Some((kind, signal)) = detect_by_structure(node) {
        return Some((kind, DetectionMethod::Structure, signal));
    }
    detect_by_style(node).map(|(kind, signal)| (kind, DetectionMethod::Style, signal))
}

fn component(node: &LayoutNode<'_>, kind: ComponentKind, method: DetectionMethod, signal: String) -> MappedComponent {
    MappedComponent {
        kind,
        node_id: node.id.clone(),
        node_name: node.name.clone(),
        confidence: method.confidence(),
        method,
        signal,
        properties: extract_properties(node, kind),
        children: Vec::new(),
    }
}

#[derive(Default)]
struct Mapper {
    stats: MappingStats,
    undetected: Vec<UndetectedNode>,
}

impl Mapper {
    fn map_node(&mut self, node: &LayoutNode<'_>, out: &mut Vec<MappedComponent>) {
        self.stats.total_nodes += 1;

        match detect(node) {
            Some((kind, method, signal)) => {
                match method {
                    DetectionMethod::Naming => self.stats.detected_by_name += 1,
                    DetectionMethod::Structure => self.stats.detected_by_structure += 1,
                    DetectionMethod::Style => self.stats.detected_by_style += 1,
                }
                let mut mapped = component(node, kind, method, signal);
                for child in &node.children {
                    self.map_node(child, &mut mapped.children);
                }
                out.push(mapped);
            }
            None => {
                self.stats.undetected += 1;
                if self.undetected.len() < MAX_UNDETECTED_RECORDS {
                    self.undetected.push(undetected_record(node));
                }
                for child in &node.children {
                    self.map_node(child, out);
                }
            }
        }
    }
}

fn undetected_record(node: &LayoutNode<'_>) -> UndetectedNode {
    UndetectedNode {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        layout_type: node.layout_type,
        children_count: node.children.len(),
        has_text: node
            .attribute("characters")
            .and_then(Value::as_str)
            .is_some_and(|text| !text.is_empty()),
        possible_reasons: unmatch_reasons(node),
    }
}

/// Likely reasons a node was not classified.
pub fn unmatch_reasons(node: &LayoutNode<'_>) -> Vec<String> {
    let mut reasons = Vec::new();
    let node_type = node.node_type.as_deref();

    let generic = node
        .name
        .as_deref()
        .map_or(true, |name| matches!(name.to_lowercase().as_str(), "" | "frame" | "group" | "rectangle" | "vector"));
    if generic {
        reasons.push("Generic element name (Frame/Group/Rectangle)".to_string());
    }

    if node.children.len() > 2
        && matches!(node.layout_type, LayoutType::Horizontal | LayoutType::Vertical | LayoutType::Grid)
    {
        reasons.push(format!("Appears to be a layout container ({})", node.layout_type));
    }

    if node_type == Some("TEXT") && node.children.is_empty() {
        reasons.push("Standalone text element (not part of a component)".to_string());
    }

    if matches!(node_type, Some("VECTOR" | "ELLIPSE" | "POLYGON" | "REGULAR_POLYGON" | "STAR" | "LINE")) {
        reasons.push("Decorative/graphic element".to_string());
    }

    if node_type == Some("RECTANGLE") && node.attribute("fills").is_some() {
        reasons.push("Possible image or background element".to_string());
    }

    if reasons.is_empty() {
        reasons.push("No clear component pattern detected".to_string());
    }
    reasons
}
