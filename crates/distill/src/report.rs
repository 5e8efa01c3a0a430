//! Developer-facing reports: unmapped nodes and component imports.

use std::collections::BTreeSet;

use distill_mapper::{Mapping, UndetectedNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reasons listed in an [`UndetectedReport`].
const TOP_REASONS: usize = 5;
/// Distinct example names listed per reason.
const EXAMPLES_PER_REASON: usize = 2;

/// Why nodes went unmapped, most common reasons first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndetectedReport {
    pub count: usize,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_reason: Vec<ReasonSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonSummary {
    pub reason: String,
    pub count: usize,
    /// Up to two distinct names, with `(×n)` when a name repeats.
    pub examples: Vec<String>,
}

/// Summarize the unmapped nodes of a mapping.
pub fn undetected_report(mapping: &Mapping) -> UndetectedReport {
    let count = mapping.stats.undetected;
    if count == 0 {
        return UndetectedReport {
            count,
            summary: "All nodes were mapped to components".to_string(),
            by_reason: Vec::new(),
        };
    }

    UndetectedReport {
        count,
        summary: format!("{count} elements unmapped"),
        by_reason: group_by_reason(&mapping.undetected),
    }
}

fn group_by_reason(nodes: &[UndetectedNode]) -> Vec<ReasonSummary> {
    let mut by_reason: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for node in nodes {
        let name = node.name.as_deref().or(node.node_type.as_deref()).unwrap_or("Unnamed");
        for reason in &node.possible_reasons {
            by_reason.entry(reason.as_str()).or_default().push(name);
        }
    }

    let mut reasons: Vec<(&str, Vec<&str>)> = by_reason.into_iter().collect();
    reasons.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    reasons
        .into_iter()
        .take(TOP_REASONS)
        .map(|(reason, names)| {
            let mut name_counts: IndexMap<&str, usize> = IndexMap::new();
            for name in &names {
                *name_counts.entry(*name).or_default() += 1;
            }
            let examples = name_counts
                .into_iter()
                .take(EXAMPLES_PER_REASON)
                .map(|(name, n)| if n > 1 { format!("{name} (×{n})") } else { name.to_string() })
                .collect();

            ReasonSummary {
                reason: reason.to_string(),
                count: names.len(),
                examples,
            }
        })
        .collect()
}

/// PascalCase imports for every mapped component kind, sorted.
pub fn required_imports(mapping: &Mapping) -> Vec<String> {
    mapping
        .flatten()
        .into_iter()
        .map(|(_, component)| component.kind.import_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_layout::LayoutType;

    fn record(name: &str, reasons: &[&str]) -> UndetectedNode {
        UndetectedNode {
            id: None,
            name: Some(name.to_string()),
            node_type: Some("FRAME".to_string()),
            layout_type: LayoutType::Absolute,
            children_count: 0,
            has_text: false,
            possible_reasons: reasons.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_reasons_ranked_with_examples() {
        let mut mapping = Mapping::default();
        mapping.undetected = vec![
            record("Label", &["Standalone text"]),
            record("Frame", &["Generic name", "No pattern"]),
            record("Frame", &["Generic name"]),
            record("Group", &["Generic name"]),
            record("Vector", &["Generic name"]),
        ];
        mapping.stats.undetected = 5;

        let report = undetected_report(&mapping);
        assert_eq!(report.count, 5);
        assert_eq!(report.summary, "5 elements unmapped");
        assert_eq!(report.by_reason.len(), 3);
        assert_eq!(report.by_reason[0].reason, "Generic name");
        assert_eq!(report.by_reason[0].count, 4);
        assert_eq!(report.by_reason[0].examples, ["Frame (×2)", "Group"]);
        assert_eq!(report.by_reason[1].reason, "Standalone text");
    }

    #[test]
    fn test_everything_mapped() {
        let report = undetected_report(&Mapping::default());
        assert_eq!(report.count, 0);
        assert!(report.by_reason.is_empty());
    }
}
