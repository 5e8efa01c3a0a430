//! The full pipeline and its combined output.

use distill_core::{DistillError, Result};
use distill_filter::{FilterStats, TokenEstimate};
use distill_layout::LayoutStats;
use distill_mapper::{map_components, ComponentKind, DetectionMethod, MappedComponent, Mapping, MappingStats, Properties};
use distill_summary::{compact_summary, hierarchical_summary, CompactSummary, ComponentIndex, SummaryNode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{CatalogReport, ComponentCatalog};
use crate::options::AnalyzeOptions;
use crate::page::{detect_page_pattern, PagePattern};
use crate::report::{required_imports, undetected_report, UndetectedReport};

/// Everything produced from one design tree.
///
/// On unusable input every section is empty and `error` holds the reason.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    pub llm_summary: Option<SummaryNode>,
    pub compact_summary: Option<CompactSummary>,
    /// Classified components in pre-order.
    pub components: Vec<ComponentRecord>,
    pub component_tree: Vec<MappedComponent>,
    pub page_pattern: Option<PagePattern>,
    pub undetected_components: Option<UndetectedReport>,
    pub imports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogReport>,
    pub statistics: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Analysis {
    fn failed(error: &DistillError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Kinds of the classified components, in pre-order.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.iter().map(|record| record.kind)
    }
}

/// One classified component in the flat listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub kind: ComponentKind,
    /// Full element name, e.g. `modus-wc-button`.
    pub element: String,
    pub confidence: f64,
    pub method: DetectionMethod,
    pub signal: String,
    pub properties: Properties,
    /// Nesting depth among classified components.
    pub depth: usize,
}

impl ComponentRecord {
    fn new(depth: usize, component: &MappedComponent) -> Self {
        Self {
            id: component.node_id.clone(),
            name: component.node_name.clone(),
            kind: component.kind,
            element: component.kind.element_name(),
            confidence: component.confidence,
            method: component.method,
            signal: component.signal.clone(),
            properties: component.properties.clone(),
            depth,
        }
    }
}

/// Per-stage counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub filtering: FilterStats,
    /// Token savings implied by the filtered size.
    pub tokens: TokenEstimate,
    pub layout: LayoutStats,
    pub mapping: MappingStats,
}

/// Run every stage, failing on input that is not a usable node.
pub fn try_analyze(root: &Value, options: &AnalyzeOptions) -> Result<Analysis> {
    DistillError::check_node(root)?;

    let filtered = distill_filter::filter_with(root, &options.filter);

    let reconstruction = distill_layout::reconstruct_with(&filtered.node, &options.layout);
    let layout_root = reconstruction.root.ok_or(DistillError::NoLayout)?;
    let mapping = map_components(&layout_root);

    let index = ComponentIndex::from_mapping(&mapping);
    let llm_summary = hierarchical_summary(&layout_root, &index, &options.summary);
    let compact = compact_summary(&layout_root, &index);
    let page_pattern = detect_page_pattern(&layout_root, &mapping);
    debug!(
        components = mapping.component_count(),
        page_type = %page_pattern.page_type,
        "analysis complete"
    );

    Ok(Analysis {
        llm_summary: Some(llm_summary),
        compact_summary: Some(compact),
        components: records(&mapping),
        page_pattern: Some(page_pattern),
        undetected_components: Some(undetected_report(&mapping)),
        imports: required_imports(&mapping),
        catalog: None,
        statistics: Statistics {
            tokens: filtered.stats.estimate_tokens(),
            filtering: filtered.stats,
            layout: reconstruction.stats,
            mapping: mapping.stats,
        },
        component_tree: mapping.components,
        error: None,
    })
}

/// Run every stage. Unusable input yields an [`Analysis`] carrying only an
/// error message.
pub fn analyze(root: &Value, options: &AnalyzeOptions) -> Analysis {
    try_analyze(root, options).unwrap_or_else(|e| Analysis::failed(&e))
}

/// [`analyze`], then check the detected kinds against a catalog.
pub fn analyze_with_catalog(root: &Value, options: &AnalyzeOptions, catalog: &ComponentCatalog) -> Analysis {
    let mut analysis = analyze(root, options);
    if analysis.error.is_none() {
        analysis.catalog = Some(catalog.report(analysis.kinds()));
    }
    analysis
}

fn records(mapping: &Mapping) -> Vec<ComponentRecord> {
    mapping
        .flatten()
        .into_iter()
        .map(|(depth, component)| ComponentRecord::new(depth, component))
        .collect()
}
