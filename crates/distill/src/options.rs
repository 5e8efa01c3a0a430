//! Pipeline configuration.

use distill_filter::FilterOptions;
use distill_layout::ReconstructOptions;
use distill_summary::SummaryOptions;
use serde::{Deserialize, Serialize};

/// Options for every stage of [`analyze`](crate::analyze).
///
/// Deserializes from a partial JSON object; missing fields keep their
/// defaults:
///
/// ```json
/// {"filter": {"max_depth": 12}, "summary": {"max_depth": 4}}
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    pub filter: FilterOptions,
    pub layout: ReconstructOptions,
    pub summary: SummaryOptions,
}

impl AnalyzeOptions {
    /// Levels of children the filter keeps below the root.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.filter.max_depth = max_depth;
        self
    }

    /// Levels shown in the hierarchical summary.
    pub fn with_summary_depth(mut self, depth: usize) -> Self {
        self.summary = self.summary.with_max_depth(depth);
        self
    }

    pub fn with_y_tolerance(mut self, tolerance: f64) -> Self {
        self.layout = self.layout.with_y_tolerance(tolerance);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let options: AnalyzeOptions =
            serde_json::from_str(r#"{"filter": {"max_depth": 12}, "summary": {"max_depth": 4}}"#).unwrap();

        assert_eq!(options.filter.max_depth, Some(12));
        assert_eq!(options.summary.max_depth, 4);
        assert_eq!(options.summary.collapse_threshold, 20);
        assert_eq!(options.layout.y_tolerance, 5.0);
    }

    #[test]
    fn test_builders() {
        let options = AnalyzeOptions::default().with_max_depth(Some(3)).with_summary_depth(0);
        assert_eq!(options.filter.max_depth, Some(3));
        assert_eq!(options.summary.max_depth, 1);
    }
}
