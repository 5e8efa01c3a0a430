//! Distill: condense design-tool node trees for size-constrained readers.
//!
//! A raw design tree runs through four stages, each producing a new tree:
//!
//! 1. [`filter`]: prune and simplify attributes
//! 2. [`layout`]: reconstruct flow layout from geometry
//! 3. [`mapper`]: classify nodes into UI component kinds
//! 4. [`summary`]: project depth- and size-bounded views
//!
//! [`analyze`] chains them and adds page-level output: page pattern,
//! unmapped-node report, component imports and statistics.
//!
//! # Example
//!
//! ```ignore
//! use distill::{analyze, AnalyzeOptions};
//!
//! let raw: serde_json::Value = serde_json::from_str(&json)?;
//! let analysis = analyze(&raw, &AnalyzeOptions::default());
//! println!("{}", serde_json::to_string_pretty(&analysis)?);
//! ```

mod analysis;
mod catalog;
mod options;
mod page;
mod report;

pub use analysis::{analyze, analyze_with_catalog, try_analyze, Analysis, ComponentRecord, Statistics};
pub use catalog::{CatalogReport, ComponentCatalog};
pub use options::AnalyzeOptions;
pub use page::{detect_page_pattern, PagePattern, PageType};
pub use report::{required_imports, undetected_report, ReasonSummary, UndetectedReport};

pub use distill_core::{DistillError, FilteredNode, Result};
pub use distill_filter as filter;
pub use distill_layout as layout;
pub use distill_mapper as mapper;
pub use distill_summary as summary;
