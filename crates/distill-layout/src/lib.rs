//! Layout reconstruction for filtered design trees.
//!
//! Design tools often export absolutely positioned frames with no layout
//! metadata. This crate rebuilds a flow model for each container:
//!
//! 1. **Explicit auto-layout**: `layoutMode` HORIZONTAL, VERTICAL or GRID
//! 2. **Tool-inferred layout**: `inferredAutoLayout.layoutMode`
//! 3. **Heuristic rows**: children grouped by vertical position
//!
//! # Example
//!
//! ```ignore
//! use distill_layout::reconstruct;
//!
//! let result = reconstruct(&filtered.node);
//! if let Some(root) = &result.root {
//!     println!("{} is {:?}", root.display_name(), root.layout_type);
//! }
//! ```

mod reconstruct;
mod rows;
mod tree;

pub use reconstruct::{reconstruct, reconstruct_with, LayoutStats, ReconstructOptions, Reconstruction};
pub use rows::{group_rows, Y_TOLERANCE};
pub use tree::{LayoutMetadata, LayoutNode, LayoutType, Walk};
