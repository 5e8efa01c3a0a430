//! Size-bounded projections of a classified layout tree.
//!
//! Two views are produced:
//!
//! - [`hierarchical_summary`]: the layout tree cut to a fixed depth, with
//!   pure-layout subtrees pruned and wide fan-outs collapsed
//! - [`compact_summary`]: only the classified nodes, grouped by depth
//!
//! Anything cut from the hierarchical view leaves a [`Marker`] behind, so a
//! reader can always tell a truncated list from a short one.

mod compact;
mod hierarchy;
mod index;

pub use compact::{compact_summary, CompactItem, CompactSummary, LayoutPatterns};
pub use hierarchy::{hierarchical_summary, Marker, MarkerKind, SummaryEntry, SummaryNode, SummaryOptions};
pub use index::ComponentIndex;
