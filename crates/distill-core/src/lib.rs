//! Core types shared by every stage of the Distill pipeline.
//!
//! Distill turns a raw design-tool node tree into a condensed, semantically
//! annotated structure. This crate holds the pieces every stage agrees on:
//!
//! - [`FilteredNode`]: the pruned attribute map produced by the filter stage
//! - [`Bounds`] and [`Color`]: geometry and paint read from node attributes
//! - [`DistillError`]: the few failures worth surfacing to a caller
//! - [`value`]: helpers for reading loosely-typed JSON attributes

pub mod color;
pub mod error;
pub mod geometry;
pub mod node;
pub mod value;

pub use color::Color;
pub use error::{DistillError, Result};
pub use geometry::Bounds;
pub use node::FilteredNode;

/// Absolute ceiling on tree recursion depth.
///
/// Callers may ask for smaller budgets; nothing in the pipeline descends
/// further than this, whatever the input looks like.
pub const MAX_TREE_DEPTH: usize = 512;
