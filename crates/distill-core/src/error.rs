//! Error types for the Distill pipeline.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DistillError>;

/// Failures the pipeline reports instead of recovering locally.
///
/// Malformed children, unknown attributes and classification misses are not
/// errors; they are skipped or reported as regular output. Only an input that
/// cannot be treated as a node at all ends up here.
#[derive(Debug, Error)]
pub enum DistillError {
    /// Input was not a JSON object.
    #[error("Input was not a usable node: expected an object, found {found}")]
    NotANode { found: &'static str },

    /// Input was an object with no attributes.
    #[error("Input was not a usable node: the node is empty")]
    EmptyNode,

    /// Layout reconstruction produced no tree.
    #[error("Failed to reconstruct layout")]
    NoLayout,

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DistillError {
    /// Check that a raw value can be treated as a node.
    pub fn check_node(value: &Value) -> Result<()> {
        match value {
            Value::Object(map) if map.is_empty() => Err(DistillError::EmptyNode),
            Value::Object(_) => Ok(()),
            other => Err(DistillError::NotANode {
                found: crate::value::type_name(other),
            }),
        }
    }
}
