//! Component lookup by node id.

use std::collections::HashMap;

use distill_layout::LayoutNode;
use distill_mapper::{MappedComponent, Mapping};

/// Every mapped component in a tree, keyed by source node id.
#[derive(Debug, Clone, Default)]
pub struct ComponentIndex<'m> {
    by_id: HashMap<&'m str, &'m MappedComponent>,
}

impl<'m> ComponentIndex<'m> {
    /// Index a component forest, including nested components. The first
    /// component seen for an id wins.
    pub fn new(components: &'m [MappedComponent]) -> Self {
        let mut by_id = HashMap::new();
        let mut stack: Vec<&MappedComponent> = components.iter().rev().collect();
        while let Some(component) = stack.pop() {
            if let Some(id) = component.node_id.as_deref() {
                by_id.entry(id).or_insert(component);
            }
            stack.extend(component.children.iter().rev());
        }
        Self { by_id }
    }

    pub fn from_mapping(mapping: &'m Mapping) -> Self {
        Self::new(&mapping.components)
    }

    pub fn get(&self, id: &str) -> Option<&'m MappedComponent> {
        self.by_id.get(id).copied()
    }

    /// Component for a layout node, if it was classified.
    pub fn lookup(&self, node: &LayoutNode<'_>) -> Option<&'m MappedComponent> {
        node.id.as_deref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Whether any node strictly below `node` is classified.
    pub fn has_classified_descendant(&self, node: &LayoutNode<'_>) -> bool {
        node.walk().skip(1).any(|n| self.lookup(n).is_some())
    }
}
