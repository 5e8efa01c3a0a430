//! Documented component catalog.

use std::collections::BTreeMap;

use distill_core::Result;
use distill_mapper::ComponentKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structural metadata for the components a host has documentation for,
/// keyed by component identifier.
///
/// Identifiers may be full element names (`modus-wc-button`), bare tags
/// (`button`) or import names (`ModusButton`). Values are opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentCatalog {
    entries: BTreeMap<String, Value>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a catalog from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn insert(&mut self, id: impl Into<String>, metadata: Value) {
        self.entries.insert(id.into(), metadata);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for a kind under any of its identifiers.
    pub fn get(&self, kind: ComponentKind) -> Option<&Value> {
        self.entries
            .get(&kind.element_name())
            .or_else(|| self.entries.get(kind.tag()))
            .or_else(|| self.entries.get(&kind.import_name()))
    }

    pub fn documents(&self, kind: ComponentKind) -> bool {
        self.get(kind).is_some()
    }

    /// Split detected kinds into documented and missing element names.
    pub fn report(&self, detected: impl IntoIterator<Item = ComponentKind>) -> CatalogReport {
        let mut kinds: Vec<ComponentKind> = detected.into_iter().collect();
        kinds.sort();
        kinds.dedup();

        let (documented, missing): (Vec<_>, Vec<_>) = kinds.into_iter().partition(|kind| self.documents(*kind));
        CatalogReport {
            documented: documented.into_iter().map(ComponentKind::element_name).collect(),
            missing: missing.into_iter().map(ComponentKind::element_name).collect(),
        }
    }
}

/// Which detected kinds the catalog covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReport {
    pub documented: Vec<String>,
    pub missing: Vec<String>,
}
