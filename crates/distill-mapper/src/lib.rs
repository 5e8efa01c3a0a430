//! Component classification for reconstructed layouts.
//!
//! Each layout node is tried against three signal tiers, strongest first:
//!
//! 1. **Naming** (0.95): element names like `modus-wc-button`, then an
//!    ordered table of name patterns
//! 2. **Structure** (0.80): component instances, then shape predicates for
//!    buttons, inputs, cards, navbars, tables, chips and avatars
//! 3. **Style** (0.70): small squares become icons, thin strips dividers
//!
//! Classified nodes nest under their nearest classified ancestor. Nodes no
//! tier recognizes are reported with likely reasons.
//!
//! # Example
//!
//! ```ignore
//! use distill_mapper::map_components;
//!
//! let mapping = map_components(&layout_root);
//! for (depth, component) in mapping.flatten() {
//!     println!("{:indent$}{} ({})", "", component.kind, component.method, indent = depth * 2);
//! }
//! ```

mod kind;
mod mapper;
mod naming;
mod properties;
mod structure;

pub use kind::{ComponentKind, DetectionMethod, ELEMENT_PREFIX};
pub use mapper::{
    identify, map_components, unmatch_reasons, MappedComponent, Mapping, MappingStats, UndetectedNode,
    MAX_UNDETECTED_RECORDS,
};
pub use naming::{detect_by_name, NameMatch};
pub use properties::{extract_properties, Properties};
pub use structure::{detect_by_structure, detect_by_style};
