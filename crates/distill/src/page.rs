//! Page-level pattern detection.

use std::fmt;

use distill_layout::{LayoutNode, LayoutType};
use distill_mapper::{ComponentKind, Mapping};
use distill_summary::ComponentIndex;
use serde::{Deserialize, Serialize};

/// Overall page archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    /// Navigation and a sidebar
    Dashboard,
    SidebarContent,
    HeaderContent,
    /// Tables dominate
    DataView,
    FormPage,
    GridLayout,
    Custom,
}

impl PageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::SidebarContent => "sidebar-content",
            Self::HeaderContent => "header-content",
            Self::DataView => "data-view",
            Self::FormPage => "form-page",
            Self::GridLayout => "grid-layout",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural patterns and archetype of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePattern {
    /// Layout patterns found at the top of the tree.
    pub patterns: Vec<String>,
    /// First pattern found, or `custom`.
    pub primary_pattern: String,
    /// Layout of the root node.
    pub layout_type: LayoutType,
    pub page_type: PageType,
    pub has_navigation: bool,
    pub has_sidebar: bool,
    pub has_data_components: bool,
    pub has_forms: bool,
}

const NAVIGATION_WORDS: &[&str] = &["nav", "header", "navigation"];
const SIDEBAR_WORDS: &[&str] = &["sidebar", "sidenav", "side"];
/// Cards needed before a page reads as a dashboard.
const DASHBOARD_CARDS: usize = 3;

/// Detect page patterns from the layout tree and its components.
pub fn detect_page_pattern(root: &LayoutNode<'_>, mapping: &Mapping) -> PagePattern {
    let index = ComponentIndex::from_mapping(mapping);
    let kinds: Vec<ComponentKind> = mapping.flatten().into_iter().map(|(_, c)| c.kind).collect();
    let has_kind = |wanted: &[ComponentKind]| kinds.iter().any(|k| wanted.contains(k));

    let mentions = |words: &[&str]| {
        root.walk().any(|node| {
            [node.node_type.as_deref(), node.name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::to_lowercase)
                .any(|text| words.iter().any(|w| text.contains(w)))
        })
    };

    let has_navigation = has_kind(&[ComponentKind::Navbar]) || mentions(NAVIGATION_WORDS);
    let has_sidebar = has_kind(&[ComponentKind::SideNavigation]) || mentions(SIDEBAR_WORDS);
    let has_data_components = has_kind(&[ComponentKind::Table]);
    let has_forms = has_kind(&[ComponentKind::TextInput, ComponentKind::Select, ComponentKind::Checkbox]);

    let page_type = if has_sidebar && has_navigation {
        PageType::Dashboard
    } else if has_sidebar {
        PageType::SidebarContent
    } else if has_navigation && root.layout_type == LayoutType::Vertical {
        PageType::HeaderContent
    } else if has_data_components {
        PageType::DataView
    } else if has_forms {
        PageType::FormPage
    } else if root.layout_type == LayoutType::Grid {
        PageType::GridLayout
    } else {
        PageType::Custom
    };

    let patterns = layout_patterns(root, &index, &kinds);
    PagePattern {
        primary_pattern: patterns.first().cloned().unwrap_or_else(|| "custom".to_string()),
        patterns,
        layout_type: root.layout_type,
        page_type,
        has_navigation,
        has_sidebar,
        has_data_components,
        has_forms,
    }
}

fn layout_patterns(root: &LayoutNode<'_>, index: &ComponentIndex<'_>, kinds: &[ComponentKind]) -> Vec<String> {
    let mut patterns = Vec::new();
    let is_kind = |node: &LayoutNode<'_>, kind: ComponentKind| index.lookup(node).is_some_and(|c| c.kind == kind);

    if root.layout_type == LayoutType::Vertical && root.children.len() >= 2 {
        if root.children.iter().take(2).any(|child| is_kind(child, ComponentKind::Navbar)) {
            patterns.push("header-content-footer".to_string());
        }
    }

    let sidebar_row = match root.layout_type {
        LayoutType::Horizontal => Some(root),
        LayoutType::Vertical => root
            .children
            .iter()
            .find(|child| matches!(child.layout_type, LayoutType::Horizontal | LayoutType::RowGroup)),
        _ => None,
    };
    if sidebar_row.is_some_and(|row| row.children.iter().any(|c| is_kind(c, ComponentKind::SideNavigation))) {
        patterns.push("sidebar-layout".to_string());
    }

    if root.layout_type == LayoutType::Grid || root.children.iter().any(|c| c.layout_type == LayoutType::Grid) {
        patterns.push("grid-layout".to_string());
    }

    if kinds.iter().filter(|k| **k == ComponentKind::Card).count() >= DASHBOARD_CARDS {
        patterns.push("dashboard".to_string());
    }

    patterns
}
