//! The closed palette of component kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of the target system's element names.
pub const ELEMENT_PREFIX: &str = "modus-wc-";

/// A reusable UI component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    // Actions
    Button,
    ThemeSwitcher,

    // Form controls
    TextInput,
    Textarea,
    NumberInput,
    Select,
    Checkbox,
    Radio,
    Switch,
    Slider,
    Date,
    TimeInput,
    Autocomplete,
    Rating,
    InputLabel,
    InputFeedback,

    // Navigation
    SideNavigation,
    Navbar,
    Breadcrumbs,
    Tabs,
    Pagination,
    Stepper,
    Toolbar,
    Menu,
    MenuItem,
    DropdownMenu,

    // Display
    Card,
    Table,
    Accordion,
    Collapse,
    Typography,
    Avatar,
    Badge,
    Chip,
    Icon,
    Divider,

    // Feedback and overlays
    Alert,
    Toast,
    Modal,
    Tooltip,
    Progress,
    Loader,
    Skeleton,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 43] = [
        Self::Button,
        Self::ThemeSwitcher,
        Self::TextInput,
        Self::Textarea,
        Self::NumberInput,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Switch,
        Self::Slider,
        Self::Date,
        Self::TimeInput,
        Self::Autocomplete,
        Self::Rating,
        Self::InputLabel,
        Self::InputFeedback,
        Self::SideNavigation,
        Self::Navbar,
        Self::Breadcrumbs,
        Self::Tabs,
        Self::Pagination,
        Self::Stepper,
        Self::Toolbar,
        Self::Menu,
        Self::MenuItem,
        Self::DropdownMenu,
        Self::Card,
        Self::Table,
        Self::Accordion,
        Self::Collapse,
        Self::Typography,
        Self::Avatar,
        Self::Badge,
        Self::Chip,
        Self::Icon,
        Self::Divider,
        Self::Alert,
        Self::Toast,
        Self::Modal,
        Self::Tooltip,
        Self::Progress,
        Self::Loader,
        Self::Skeleton,
    ];

    /// Short kebab-case tag, e.g. `text-input`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::ThemeSwitcher => "theme-switcher",
            Self::TextInput => "text-input",
            Self::Textarea => "textarea",
            Self::NumberInput => "number-input",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Switch => "switch",
            Self::Slider => "slider",
            Self::Date => "date",
            Self::TimeInput => "time-input",
            Self::Autocomplete => "autocomplete",
            Self::Rating => "rating",
            Self::InputLabel => "input-label",
            Self::InputFeedback => "input-feedback",
            Self::SideNavigation => "side-navigation",
            Self::Navbar => "navbar",
            Self::Breadcrumbs => "breadcrumbs",
            Self::Tabs => "tabs",
            Self::Pagination => "pagination",
            Self::Stepper => "stepper",
            Self::Toolbar => "toolbar",
            Self::Menu => "menu",
            Self::MenuItem => "menu-item",
            Self::DropdownMenu => "dropdown-menu",
            Self::Card => "card",
            Self::Table => "table",
            Self::Accordion => "accordion",
            Self::Collapse => "collapse",
            Self::Typography => "typography",
            Self::Avatar => "avatar",
            Self::Badge => "badge",
            Self::Chip => "chip",
            Self::Icon => "icon",
            Self::Divider => "divider",
            Self::Alert => "alert",
            Self::Toast => "toast",
            Self::Modal => "modal",
            Self::Tooltip => "tooltip",
            Self::Progress => "progress",
            Self::Loader => "loader",
            Self::Skeleton => "skeleton",
        }
    }

    /// Look up a kind by its tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Look up a kind by its full element name, e.g. `modus-wc-button`.
    pub fn from_element_name(name: &str) -> Option<Self> {
        name.strip_prefix(ELEMENT_PREFIX).and_then(Self::from_tag)
    }

    /// Full element name, e.g. `modus-wc-text-input`.
    pub fn element_name(self) -> String {
        format!("{ELEMENT_PREFIX}{}", self.tag())
    }

    /// PascalCase import name, e.g. `ModusTextInput`.
    pub fn import_name(self) -> String {
        let mut name = String::from("Modus");
        for part in self.tag().split('-') {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        }
        name
    }

    /// Kinds that collect user input.
    pub fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::TextInput
                | Self::Textarea
                | Self::NumberInput
                | Self::Select
                | Self::Checkbox
                | Self::Radio
                | Self::Switch
                | Self::Slider
                | Self::Date
                | Self::TimeInput
                | Self::Autocomplete
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which signal tier classified a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Naming,
    Structure,
    Style,
}

impl DetectionMethod {
    /// Fixed confidence assigned to each tier.
    pub fn confidence(self) -> f64 {
        match self {
            Self::Naming => 0.95,
            Self::Structure => 0.80,
            Self::Style => 0.70,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Naming => "naming",
            Self::Structure => "structure",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
