//! Name-based detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::kind::{ComponentKind, ELEMENT_PREFIX};

/// Ordered name rules. The first match wins, so specific patterns come
/// before general ones (side navigation before navbar, for instance).
static NAME_RULES: Lazy<Vec<(Regex, ComponentKind)>> = Lazy::new(|| {
    use ComponentKind::*;
    [
        // Buttons
        (r"\b(button|btn|cta)\b", Button),
        // Form inputs
        (r"\b(input|text\s?field|textfield)\b", TextInput),
        (r"\b(text\s?area|textarea)\b", Textarea),
        (r"\b(number|numeric)\s?(input|field)?\b", NumberInput),
        (r"\b(select|dropdown)\b", Select),
        (r"\b(checkbox|check)\b", Checkbox),
        (r"\b(radio|radio\s?button)\b", Radio),
        (r"\b(switch|toggle)\b", Switch),
        (r"\b(slider|range)\b", Slider),
        (r"\b(date|calendar|date\s?picker)\b", Date),
        (r"\b(time|time\s?picker)\b", TimeInput),
        (r"\b(search|autocomplete|typeahead)\b", Autocomplete),
        // Navigation
        (r"\b(side\s*navigation|side-navigation|sidebar|side\s*nav|sidenav|aside)\b", SideNavigation),
        (r"\b(navbar|nav\s*bar|header|top\s*bar|navigation\s*bar)\b", Navbar),
        (r"\b(breadcrumb|breadcrumbs)\b", Breadcrumbs),
        (r"\b(tab|tabs)\b", Tabs),
        (r"\b(pagination|pager)\b", Pagination),
        // Display
        (r"\b(card|tile|panel)\b", Card),
        (r"\b(table|grid)\b", Table),
        (r"\b(alert|notification|message)\b", Alert),
        (r"\b(modal|dialog|popup)\b", Modal),
        (r"\b(tooltip|hint|popover)\b", Tooltip),
        (r"\b(badge)\b", Badge),
        (r"\b(chip|tag|pill)\b", Chip),
        (r"\b(progress|progress\s?bar)\b", Progress),
        (r"\b(loader|spinner|loading)\b", Loader),
        (r"\b(skeleton)\b", Skeleton),
        // Other
        (r"\b(avatar|profile\s?pic)\b", Avatar),
        (r"\b(icon)\b", Icon),
        (r"\b(divider|separator)\b", Divider),
    ]
    .into_iter()
    .filter_map(|(pattern, kind)| Regex::new(&format!("(?i){pattern}")).ok().map(|re| (re, kind)))
    .collect()
});

static ELEMENT_NAME: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"modus-wc-[\w-]+").ok());

/// A name match: the kind and the text that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub kind: ComponentKind,
    pub signal: String,
}

/// Classify a node name.
///
/// A name carrying a known element name (`modus-wc-<kind>`) resolves
/// directly; anything else goes through the rule table.
pub fn detect_by_name(name: &str) -> Option<NameMatch> {
    if name.is_empty() {
        return None;
    }
    let lower = name.to_lowercase();
    element_name(&lower).or_else(|| match_rules(&lower))
}

/// Run only the rule table, skipping element-name extraction.
pub fn match_rules(name: &str) -> Option<NameMatch> {
    NAME_RULES.iter().find_map(|(pattern, kind)| {
        pattern.find(name).map(|found| NameMatch {
            kind: *kind,
            signal: found.as_str().to_string(),
        })
    })
}

/// Extract a known element name, trimming trailing segments until one
/// resolves (`modus-wc-button-primary` yields a button).
fn element_name(name: &str) -> Option<NameMatch> {
    if !name.contains(ELEMENT_PREFIX) {
        return None;
    }
    let found = ELEMENT_NAME.as_ref()?.find(name)?.as_str();

    let mut candidate = found.trim_end_matches('-');
    loop {
        if let Some(kind) = ComponentKind::from_element_name(candidate) {
            return Some(NameMatch {
                kind,
                signal: candidate.to_string(),
            });
        }
        let (head, _) = candidate.rsplit_once('-')?;
        if head.len() <= ELEMENT_PREFIX.len() {
            return None;
        }
        candidate = head;
    }
}
