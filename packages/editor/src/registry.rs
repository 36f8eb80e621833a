//! Editable registry.
//!
//! [`scan`] walks the page once and marks every element eligible for
//! in-place editing, assigning each a stable key. The role accessors
//! re-query the live tree on every call, so elements inserted later by
//! content mutators are picked up without rescanning.
//!
//! Key assignment is scan-positional: an unkeyed element gets
//! `auto-<index>` where `<index>` is its position in the filtered
//! sequence. Reordering the static markup between saves can therefore
//! reattach saved content to a different element; see DESIGN.md.

use backstage_dom::{Document, Element, Node};

/// Marker set on every scanned text element
pub const EDITABLE_ATTR: &str = "data-admin-editable";
/// Key attribute for text elements
pub const KEY_ATTR: &str = "data-admin-key";
/// Marker + key attribute for image elements
pub const IMAGE_ATTR: &str = "data-admin-image";
/// Marker + key attribute for list containers
pub const LIST_ATTR: &str = "data-admin-list";
/// Marker + key attribute for gallery containers
pub const GALLERY_ATTR: &str = "data-admin-gallery";
/// Opt-out flag honored by the scan
pub const NOEDIT_ATTR: &str = "data-admin-noedit";

/// Tags eligible for text editing
const EDITABLE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "a", "li", "figcaption", "strong", "em",
    "label", "button",
];

/// Class names whose subtrees the scan never enters
const EXCLUDED_REGIONS: &[&str] = &["admin-panel", "settings-shell"];

/// Content role of an editable element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    Image,
    List,
    Gallery,
}

impl Role {
    /// The marker attribute that identifies this role in the page
    pub fn marker(self) -> &'static str {
        match self {
            Role::Text => EDITABLE_ATTR,
            Role::Image => IMAGE_ATTR,
            Role::List => LIST_ATTR,
            Role::Gallery => GALLERY_ATTR,
        }
    }
}

/// Mark editable text elements and assign keys.
///
/// Idempotent: re-running never re-keys an already-keyed element, and
/// indices are deterministic for identical markup. Returns the number
/// of editable text elements seen.
pub fn scan(doc: &mut Document) -> usize {
    let mut index = 0;
    scan_children(&mut doc.body, &mut index);
    tracing::debug!(editable = index, "scanned page for editable text");
    index
}

fn scan_children(el: &mut Element, index: &mut usize) {
    for child in &mut el.children {
        let Node::Element(child_el) = child else {
            continue;
        };

        if EXCLUDED_REGIONS.iter().any(|c| child_el.has_class(c)) {
            continue;
        }

        if is_eligible(child_el) {
            child_el.set_attr(EDITABLE_ATTR, "true");
            if child_el.attr(KEY_ATTR).is_none() {
                child_el.set_attr(KEY_ATTR, &format!("auto-{}", index));
            }
            *index += 1;
        }

        scan_children(child_el, index);
    }
}

fn is_eligible(el: &Element) -> bool {
    if !EDITABLE_TAGS.contains(&el.tag.as_str()) {
        return false;
    }
    if el.attr(NOEDIT_ATTR) == Some("true") {
        return false;
    }
    !el.text_content().trim().is_empty()
}

/// Live (key, element) pairs for a role, in document order.
///
/// Always re-queries the tree; never caches scan results.
pub fn list_by_role<'a>(doc: &'a Document, role: Role) -> Vec<(String, &'a Element)> {
    doc.query_all(role.marker())
        .into_iter()
        .filter_map(|el| key_of(role, el).map(|key| (key, el)))
        .collect()
}

/// The key identifying an element under a role, if it has one
pub fn key_of(role: Role, el: &Element) -> Option<String> {
    match role {
        // Text elements are marked and keyed by separate attributes.
        Role::Text => {
            if el.attr(EDITABLE_ATTR) != Some("true") {
                return None;
            }
            el.attr(KEY_ATTR).map(str::to_string)
        }
        // The marker attribute doubles as the key for the other roles.
        _ => el.attr(role.marker()).map(str::to_string),
    }
}
