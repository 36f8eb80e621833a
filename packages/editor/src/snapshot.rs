//! Snapshot codec.
//!
//! The [`AdminSnapshot`] is the sole unit of persistence: four flat
//! key → value mappings, written and read wholesale. [`collect`] reads
//! the live page; [`apply`] merges a snapshot back on, best-effort.
//!
//! Decoding is forgiving by contract: absent or malformed persisted
//! data is `None`, never an error, and stale keys are skipped per-key.

use std::collections::HashMap;

use backstage_dom::{Document, Element, Node};
use serde::{Deserialize, Serialize};

use crate::registry::{self, Role, EDITABLE_ATTR, GALLERY_ATTR, IMAGE_ATTR, KEY_ATTR, LIST_ATTR};

/// Persisted capture of all editable content at last save
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminSnapshot {
    /// Text key → markup fragment
    #[serde(default)]
    pub text: HashMap<String, String>,

    /// Image key → source reference (URL or data URL)
    #[serde(default)]
    pub images: HashMap<String, String>,

    /// List key → markup fragment of the list's children
    #[serde(default)]
    pub lists: HashMap<String, String>,

    /// Gallery key → markup fragment of the gallery's children
    #[serde(default)]
    pub galleries: HashMap<String, String>,
}

/// Build a snapshot from the current page
pub fn collect(doc: &Document) -> AdminSnapshot {
    let mut snapshot = AdminSnapshot::default();

    for (key, el) in registry::list_by_role(doc, Role::Text) {
        snapshot.text.insert(key, el.inner_markup().trim().to_string());
    }
    for (key, el) in registry::list_by_role(doc, Role::Image) {
        snapshot
            .images
            .insert(key, el.attr("src").unwrap_or_default().to_string());
    }
    for (key, el) in registry::list_by_role(doc, Role::List) {
        snapshot.lists.insert(key, el.inner_markup().trim().to_string());
    }
    for (key, el) in registry::list_by_role(doc, Role::Gallery) {
        snapshot
            .galleries
            .insert(key, el.inner_markup().trim().to_string());
    }

    snapshot
}

/// Merge a snapshot onto the live page.
///
/// Only non-empty values under a live element's key overwrite content;
/// everything else keeps its static-markup default. Passes run in the
/// same role order as the original save format (text, images, lists,
/// galleries) so nested overwrites resolve the same way. Each pass
/// captures its matching elements before it mutates anything, so a
/// value that embeds its own marker and key is written once, never
/// re-applied to the content it just produced.
pub fn apply(doc: &mut Document, snapshot: &AdminSnapshot) {
    for_each_captured(
        doc,
        &mut |el| el.attr(EDITABLE_ATTR) == Some("true"),
        &mut |el| {
            if let Some(value) = el.attr(KEY_ATTR).and_then(|k| snapshot.text.get(k)) {
                if !value.is_empty() {
                    el.set_inner_markup(value);
                }
            }
        },
    );

    for_each_captured(
        doc,
        &mut |el| el.attr(IMAGE_ATTR).is_some(),
        &mut |el| {
            if let Some(value) = el.attr(IMAGE_ATTR).and_then(|k| snapshot.images.get(k)) {
                if !value.is_empty() {
                    el.set_attr("src", value.as_str());
                }
            }
        },
    );

    for_each_captured(
        doc,
        &mut |el| el.attr(LIST_ATTR).is_some(),
        &mut |el| {
            if let Some(value) = el.attr(LIST_ATTR).and_then(|k| snapshot.lists.get(k)) {
                if !value.is_empty() {
                    el.set_inner_markup(value);
                }
            }
        },
    );

    for_each_captured(
        doc,
        &mut |el| el.attr(GALLERY_ATTR).is_some(),
        &mut |el| {
            if let Some(value) = el.attr(GALLERY_ATTR).and_then(|k| snapshot.galleries.get(k)) {
                if !value.is_empty() {
                    el.set_inner_markup(value);
                }
            }
        },
    );
}

/// Run `act` on every element matching `pred`, with the match set fixed
/// up front: elements are located by child-index path before any
/// mutation, then revisited one at a time. A path invalidated by an
/// earlier mutation in the same pass resolves to nothing and is skipped.
fn for_each_captured(
    doc: &mut Document,
    pred: &mut dyn FnMut(&Element) -> bool,
    act: &mut dyn FnMut(&mut Element),
) {
    let mut paths = Vec::new();
    locate(&doc.body, pred, &mut Vec::new(), &mut paths);

    for path in paths {
        if let Some(el) = element_at_mut(&mut doc.body, &path) {
            act(el);
        }
    }
}

fn locate(
    el: &Element,
    pred: &mut dyn FnMut(&Element) -> bool,
    path: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if pred(el) {
        out.push(path.clone());
    }
    for (i, child) in el.children.iter().enumerate() {
        if let Node::Element(child_el) = child {
            path.push(i);
            locate(child_el, pred, path, out);
            path.pop();
        }
    }
}

fn element_at_mut<'a>(el: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut current = el;
    for &index in path {
        match current.children.get_mut(index) {
            Some(Node::Element(child)) => current = child,
            _ => return None,
        }
    }
    Some(current)
}

/// Decode raw persisted state.
///
/// Absent, empty, or unparseable input decodes to `None`; applying
/// nothing is the caller's no-op.
pub fn decode(raw: Option<&str>) -> Option<AdminSnapshot> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::scan;

    const PAGE: &str = r#"
        <body>
            <h1 data-admin-key="hero">Community Drafting</h1>
            <p>We draw plans.</p>
            <img src="static/team.jpg" data-admin-image="team" />
            <ul data-admin-list="updates"><li>First post</li></ul>
            <div data-admin-gallery="dashboard">
                <figure><img src="a.png" data-admin-image="dash-1" /></figure>
            </div>
        </body>
    "#;

    #[test]
    fn test_collect_reads_all_roles() {
        let mut doc = Document::parse(PAGE);
        scan(&mut doc);
        let snapshot = collect(&doc);

        assert_eq!(snapshot.text.get("hero").unwrap(), "Community Drafting");
        assert_eq!(snapshot.images.get("team").unwrap(), "static/team.jpg");
        assert_eq!(
            snapshot.lists.get("updates").unwrap(),
            "<li data-admin-editable=\"true\" data-admin-key=\"auto-2\">First post</li>"
        );
        assert!(snapshot.galleries.contains_key("dashboard"));
    }

    #[test]
    fn test_apply_overwrites_matching_keys() {
        let mut doc = Document::parse(PAGE);
        scan(&mut doc);

        let mut snapshot = AdminSnapshot::default();
        snapshot.text.insert("hero".into(), "New Name".into());
        snapshot.images.insert("team".into(), "data:image/png;base64,AQID".into());
        apply(&mut doc, &snapshot);

        let hero = doc.query_first("data-admin-key", "hero").unwrap();
        assert_eq!(hero.text_content(), "New Name");
        let img = doc.query_first("data-admin-image", "team").unwrap();
        assert_eq!(img.attr("src"), Some("data:image/png;base64,AQID"));
    }

    #[test]
    fn test_apply_ignores_stale_and_empty() {
        let mut doc = Document::parse(PAGE);
        scan(&mut doc);
        let before = collect(&doc);

        let mut snapshot = AdminSnapshot::default();
        snapshot.text.insert("removed-long-ago".into(), "ghost".into());
        snapshot.text.insert("hero".into(), "".into());
        apply(&mut doc, &snapshot);

        assert_eq!(collect(&doc), before);
    }

    #[test]
    fn test_collect_apply_fixed_point() {
        let mut doc = Document::parse(PAGE);
        scan(&mut doc);

        let first = collect(&doc);
        apply(&mut doc, &first);
        let second = collect(&doc);

        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_value_embedding_own_key_applies_once() {
        let mut doc =
            Document::parse(r#"<p data-admin-editable="true" data-admin-key="k">old</p>"#);

        let mut snapshot = AdminSnapshot::default();
        snapshot.text.insert(
            "k".into(),
            r#"<p data-admin-editable="true" data-admin-key="k">looped</p>"#.into(),
        );
        apply(&mut doc, &snapshot);

        let outer = doc.query_first("data-admin-key", "k").unwrap();
        assert_eq!(outer.text_content(), "looped");
        assert_eq!(
            outer.inner_markup(),
            r#"<p data-admin-editable="true" data-admin-key="k">looped</p>"#
        );
    }

    #[test]
    fn test_apply_self_referential_gallery_terminates() {
        let mut doc = Document::parse(PAGE);
        scan(&mut doc);

        let mut snapshot = AdminSnapshot::default();
        snapshot.galleries.insert(
            "dashboard".into(),
            r#"<div data-admin-gallery="dashboard"><figure></figure></div>"#.into(),
        );
        apply(&mut doc, &snapshot);

        let gallery = doc.query_first("data-admin-gallery", "dashboard").unwrap();
        assert_eq!(
            gallery.inner_markup(),
            r#"<div data-admin-gallery="dashboard"><figure></figure></div>"#
        );
    }

    #[test]
    fn test_decode_malformed_is_none() {
        assert!(decode(None).is_none());
        assert!(decode(Some("")).is_none());
        assert!(decode(Some("{not json")).is_none());
        assert!(decode(Some("[1,2,3]")).is_none());
    }

    #[test]
    fn test_decode_partial_snapshot() {
        let snapshot = decode(Some(r#"{"text":{"hero":"Hi"}}"#)).unwrap();
        assert_eq!(snapshot.text.get("hero").unwrap(), "Hi");
        assert!(snapshot.images.is_empty());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut doc = Document::parse(PAGE);
        scan(&mut doc);
        let json = serde_json::to_string(&collect(&doc)).unwrap();

        let round: AdminSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(round, collect(&doc));
        for field in ["\"text\"", "\"images\"", "\"lists\"", "\"galleries\""] {
            assert!(json.contains(field));
        }
    }
}
