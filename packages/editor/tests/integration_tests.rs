//! Registry and codec properties over a realistic page

use backstage_dom::Document;
use backstage_editor::registry::{self, Role};
use backstage_editor::{snapshot, AdminSnapshot};

const PAGE: &str = r#"
<body class="page-home">
    <header>
        <h1 data-admin-key="hero-title">Community Drafting</h1>
        <p data-admin-key="hero-lede">Plans, permits, and drawings for your neighborhood.</p>
    </header>
    <section>
        <h2>Latest updates</h2>
        <div data-admin-list="updates">
            <article class="card"><h3>Open house</h3><p>Visit us Saturday.</p></article>
        </div>
    </section>
    <section>
        <h2>Project gallery</h2>
        <div data-admin-gallery="dashboard">
            <figure class="image-card">
                <img src="static/dash.png" data-admin-image="dash-static" />
                <figcaption>Dashboard concept</figcaption>
            </figure>
        </div>
    </section>
    <img src="static/team.jpg" data-admin-image="team" />
    <div class="admin-panel" id="admin-panel" aria-hidden="true">
        <label>Card title</label>
        <button>Save</button>
    </div>
</body>
"#;

fn scanned_page() -> Document {
    let mut doc = Document::parse(PAGE);
    registry::scan(&mut doc);
    doc
}

#[test]
fn test_scan_assigns_same_keys_twice() {
    let mut doc = Document::parse(PAGE);

    registry::scan(&mut doc);
    let first: Vec<String> = registry::list_by_role(&doc, Role::Text)
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    registry::scan(&mut doc);
    let second: Vec<String> = registry::list_by_role(&doc, Role::Text)
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_scan_respects_exclusions() {
    let doc = scanned_page();

    // Panel children (label, button) are inside an excluded region.
    for (_, el) in registry::list_by_role(&doc, Role::Text) {
        assert_ne!(el.text_content(), "Card title");
        assert_ne!(el.text_content(), "Save");
    }

    // Explicit keys survive, generated ones fill the gaps.
    let keys: Vec<String> = registry::list_by_role(&doc, Role::Text)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert!(keys.contains(&"hero-title".to_string()));
    assert!(keys.contains(&"hero-lede".to_string()));
    assert!(keys.iter().any(|k| k.starts_with("auto-")));
}

#[test]
fn test_collect_apply_is_fixed_point() {
    let mut doc = scanned_page();

    let first = snapshot::collect(&doc);
    snapshot::apply(&mut doc, &first);
    let second = snapshot::collect(&doc);

    assert_eq!(first, second);
}

#[test]
fn test_collect_covers_all_roles() {
    let doc = scanned_page();
    let state = snapshot::collect(&doc);

    assert!(state.text.contains_key("hero-title"));
    assert_eq!(state.images.get("team").unwrap(), "static/team.jpg");
    assert!(state.lists.get("updates").unwrap().contains("Open house"));
    assert!(state.galleries.get("dashboard").unwrap().contains("dash-static"));
}

#[test]
fn test_malformed_state_never_applies() {
    let pristine = snapshot::collect(&scanned_page());

    for garbage in [None, Some(""), Some("   "), Some("{oops"), Some("42")] {
        let mut doc = scanned_page();
        if let Some(decoded) = snapshot::decode(garbage) {
            snapshot::apply(&mut doc, &decoded);
        }
        assert_eq!(snapshot::collect(&doc), pristine, "input {:?} mutated page", garbage);
    }
}

#[test]
fn test_stale_keys_are_ignored_per_key() {
    let mut doc = scanned_page();
    let pristine = snapshot::collect(&doc);

    let mut state = AdminSnapshot::default();
    state.text.insert("deleted-section".into(), "<p>ghost</p>".into());
    state.images.insert("gone".into(), "x.png".into());
    state.lists.insert("archive".into(), "<li>old</li>".into());
    state.galleries.insert("attic".into(), "<figure></figure>".into());
    snapshot::apply(&mut doc, &state);

    assert_eq!(snapshot::collect(&doc), pristine);
}

#[test]
fn test_applied_gallery_markup_is_queryable() {
    let mut doc = scanned_page();

    // A previously saved gallery fragment containing a new image node.
    let mut state = AdminSnapshot::default();
    state.galleries.insert(
        "dashboard".into(),
        r#"<figure><img src="saved.png" data-admin-image="dashboard-99" /><figcaption data-admin-editable="true" data-admin-key="dashboard-99-caption">Saved</figcaption></figure>"#.into(),
    );
    snapshot::apply(&mut doc, &state);

    let images = registry::list_by_role(&doc, Role::Image);
    assert!(images.iter().any(|(k, _)| k == "dashboard-99"));
    assert!(doc.query_first("data-admin-key", "dashboard-99-caption").is_some());
}

#[test]
fn test_wire_format_shape() {
    let state = snapshot::collect(&scanned_page());
    let json = serde_json::to_string(&state).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for field in ["text", "images", "lists", "galleries"] {
        assert!(value.get(field).map(|v| v.is_object()).unwrap_or(false));
    }
}
