//! Content mutators.
//!
//! Small operations that create new registry entries in place. None of
//! them persist anything: a new card or gallery figure changes what the
//! *next* `collect()` sees, exactly like typing into an editable node.
//!
//! Validation runs before any mutation, so a refused operation leaves
//! the page untouched.

use backstage_common::{FileReader, FileUpload};
use backstage_dom::{parse_fragment, Document, Element, Node};

use crate::registry::{EDITABLE_ATTR, GALLERY_ATTR, IMAGE_ATTR, KEY_ATTR, LIST_ATTR};
use crate::EditorError;

/// Fallback gallery category when the panel leaves it unset
pub const DEFAULT_GALLERY_CATEGORY: &str = "dashboard";
/// Fallback caption for uploaded gallery images
pub const DEFAULT_IMAGE_TITLE: &str = "New project image";

/// Prepend an update card to the `updates` list.
///
/// Both fields are required; title and body are injected as markup
/// (sanitization is out of scope here, as it is for the page itself).
/// A page without an `updates` list absorbs the card silently.
pub fn add_update_card(doc: &mut Document, title: &str, body: &str) -> Result<(), EditorError> {
    let title = title.trim();
    let body = body.trim();
    if title.is_empty() {
        return Err(EditorError::MissingField("title"));
    }
    if body.is_empty() {
        return Err(EditorError::MissingField("details"));
    }

    if let Some(list) = doc.query_first_mut(LIST_ATTR, "updates") {
        let mut card = Element::new("article");
        card.set_attr("class", "card");
        card.set_inner_markup(&format!("<h3>{}</h3><p>{}</p>", title, body));
        list.prepend_child(Node::Element(card));
        tracing::debug!(title, "prepended update card");
    }

    Ok(())
}

/// Prepend an uploaded image (plus editable caption) to a gallery.
///
/// `stamp` is the uniqueness source for the generated image key; the
/// caller supplies it (wall clock in production, fixed in tests).
/// Returns the new image key so the caller can wire up click-to-replace.
///
/// The category only defaults when the panel has no category input at
/// all (`None`); a present-but-empty value is looked up verbatim and
/// fails like any other unknown category.
pub fn add_gallery_image(
    doc: &mut Document,
    file: &FileUpload,
    category: Option<&str>,
    title: Option<&str>,
    stamp: u64,
    reader: &dyn FileReader,
) -> Result<String, EditorError> {
    let category = category.unwrap_or(DEFAULT_GALLERY_CATEGORY);
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_IMAGE_TITLE);

    // Target check comes before the file read so a missing gallery
    // never consumes the upload.
    if doc.query_first(GALLERY_ATTR, category).is_none() {
        return Err(EditorError::GalleryNotFound(category.to_string()));
    }

    let data_url = reader.read_data_url(file)?;
    let image_key = format!("{}-{}", category, stamp);

    let mut image = Element::new("img");
    image.set_attr("src", &data_url);
    image.set_attr("alt", title);
    image.set_attr(IMAGE_ATTR, &image_key);

    let mut caption = Element::new("figcaption");
    caption.set_attr(EDITABLE_ATTR, "true");
    caption.set_attr(KEY_ATTR, &format!("{}-caption", image_key));
    caption.children = parse_fragment(title);

    let mut figure = Element::new("figure");
    figure.set_attr("class", "image-card gradient-border");
    figure.children = vec![Node::Element(image), Node::Element(caption)];

    let gallery = doc
        .query_first_mut(GALLERY_ATTR, category)
        .ok_or_else(|| EditorError::GalleryNotFound(category.to_string()))?;
    gallery.prepend_child(Node::Element(figure));

    tracing::debug!(category, key = %image_key, "prepended gallery image");
    Ok(image_key)
}

/// Overwrite a registered image's source. Returns `false` when no image
/// carries the key anymore (stale target, nothing to do).
pub fn replace_image_source(doc: &mut Document, key: &str, src: &str) -> bool {
    match doc.query_first_mut(IMAGE_ATTR, key) {
        Some(img) => {
            img.set_attr("src", src);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstage_common::DataUrlReader;

    const PAGE: &str = r#"
        <body>
            <ul data-admin-list="updates"><li>Old news</li></ul>
            <div data-admin-gallery="dashboard"></div>
        </body>
    "#;

    #[test]
    fn test_add_update_card_prepends() {
        let mut doc = Document::parse(PAGE);
        add_update_card(&mut doc, "Spring Sale", "20% off all prints").unwrap();

        let list = doc.query_first(LIST_ATTR, "updates").unwrap();
        let Node::Element(card) = &list.children[0] else {
            panic!("expected card element first");
        };
        assert_eq!(card.tag, "article");
        assert_eq!(
            card.inner_markup(),
            "<h3>Spring Sale</h3><p>20% off all prints</p>"
        );
    }

    #[test]
    fn test_add_update_card_requires_both_fields() {
        let mut doc = Document::parse(PAGE);
        let before = doc.clone();

        assert!(matches!(
            add_update_card(&mut doc, "  ", "body"),
            Err(EditorError::MissingField("title"))
        ));
        assert!(matches!(
            add_update_card(&mut doc, "title", ""),
            Err(EditorError::MissingField("details"))
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_gallery_image_unknown_category() {
        let mut doc = Document::parse(PAGE);
        let before = doc.clone();
        let file = FileUpload::new("a.png", "image/png", vec![1]);

        let result = add_gallery_image(&mut doc, &file, Some("offices"), None, 7, &DataUrlReader);
        assert!(matches!(result, Err(EditorError::GalleryNotFound(c)) if c == "offices"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_gallery_image_empty_category_is_not_defaulted() {
        let mut doc = Document::parse(PAGE);
        let before = doc.clone();
        let file = FileUpload::new("a.png", "image/png", vec![1]);

        let result = add_gallery_image(&mut doc, &file, Some(""), None, 7, &DataUrlReader);
        assert!(matches!(result, Err(EditorError::GalleryNotFound(c)) if c.is_empty()));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_gallery_image_builds_figure() {
        let mut doc = Document::parse(PAGE);
        let file = FileUpload::new("a.png", "image/png", vec![1, 2, 3]);

        let key = add_gallery_image(&mut doc, &file, None, Some("Lobby"), 42, &DataUrlReader).unwrap();
        assert_eq!(key, "dashboard-42");

        let img = doc.query_first(IMAGE_ATTR, "dashboard-42").unwrap();
        assert_eq!(img.attr("src"), Some("data:image/png;base64,AQID"));
        assert_eq!(img.attr("alt"), Some("Lobby"));

        let caption = doc.query_first(KEY_ATTR, "dashboard-42-caption").unwrap();
        assert_eq!(caption.attr(EDITABLE_ATTR), Some("true"));
        assert_eq!(caption.text_content(), "Lobby");
    }

    #[test]
    fn test_replace_image_source() {
        let mut doc = Document::parse(r#"<img src="old.png" data-admin-image="team" />"#);
        assert!(replace_image_source(&mut doc, "team", "new.png"));
        assert!(!replace_image_source(&mut doc, "ghost", "x.png"));

        let img = doc.query_first(IMAGE_ATTR, "team").unwrap();
        assert_eq!(img.attr("src"), Some("new.png"));
    }
}
