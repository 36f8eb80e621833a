//! Markup serializer.
//!
//! Writes the canonical form the parser round-trips: lowercase tags,
//! double-quoted attributes, entity escaping matching `entities::decode`,
//! void elements self-closed.

use crate::entities::{escape_attr, escape_text};
use crate::node::{Element, Node};
use crate::parser::is_void;

/// Serialize nodes to a markup fragment
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        serialize_node(node, &mut out);
    }
    out
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),

        Node::Comment(inner) => {
            out.push_str("<!--");
            out.push_str(inner);
            out.push_str("-->");
        }

        Node::Element(el) => serialize_element(el, out),
    }
}

fn serialize_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);

    for (name, value) in &el.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if is_void(&el.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &el.children {
        serialize_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;

    #[test]
    fn test_serialize_element() {
        let nodes = parse_fragment("<h3>Spring Sale</h3><p>20% off</p>");
        assert_eq!(serialize_nodes(&nodes), "<h3>Spring Sale</h3><p>20% off</p>");
    }

    #[test]
    fn test_serialize_void() {
        let nodes = parse_fragment("<img src=\"a.png\" alt=\"A\">");
        assert_eq!(serialize_nodes(&nodes), "<img src=\"a.png\" alt=\"A\" />");
    }

    #[test]
    fn test_escaping_roundtrip() {
        let nodes = parse_fragment("<p title=\"a &amp; b\">2 &lt; 3 &amp; 4</p>");
        let markup = serialize_nodes(&nodes);
        assert_eq!(markup, "<p title=\"a &amp; b\">2 &lt; 3 &amp; 4</p>");
    }

    // serialize(parse(serialize(x))) == serialize(x), even for sloppy
    // input: this backs the snapshot fixed-point property.
    #[test]
    fn test_reparse_stability() {
        let sloppy = "<DIV class=card><p>2 < 3<img src=a.png><!-- note -->";
        let once = serialize_nodes(&parse_fragment(sloppy));
        let twice = serialize_nodes(&parse_fragment(&once));
        assert_eq!(once, twice);
    }
}
