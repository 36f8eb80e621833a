//! Node tree for a rendered page.
//!
//! Elements keep attributes as ordered `(name, value)` pairs and expose
//! the handful of accessors the admin layer leans on: attribute get/set,
//! class toggles, text content, and `innerHTML`-style markup get/set.
//!
//! Queries are *live*: they walk the current tree on every call rather
//! than caching a result set, so elements inserted by mutators show up
//! in the next query.

use crate::parser::parse_fragment;
use crate::serializer::serialize_nodes;

/// A node in the page tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,

    /// Ordered attribute pairs
    pub attributes: Vec<(String, String)>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove an attribute if present
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add a class to the class list (no-op if already present)
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let next = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", &next);
    }

    /// Remove a class from the class list
    pub fn remove_class(&mut self, class: &str) {
        if let Some(existing) = self.attr("class") {
            let next = existing
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("class", &next);
        }
    }

    /// Concatenated text content of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Serialize children to a markup fragment (`innerHTML` read)
    pub fn inner_markup(&self) -> String {
        serialize_nodes(&self.children)
    }

    /// Replace children by parsing a markup fragment (`innerHTML` write)
    pub fn set_inner_markup(&mut self, markup: &str) {
        self.children = parse_fragment(markup);
    }

    /// Insert a node as the first child
    pub fn prepend_child(&mut self, node: Node) {
        self.children.insert(0, node);
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// A rendered page, rooted at its `<body>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub body: Element,
}

impl Document {
    /// Parse page source.
    ///
    /// If the source contains a `<body>` element it becomes the root;
    /// otherwise the whole fragment is wrapped in a synthetic body, so
    /// bare fragments work in tests and tooling.
    pub fn parse(source: &str) -> Self {
        let nodes = parse_fragment(source);
        let body = match take_body(nodes) {
            Ok(body) => body,
            Err(nodes) => Element {
                tag: "body".to_string(),
                attributes: Vec::new(),
                children: nodes,
            },
        };
        Self { body }
    }

    pub fn from_body(body: Element) -> Self {
        Self { body }
    }

    /// Visit every element (body included) in document order
    pub fn walk_elements<F: FnMut(&Element)>(&self, f: &mut F) {
        walk(&self.body, f);
    }

    /// Visit every element mutably in document order.
    ///
    /// The callback runs before the element's children are descended,
    /// so content it rewrites is visited too.
    pub fn walk_elements_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        walk_mut(&mut self.body, f);
    }

    /// All elements carrying the given attribute, in document order
    pub fn query_all(&self, attr: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_matching(&self.body, &mut |el| el.attr(attr).is_some(), &mut out);
        out
    }

    /// First element whose attribute equals the given value
    pub fn query_first(&self, attr: &str, value: &str) -> Option<&Element> {
        let mut out = Vec::new();
        collect_matching(&self.body, &mut |el| el.attr(attr) == Some(value), &mut out);
        out.into_iter().next()
    }

    /// Mutable variant of [`Document::query_first`]
    pub fn query_first_mut(&mut self, attr: &str, value: &str) -> Option<&mut Element> {
        find_first_mut(&mut self.body, attr, value)
    }
}

fn walk<F: FnMut(&Element)>(el: &Element, f: &mut F) {
    f(el);
    for child in &el.children {
        if let Node::Element(child_el) = child {
            walk(child_el, f);
        }
    }
}

fn walk_mut<F: FnMut(&mut Element)>(el: &mut Element, f: &mut F) {
    f(el);
    for child in &mut el.children {
        if let Node::Element(child_el) = child {
            walk_mut(child_el, f);
        }
    }
}

fn collect_matching<'a>(
    el: &'a Element,
    pred: &mut impl FnMut(&Element) -> bool,
    out: &mut Vec<&'a Element>,
) {
    if pred(el) {
        out.push(el);
    }
    for child in &el.children {
        if let Node::Element(child_el) = child {
            collect_matching(child_el, pred, out);
        }
    }
}

fn find_first_mut<'a>(el: &'a mut Element, attr: &str, value: &str) -> Option<&'a mut Element> {
    if el.attr(attr) == Some(value) {
        return Some(el);
    }
    for child in &mut el.children {
        if let Node::Element(child_el) = child {
            if let Some(found) = find_first_mut(child_el, attr, value) {
                return Some(found);
            }
        }
    }
    None
}

/// Pull the first `<body>` element out of a parsed page, or give the
/// nodes back unchanged if there is none.
fn take_body(nodes: Vec<Node>) -> Result<Element, Vec<Node>> {
    fn search(nodes: &[Node]) -> Option<Element> {
        for node in nodes {
            if let Node::Element(el) = node {
                if el.tag == "body" {
                    return Some(el.clone());
                }
                if let Some(found) = search(&el.children) {
                    return Some(found);
                }
            }
        }
        None
    }

    match search(&nodes) {
        Some(body) => Ok(body),
        None => Err(nodes),
    }
}
