//! Lenient fragment parser.
//!
//! Mirrors what `innerHTML` assignment does in a browser, minus error
//! reporting: there is none. Unclosed tags close at end of input, stray
//! closing tags are dropped, void elements never take children, and
//! anything the lexer could not classify is already text by the time it
//! reaches us.

use crate::entities::decode;
use crate::lexer::{lex, Token};
use crate::node::{Element, Node};

/// Elements that never have children and never see a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Parse a markup fragment into nodes. Never fails.
pub fn parse_fragment(source: &str) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    for token in lex(source) {
        match token {
            Token::Tag(slice) => {
                let (element, self_closing) = parse_tag(slice);
                if self_closing || is_void(&element.tag) {
                    push_node(&mut stack, &mut root, Node::Element(element));
                } else {
                    stack.push(element);
                }
            }

            Token::ClosingTag(slice) => {
                let name = closing_tag_name(slice);
                // Close up to the matching open tag; a stray close with
                // no match on the stack is dropped.
                if let Some(depth) = stack.iter().rposition(|el| el.tag == name) {
                    while stack.len() > depth {
                        let done = stack.pop().expect("stack depth checked");
                        push_node(&mut stack, &mut root, Node::Element(done));
                    }
                }
            }

            Token::Text(slice) => {
                let text = decode(slice);
                push_text(&mut stack, &mut root, text);
            }

            Token::Comment(slice) => {
                let inner = slice["<!--".len()..slice.len() - "-->".len()].to_string();
                push_node(&mut stack, &mut root, Node::Comment(inner));
            }

            Token::Directive => {}
        }
    }

    // Implicit close at end of input.
    while let Some(done) = stack.pop() {
        push_node(&mut stack, &mut root, Node::Element(done));
    }

    root
}

fn push_node(stack: &mut [Element], root: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

/// Append text, merging with a trailing text node so lexer splits
/// (e.g. around a stray `<`) do not fragment content.
fn push_text(stack: &mut [Element], root: &mut Vec<Node>, text: String) {
    let children = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => root,
    };
    if let Some(Node::Text(existing)) = children.last_mut() {
        existing.push_str(&text);
    } else {
        children.push(Node::Text(text));
    }
}

fn closing_tag_name(slice: &str) -> String {
    slice
        .trim_start_matches("</")
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

/// Parse an open-tag slice (`<p class="intro">`) into an element plus a
/// self-closing flag.
fn parse_tag(slice: &str) -> (Element, bool) {
    let inner = &slice[1..slice.len() - 1];
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    };

    let bytes = inner.as_bytes();
    let mut i = 0;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'/' {
        i += 1;
    }
    let mut element = Element::new(inner[..i].to_ascii_lowercase());

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' && bytes[i] != b'/' {
            i += 1;
        }
        let name = inner[name_start..i].to_ascii_lowercase();
        if name.is_empty() {
            i += 1;
            continue;
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                let raw = &inner[value_start..i];
                if i < bytes.len() {
                    i += 1; // closing quote
                }
                decode(raw)
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'/' {
                    i += 1;
                }
                decode(&inner[value_start..i])
            }
        } else {
            String::new()
        };

        element.attributes.push((name, value));
    }

    (element, self_closing)
}
