//! # Backstage DOM
//!
//! Markup document model for Backstage pages.
//!
//! A page is a tree of [`Node`]s rooted at a `<body>` element. The model
//! mirrors what a browser gives the admin layer: attribute lookups,
//! `innerHTML`-style fragment get/set, and live attribute queries.
//!
//! ```text
//! source text ──lexer──▶ tokens ──parser──▶ Node tree ──serializer──▶ markup
//! ```
//!
//! Parsing is *lenient* by contract: it never fails. Stray `<` becomes
//! text, unclosed tags close at end of input, and void elements never
//! take children. The serializer writes a canonical form whose re-parse
//! is stable, which is what lets snapshot collect/apply reach a fixed
//! point upstream.

mod entities;
mod lexer;
mod node;
mod parser;
mod serializer;

pub use node::{Document, Element, Node};
pub use parser::parse_fragment;
pub use serializer::serialize_nodes;
