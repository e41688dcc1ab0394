//! # blockdoc-markup
//!
//! A small, forgiving markup parser producing a generic element tree, built
//! with [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → TreeBuilder → Fragment
//!               (Logos)          (open-element stack)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Tokenizes input into tags, text, comments and declarations. Every byte of
//! the input lands in exactly one token.
//!
//! ### 2. Tree builder ([`parser`] module)
//!
//! Walks the tokens with a stack of open elements. Void elements never take
//! children, unmatched close tags are ignored and unclosed elements are closed
//! at end of input, so any string produces a tree.
//!
//! ### 3. Tree ([`tree`] module)
//!
//! [`Node`] / [`Element`] / [`Fragment`] plus the queries consumers need:
//! attribute lookup, text content, descendant search.
//!
//! ## Quick Start
//!
//! ```
//! use blockdoc_markup::{parse, Node};
//!
//! let fragment = parse("<h2>Title</h2><p>Body</p>");
//! assert_eq!(fragment.children.len(), 2);
//!
//! let Node::Element(heading) = &fragment.children[0] else { panic!() };
//! assert_eq!(heading.tag, "h2");
//! assert_eq!(heading.text_content(), "Title");
//! ```
//!
//! The parser recognizes markup structure only. It has no notion of which
//! elements are meaningful to a document model and does not validate against
//! the HTML specification.

pub mod lexer;
pub mod parser;
pub mod tree;

pub use parser::parse;
pub use tree::{Attribute, Element, Fragment, Node};
