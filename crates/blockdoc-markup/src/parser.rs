//! # Tree Builder
//!
//! Consumes the token stream from [`crate::lexer`] and builds a [`Fragment`].
//!
//! The builder keeps a stack of open elements, the same shape as a container
//! stack in a block parser: an open tag pushes, a matching close tag pops, and
//! whatever is still open at end of input is closed implicitly. Input is never
//! rejected; malformed markup produces a valid (if imperfect) tree.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::lexer::{Token, TokenKind, lex};
use crate::tree::{Attribute, Element, Fragment, Node};

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Deepest element nesting kept in the tree. Open tags past this depth are
/// dropped and their content flows into the deepest kept element.
pub const MAX_DEPTH: usize = 256;

/// Elements whose content is raw text and is dropped from the tree.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse a markup string into an element tree. Never fails.
pub fn parse(input: &str) -> Fragment {
    let tokens = lex(input);
    let mut builder = TreeBuilder::new();
    for token in &tokens {
        builder.push(token);
    }
    builder.finish()
}

struct TreeBuilder {
    open: Vec<Element>,
    root: Vec<Node>,
    /// Set while inside `<script>`/`<style>`; holds the tag that ends the zone.
    raw_text: Option<String>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            open: vec![],
            root: vec![],
            raw_text: None,
        }
    }

    fn push(&mut self, token: &Token<'_>) {
        if let Some(raw) = &self.raw_text {
            if token.kind == TokenKind::CloseTag && close_tag_name(token.text) == *raw {
                self.raw_text = None;
            }
            return;
        }

        match token.kind {
            TokenKind::Text => self.append_text(&decode(token.text)),
            TokenKind::Lt => self.append_text("<"),
            TokenKind::Comment | TokenKind::Declaration => {}
            TokenKind::OpenTag => self.open_tag(token.text),
            TokenKind::CloseTag => self.close_tag(&close_tag_name(token.text)),
        }
    }

    fn finish(mut self) -> Fragment {
        // EOF flush
        while !self.open.is_empty() {
            self.close_current();
        }
        Fragment {
            children: self.root,
        }
    }

    fn open_tag(&mut self, text: &str) {
        let (element, self_closing) = parse_open_tag(text);

        if RAW_TEXT_ELEMENTS.contains(&element.tag.as_str()) {
            if !self_closing {
                self.raw_text = Some(element.tag);
            }
            return;
        }

        // A new paragraph or list item ends the one that is still open
        if matches!(element.tag.as_str(), "p" | "li")
            && self.open.last().is_some_and(|top| top.tag == element.tag)
        {
            self.close_current();
        }

        if self_closing || VOID_ELEMENTS.contains(&element.tag.as_str()) {
            self.append(Node::Element(element));
        } else if self.open.len() < MAX_DEPTH {
            self.open.push(element);
        }
    }

    fn close_tag(&mut self, name: &str) {
        // Unmatched close tags are ignored
        let Some(idx) = self.open.iter().rposition(|el| el.tag == name) else {
            return;
        };
        while self.open.len() > idx {
            self.close_current();
        }
    }

    fn close_current(&mut self) {
        if let Some(el) = self.open.pop() {
            self.append(Node::Element(el));
        }
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(top) => &mut top.children,
            None => &mut self.root,
        }
    }

    fn append(&mut self, node: Node) {
        self.children_mut().push(node);
    }

    fn append_text(&mut self, text: &str) {
        let children = self.children_mut();
        if let Some(Node::Text(prev)) = children.last_mut() {
            prev.push_str(text);
        } else {
            children.push(Node::Text(text.to_string()));
        }
    }
}

fn decode(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

fn tag_name(after_lt: &str) -> String {
    after_lt
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn close_tag_name(text: &str) -> String {
    tag_name(text.trim_start_matches("</"))
}

fn attribute_regex() -> &'static Regex {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_REGEX.get_or_init(|| {
        Regex::new(
            r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )
        .expect("Invalid attribute regex")
    })
}

/// Split an open tag token into its element and whether it was self-closing.
fn parse_open_tag(text: &str) -> (Element, bool) {
    let inner = text
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(text);
    let tag = tag_name(inner);
    let rest = &inner[tag.len().min(inner.len())..];
    let self_closing = rest.trim_end().ends_with('/');

    let attrs = attribute_regex()
        .captures_iter(rest)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode(m.as_str()).into_owned())
                .unwrap_or_default();
            Some(Attribute { name, value })
        })
        .collect();

    (
        Element {
            tag,
            attrs,
            children: vec![],
        },
        self_closing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn el(tag: &str, children: Vec<Node>) -> Node {
        Node::Element(Element {
            tag: tag.into(),
            attrs: vec![],
            children,
        })
    }

    fn text(s: &str) -> Node {
        Node::Text(s.into())
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parse_sibling_elements() {
        let fragment = parse("<h2>Title</h2><p>Body text</p>");
        assert_eq!(
            fragment.children,
            vec![
                el("h2", vec![text("Title")]),
                el("p", vec![text("Body text")]),
            ]
        );
    }

    #[test]
    fn tag_names_are_lowercased() {
        let fragment = parse("<DIV><P>x</P></DIV>");
        assert_eq!(fragment.children, vec![el("div", vec![el("p", vec![text("x")])])]);
    }

    #[test]
    fn attributes_in_all_quoting_styles() {
        let fragment = parse(r#"<img SRC="a.png" alt='An "alt"' width=100 hidden>"#);
        let img = fragment.children[0].as_element().unwrap();
        assert_eq!(img.attr("src"), Some("a.png"));
        assert_eq!(img.attr("alt"), Some("An \"alt\""));
        assert_eq!(img.attr("width"), Some("100"));
        assert_eq!(img.attr("hidden"), Some(""));
        assert!(img.children.is_empty());
    }

    #[test]
    fn entities_are_decoded() {
        let fragment = parse(r#"<p title="a &amp; b">1 &lt; 2 &amp; caf&eacute;</p>"#);
        let p = fragment.children[0].as_element().unwrap();
        assert_eq!(p.attr("title"), Some("a & b"));
        assert_eq!(p.text_content(), "1 < 2 & café");
    }

    #[rstest]
    #[case("<p>a<img src=x>b</p>", 1)]
    #[case("<p>a<img src=x />b</p>", 1)]
    #[case("<p>a<br>b<hr>c</p>", 2)]
    fn void_elements_take_no_children(#[case] input: &str, #[case] element_children: usize) {
        let fragment = parse(input);
        let p = fragment.children[0].as_element().unwrap();
        assert_eq!(p.child_elements().count(), element_children);
        assert!(p.child_elements().all(|c| c.children.is_empty()));
    }

    #[test]
    fn unclosed_elements_close_at_eof() {
        let fragment = parse("<div><p>open");
        assert_eq!(fragment.children, vec![el("div", vec![el("p", vec![text("open")])])]);
    }

    #[test]
    fn stray_close_tag_is_ignored() {
        let fragment = parse("</span><p>x</p>");
        assert_eq!(fragment.children, vec![el("p", vec![text("x")])]);
    }

    #[test]
    fn close_tag_pops_to_matching_element() {
        let fragment = parse("<div><b>bold</div>after");
        assert_eq!(
            fragment.children,
            vec![el("div", vec![el("b", vec![text("bold")])]), text("after")]
        );
    }

    #[test]
    fn implicit_list_item_and_paragraph_close() {
        let fragment = parse("<ul><li>one<li>two</ul><p>a<p>b");
        assert_eq!(
            fragment.children,
            vec![
                el("ul", vec![el("li", vec![text("one")]), el("li", vec![text("two")])]),
                el("p", vec![text("a")]),
                el("p", vec![text("b")]),
            ]
        );
    }

    #[test]
    fn script_style_and_comments_are_dropped() {
        let fragment = parse("<style>p { x: 1 }</style><!-- c --><script>if (a < b) {}</script><p>kept</p>");
        assert_eq!(fragment.children, vec![el("p", vec![text("kept")])]);
    }

    #[test]
    fn nesting_is_capped() {
        let input = "<div>".repeat(MAX_DEPTH + 50) + "deep";
        let fragment = parse(&input);

        let mut depth = 0;
        let mut nodes = &fragment.children;
        while let [Node::Element(el)] = nodes.as_slice() {
            depth += 1;
            nodes = &el.children;
        }
        assert_eq!(depth, MAX_DEPTH);
        assert_eq!(nodes, &vec![text("deep")]);
    }

    #[test]
    fn unbalanced_quote_recovers_following_elements() {
        let fragment = parse(r#"<p title="oops>Intro</p><h2>Specs</h2><p>Oak top</p>"#);
        assert_eq!(
            fragment.children,
            vec![
                text(r#"<p title="oops>Intro"#),
                el("h2", vec![text("Specs")]),
                el("p", vec![text("Oak top")]),
            ]
        );
    }

    #[test]
    fn unterminated_comment_is_dropped() {
        let fragment = parse("<p>kept</p><!-- draft <p>hidden</p>");
        assert_eq!(fragment.children, vec![el("p", vec![text("kept")])]);
    }

    #[test]
    fn stray_lt_becomes_text() {
        let fragment = parse("<p>1 < 2</p>");
        assert_eq!(fragment.children, vec![el("p", vec![text("1 < 2")])]);
    }
}
