//! Element tree produced by [`crate::parse`].
//!
//! The tree is deliberately generic: elements carry a lower-cased tag name,
//! their attributes in source order, and child nodes. Nothing here knows what
//! a `<table>` or an `<img>` means; that is left to consumers.

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name
    pub name: String,
    /// Decoded value (`""` for bare boolean attributes)
    pub value: String,
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Decoded character data
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(std::slice::from_ref(self), &mut out);
        out
    }
}

/// An element with its tag, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Whether this element has the given (lower-case) tag name.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Value of the first attribute with this name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Direct element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// All descendant elements in pre-order, not including `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(&self.children, &mut out);
        out
    }

    /// All descendant elements with the given tag, in pre-order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.is(tag))
            .collect()
    }

    /// First descendant element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|el| el.is(tag))
    }
}

/// Top-level result of parsing a markup string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub children: Vec<Node>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

// Pre-order walks over an explicit stack of sibling iterators.

fn collect_text(nodes: &[Node], out: &mut String) {
    let mut stack = vec![nodes.iter()];
    while let Some(siblings) = stack.last_mut() {
        match siblings.next() {
            Some(Node::Text(text)) => out.push_str(text),
            Some(Node::Element(el)) => stack.push(el.children.iter()),
            None => {
                stack.pop();
            }
        }
    }
}

fn collect_elements<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
    let mut stack = vec![nodes.iter()];
    while let Some(siblings) = stack.last_mut() {
        match siblings.next() {
            Some(Node::Element(el)) => {
                out.push(el);
                stack.push(el.children.iter());
            }
            Some(Node::Text(_)) => {}
            None => {
                stack.pop();
            }
        }
    }
}
