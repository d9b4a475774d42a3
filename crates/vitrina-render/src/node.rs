//! Markup tree produced by the dispatcher.
//!
//! Renderers build [`Node`]s, never strings. Text is escaped on
//! serialization; the only way to emit raw markup is [`Node::rich`], which
//! runs the allow-list sanitizer first.

use std::fmt::Write;

use crate::sanitize::sanitize;

/// Elements serialized without a closing tag.
const VOID: &[&str] = &["img", "br", "hr", "source", "input", "col"];

/// A node of the output tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped on output.
    Text(String),
    /// Markup that already passed the sanitizer.
    Markup(String),
}

/// An element with ordered attributes and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Start building an element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// Plain text node.
pub fn text(s: impl Into<String>) -> Node {
    Node::Text(s.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Set `name` only when `value` is present and non-empty.
    pub fn attr_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a child only when present.
    pub fn child_opt(self, node: Option<impl Into<Node>>) -> Self {
        match node {
            Some(node) => self.child(node),
            None => self,
        }
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(Node::Text(s.into()))
    }

    /// Value of the first attribute called `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Rich-text field: sanitized, then emitted as markup.
    pub fn rich(html: &str) -> Self {
        Node::Markup(sanitize(html))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(&escape_text(s)),
            Node::Markup(s) => out.push_str(s),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                }
                out.push('>');
                if VOID.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }

    /// Concatenated text content (markup included verbatim), for tests and
    /// diagnostics.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) | Node::Markup(s) => s.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for elements with `tag`.
    pub fn find_all<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if e.tag == tag {
                found.push(e);
            }
            for child in &e.children {
                child.find_all(tag, found);
            }
        }
    }
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

// ============================================================================
// Tests
// ============================================================================
