// crates/hxcrepair-core/src/xml/node.rs

use std::borrow::Cow;

use quick_xml::escape::{partial_escape, unescape};

use crate::error::{RepairError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, kept escaped exactly as read.
    Text(String),
    CData(String),
    Comment(String),
    /// `<?xml ...?>` content between the markers.
    Decl(String),
    PI(String),
    DocType(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_element_named(&self, name: &str) -> bool {
        matches!(self, Node::Element(e) if e.name == name)
    }

    /// Whitespace-only text, i.e. indentation.
    pub fn as_indent(&self) -> Option<&str> {
        match self {
            Node::Text(t) if t.chars().all(char::is_whitespace) => Some(t),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attribute values are stored unescaped, in source order.
    pub(crate) attrs: Vec<(String, String)>,
    /// Source text between the tag name and `>` (or `/>`), written back
    /// verbatim until an attribute changes.
    pub(crate) raw_attrs: Option<String>,
    pub children: Vec<Node>,
    /// Written as `<name/>` while it has no children.
    pub self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute that must be present.
    pub fn required_attr(&self, key: &str) -> Result<&str> {
        self.attr(key).ok_or_else(|| {
            RepairError::Format(format!("<{}> lacks attribute {key}", self.name))
        })
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        self.raw_attrs = None;
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|e| e.name == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(move |e| e.name == name)
    }

    pub fn children_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .filter(move |e| e.name == name)
    }

    /// Indexes into `children` of the element children called `name`.
    pub fn positions_of(&self, name: &str) -> Vec<usize> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_element_named(name))
            .map(|(i, _)| i)
            .collect()
    }

    /// Relative path lookup, `/`-separated, first match at each step.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |e, step| e.child(step))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Element> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |e, step| e.child_mut(step))
    }

    /// Unescaped, trimmed character content of the direct children.
    pub fn text(&self) -> Result<String> {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(&unescape(t)?),
                Node::CData(t) => out.push_str(t),
                _ => {}
            }
        }
        Ok(out.trim().to_string())
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        let escaped: Cow<'_, str> = partial_escape(text);
        self.children = vec![Node::Text(escaped.into_owned())];
        self.self_closing = false;
    }

    pub fn insert(&mut self, index: usize, node: Node) {
        self.children.insert(index, node);
        self.self_closing = false;
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
        self.self_closing = false;
    }

    /// Indentation in front of the first element child.
    pub fn child_indent(&self) -> Option<&str> {
        let first = self.children.iter().position(|n| n.as_element().is_some())?;
        first
            .checked_sub(1)
            .and_then(|i| self.children[i].as_indent())
    }

    /// Indentation in front of the closing tag.
    pub fn closing_indent(&self) -> Option<&str> {
        let last = self.children.iter().rposition(|n| n.as_element().is_some())?;
        self.children.get(last + 1).and_then(Node::as_indent)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes: declaration, comments, the root element.
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(Node::as_element)
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(Node::as_element_mut)
    }

    /// Absolute path lookup; the first step names the root element.
    pub fn find(&self, path: &str) -> Option<&Element> {
        let (head, rest) = split_root(path);
        self.root()
            .filter(|r| r.name == head)
            .and_then(|r| r.find(rest))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Element> {
        let (head, rest) = split_root(path);
        self.root_mut()
            .filter(|r| r.name == head)
            .and_then(|r| r.find_mut(rest))
    }

    /// Like [`Document::find`] but a missing element is a format error.
    pub fn require(&self, path: &str) -> Result<&Element> {
        self.find(path)
            .ok_or_else(|| RepairError::Format(format!("missing element {path}")))
    }

    pub fn require_mut(&mut self, path: &str) -> Result<&mut Element> {
        self.find_mut(path)
            .ok_or_else(|| RepairError::Format(format!("missing element {path}")))
    }
}

fn split_root(path: &str) -> (&str, &str) {
    let path = path.trim_start_matches('/');
    path.split_once('/').unwrap_or((path, ""))
}
