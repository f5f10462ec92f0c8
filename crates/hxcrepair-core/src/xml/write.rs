// crates/hxcrepair-core/src/xml/write.rs

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::xml::node::{Document, Element, Node};

impl Document {
    /// Serialize the full document.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(&mut out, node);
        }
        out
    }
}

impl Element {
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(e) => write_element(out, e),
        Node::Text(t) => out.push_str(t),
        Node::CData(t) => {
            let _ = write!(out, "<![CDATA[{t}]]>");
        }
        Node::Comment(t) => {
            let _ = write!(out, "<!--{t}-->");
        }
        Node::Decl(t) | Node::PI(t) => {
            let _ = write!(out, "<?{t}?>");
        }
        Node::DocType(t) => {
            let _ = write!(out, "<!DOCTYPE {t}>");
        }
    }
}

fn write_element(out: &mut String, e: &Element) {
    out.push('<');
    out.push_str(&e.name);
    match &e.raw_attrs {
        Some(raw) => out.push_str(raw),
        None => {
            for (k, v) in &e.attrs {
                let _ = write!(out, " {k}=\"{}\"", escape(v.as_str()));
            }
        }
    }
    if e.children.is_empty() && e.self_closing {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &e.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", e.name);
}
