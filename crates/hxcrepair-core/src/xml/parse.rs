// crates/hxcrepair-core/src/xml/parse.rs

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{RepairError, Result};
use crate::xml::node::{Document, Element, Node};

/// Parse a whole document. Whitespace is kept verbatim.
pub fn parse(src: &str) -> Result<Document> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(false);

    let mut doc = Document::default();
    let mut open: Vec<Element> = Vec::new();

    loop {
        let node = match reader.read_event()? {
            Event::Start(e) => {
                open.push(start_element(&e)?);
                continue;
            }
            Event::End(_) => {
                let e = open
                    .pop()
                    .ok_or_else(|| RepairError::Format("unbalanced closing tag".into()))?;
                Node::Element(e)
            }
            Event::Empty(e) => {
                let mut el = start_element(&e)?;
                el.self_closing = true;
                Node::Element(el)
            }
            Event::Text(t) => Node::Text(utf8(&t)?),
            Event::CData(t) => Node::CData(utf8(&t)?),
            Event::Comment(t) => Node::Comment(utf8(&t)?),
            Event::Decl(d) => Node::Decl(utf8(&d)?),
            Event::PI(p) => Node::PI(utf8(&p)?),
            Event::DocType(t) => Node::DocType(utf8(&t)?),
            Event::Eof => break,
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => doc.nodes.push(node),
        }
    }

    if let Some(e) = open.last() {
        return Err(RepairError::Format(format!("unclosed element <{}>", e.name)));
    }
    if doc.root().is_none() {
        return Err(RepairError::Format("document has no root element".into()));
    }
    Ok(doc)
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let mut el = Element::new(utf8(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        el.attrs.push((key, value));
    }
    el.raw_attrs = Some(utf8(e.attributes_raw())?);
    Ok(el)
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| RepairError::Format(format!("invalid utf-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_whitespace_and_attribute_order() {
        let doc = parse("<?xml version=\"1.0\"?>\n<a x=\"1\" y=\"2\">\n  <b>7</b>\n</a>\n").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.attr("x"), Some("1"));
        assert_eq!(root.attrs[1].0, "y");
        assert_eq!(root.child("b").unwrap().text().unwrap(), "7");
        assert_eq!(root.child_indent(), Some("\n  "));
        assert!(matches!(doc.nodes[0], Node::Decl(_)));
    }

    #[test]
    fn path_lookup_is_anchored_at_root() {
        let doc = parse("<disk_layout><layout><sector_size>128</sector_size></layout></disk_layout>")
            .unwrap();
        let e = doc.find("/disk_layout/layout/sector_size").unwrap();
        assert_eq!(e.text().unwrap(), "128");
        assert!(doc.find("/layout/sector_size").is_none());
        assert!(doc.require("/disk_layout/missing").is_err());
    }

    #[test]
    fn rejects_broken_documents() {
        assert!(parse("<a><b></a>").is_err());
        assert!(parse("<a>").is_err());
        assert!(parse("   ").is_err());
    }
}
