// crates/hxcrepair-core/src/repair/placeholder.rs

use crate::repair::offsets::format_offset;
use crate::schema;
use crate::xml::{Element, Node};

/// Whitespace layout of a sector's children, copied onto new nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Indent {
    pub child: Option<String>,
    pub closing: Option<String>,
}

impl Indent {
    pub fn of(e: &Element) -> Self {
        Self {
            child: e.child_indent().map(str::to_string),
            closing: e.closing_indent().map(str::to_string),
        }
    }
}

/// A stand-in for a sector the capture never read:
/// `<sector><data_fill/><datamark/><data_offset/></sector>`.
pub fn sector(id: u32, size: u64, datamark: &str, offset: u64, indent: &Indent) -> Element {
    let mut e = Element::new(schema::SECTOR)
        .with_attr(schema::SECTOR_ID_ATTR, id.to_string())
        .with_attr(schema::SECTOR_SIZE_ATTR, size.to_string());

    let fields = [
        Element::new(schema::DATA_FILL).with_text(schema::FILL_VALUE),
        Element::new(schema::DATAMARK).with_text(datamark),
        Element::new(schema::DATA_OFFSET).with_text(&format_offset(offset)),
    ];
    for field in fields {
        if let Some(i) = &indent.child {
            e.push(Node::Text(i.clone()));
        }
        e.push(Node::Element(field));
    }
    if let Some(c) = &indent.closing {
        e.push(Node::Text(c.clone()));
    }
    e
}

/// Give a payload-less sector an explicit zero fill, ahead of its other children.
pub fn add_fill_marker(sector: &mut Element) {
    let fill = Node::Element(Element::new(schema::DATA_FILL).with_text(schema::FILL_VALUE));
    let indent = sector.child_indent().map(str::to_string);
    match sector.children.iter().position(|n| n.as_element().is_some()) {
        Some(first) => {
            sector.insert(first, fill);
            if let Some(i) = indent {
                sector.insert(first + 1, Node::Text(i));
            }
        }
        None => sector.push(fill),
    }
}
