// crates/hxcrepair-core/src/xml/mod.rs

//! Minimal mutable XML tree: load, navigate by path, create and insert
//! nodes, serialize back to text. Text nodes keep their source bytes so an
//! untouched document serializes unchanged.

pub mod node;
pub mod parse;
pub mod write;

pub use node::{Document, Element, Node};
pub use parse::parse;
