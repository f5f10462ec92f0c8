// crates/hxcrepair-cli/src/io/mod.rs

pub mod xml_file;
