// crates/hxcrepair-cli/src/cmd/mod.rs

pub mod repair;
