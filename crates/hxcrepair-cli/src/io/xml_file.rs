// crates/hxcrepair-cli/src/io/xml_file.rs

use std::io::Write;

use anyhow::{bail, Context, Result};

/// The input must exist, be a regular file, and open for reading.
pub fn check_input(path: &str) -> Result<()> {
    let meta = std::fs::metadata(path).with_context(|| format!("File not readable: {path}"))?;
    if !meta.is_file() {
        bail!("Not a plain file: {path}");
    }
    std::fs::File::open(path).with_context(|| format!("File not readable: {path}"))?;
    Ok(())
}

/// Load an HxC XML dump as text.
pub fn load(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read dump {path}"))
}

/// Write the repaired document to stdout in one piece.
pub fn write_stdout(xml: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(xml.as_bytes()).context("write stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}
