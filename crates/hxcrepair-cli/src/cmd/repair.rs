// crates/hxcrepair-cli/src/cmd/repair.rs

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::io::xml_file;

#[derive(Args)]
pub struct RepairArgs {
    /// HxC XML disk layout dump to repair
    #[arg(value_name = "HXC_XML")]
    pub input: Option<String>,
}

pub fn run(input: &str) -> Result<()> {
    info!("Repair HxC XML");
    let src = xml_file::load(input)?;

    // Nothing reaches stdout unless every track reconciled.
    let out = hxcrepair_core::repair_str(&src).with_context(|| format!("repair {input}"))?;

    let r = &out.report;
    info!(
        tracks = r.tracks,
        sectors = r.sectors_seen,
        synthesized = r.sectors_synthesized,
        filled = r.sectors_filled,
        rewritten = r.offsets_rewritten,
        reordered = r.tracks_reordered,
        bytes_added = r.bytes_added,
        image_size = r.image_size,
        unchanged = r.is_clean(),
        "repair ok"
    );

    xml_file::write_stdout(&out.xml)
}
