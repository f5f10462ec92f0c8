// crates/hxcrepair-core/src/repair/mod.rs

//! Sector reconciliation and offset propagation over a whole disk layout.

pub mod offsets;
pub mod placeholder;
pub mod reconcile;
pub mod report;
pub mod sequencer;

use tracing::info;

use crate::error::Result;
use crate::layout::Layout;
use crate::xml::{self, Document};

pub use offsets::ReconcileState;
pub use reconcile::{SectorEntry, TrackId};
pub use report::RepairReport;
pub use sequencer::TrackSequencer;

/// Result of [`repair_str`]: the serialized document plus what changed.
#[derive(Clone, Debug)]
pub struct Repaired {
    pub xml: String,
    pub layout: Layout,
    pub report: RepairReport,
}

/// Repair a loaded document in place. On error the document may be
/// half-mutated and must not be serialized.
pub fn repair_document(doc: &mut Document) -> Result<(Layout, RepairReport)> {
    let layout = Layout::extract(doc)?;
    info!("{layout}");

    let mut report = RepairReport::default();
    let state = sequencer::sequence_tracks(doc, &layout, &mut report)?;
    report.bytes_added = state.added_offset;
    report.image_size = state.computed_offset;
    Ok((layout, report))
}

/// Parse, repair, and serialize. Nothing is produced unless every track passed.
pub fn repair_str(src: &str) -> Result<Repaired> {
    let mut doc = xml::parse(src)?;
    let (layout, report) = repair_document(&mut doc)?;
    Ok(Repaired {
        xml: doc.to_xml(),
        layout,
        report,
    })
}
