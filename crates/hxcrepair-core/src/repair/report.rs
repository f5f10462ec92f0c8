// crates/hxcrepair-core/src/repair/report.rs

/// What one repair pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub tracks: usize,
    /// Sectors present in the input.
    pub sectors_seen: usize,
    /// Placeholders inserted for missing sector ids.
    pub sectors_synthesized: usize,
    /// Existing sectors that received a zero fill.
    pub sectors_filled: usize,
    /// Sector and track `data_offset` values rewritten.
    pub offsets_rewritten: usize,
    /// Tracks whose sectors were not in ascending id order.
    pub tracks_reordered: usize,
    pub bytes_added: u64,
    /// Total bytes of sector data in the repaired image.
    pub image_size: u64,
}

impl RepairReport {
    /// True when the pass left the document untouched.
    pub fn is_clean(&self) -> bool {
        self.sectors_synthesized == 0
            && self.sectors_filled == 0
            && self.offsets_rewritten == 0
            && self.tracks_reordered == 0
    }
}
