// crates/hxcrepair-core/src/repair/offsets.rs

use crate::error::{RepairError, Result};
use crate::schema;
use crate::xml::Element;

/// Running byte bookkeeping threaded through every track of one document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileState {
    /// True image position of the next sector to be emitted.
    pub computed_offset: u64,
    /// Bytes introduced so far by synthesized or zero-filled sectors.
    pub added_offset: u64,
}

impl ReconcileState {
    /// Move past `bytes` of emitted sector data.
    pub fn advance(&mut self, bytes: u64) -> Result<()> {
        self.computed_offset = checked_add(self.computed_offset, bytes)?;
        Ok(())
    }

    /// Account for `bytes` the recorded offsets do not know about yet.
    pub fn introduce(&mut self, bytes: u64) -> Result<()> {
        self.added_offset = checked_add(self.added_offset, bytes)?;
        Ok(())
    }

    /// Whether downstream recorded offsets are stale.
    pub fn shifted(&self) -> bool {
        self.added_offset > 0
    }
}

fn checked_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b)
        .ok_or_else(|| RepairError::Format(format!("offset overflow: 0x{a:x} + 0x{b:x}")))
}

/// Parse a `0x`-prefixed hex offset. The prefix is optional.
pub fn parse_hex(text: &str, what: &str) -> Result<u64> {
    let t = text.trim();
    let digits = t
        .strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .unwrap_or(t);
    u64::from_str_radix(digits, 16)
        .map_err(|_| RepairError::Format(format!("{what}: expected hex offset, got {text:?}")))
}

/// `0x` + at least six upper-case digits, the notation of the capture tool.
pub fn format_offset(offset: u64) -> String {
    format!("0x{:0width$X}", offset, width = schema::OFFSET_DIGITS)
}

/// Offset recorded in the `data_offset` child of `owner`, if any.
pub fn recorded_offset(owner: &Element) -> Result<Option<u64>> {
    match owner.child(schema::DATA_OFFSET) {
        Some(e) => parse_hex(&e.text()?, schema::DATA_OFFSET).map(Some),
        None => Ok(None),
    }
}

/// Point the `data_offset` child of `owner` at `computed`.
/// Returns false when the recorded value already matches.
pub fn correct_offset(owner: &mut Element, recorded: u64, computed: u64) -> Result<bool> {
    if recorded == computed {
        return Ok(false);
    }
    let Some(node) = owner.child_mut(schema::DATA_OFFSET) else {
        return Err(RepairError::Format(format!(
            "<{}> lacks {}",
            owner.name,
            schema::DATA_OFFSET
        )));
    };
    node.set_text(&format_offset(computed));
    Ok(true)
}
