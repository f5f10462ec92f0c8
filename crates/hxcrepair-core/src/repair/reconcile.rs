// crates/hxcrepair-core/src/repair/reconcile.rs

use std::fmt;

use tracing::{debug, info};

use crate::error::{RepairError, Result};
use crate::layout::{parse_decimal, Layout};
use crate::repair::offsets::{correct_offset, format_offset, recorded_offset, ReconcileState};
use crate::repair::placeholder::{self, Indent};
use crate::repair::report::RepairReport;
use crate::schema;
use crate::validate::{expect_eq, expect_gt};
use crate::xml::{Element, Node};

/// (track, side) identity of a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackId {
    pub track: u32,
    pub side: u32,
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track {} side {}", self.track, self.side)
    }
}

/// The fields of one `<sector>` the reconciler looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectorEntry {
    pub id: u32,
    pub size: u64,
    pub offset: u64,
    /// Real data or an explicit fill.
    pub has_payload: bool,
    pub datamark: Option<String>,
}

impl SectorEntry {
    pub fn read(e: &Element) -> Result<Self> {
        let id = sector_id(e)?;
        let size = parse_decimal(e.required_attr(schema::SECTOR_SIZE_ATTR)?, schema::SECTOR_SIZE_ATTR)?;
        let offset = recorded_offset(e)?.ok_or_else(|| {
            RepairError::Format(format!("sector {id} lacks {}", schema::DATA_OFFSET))
        })?;
        let datamark = match e.child(schema::DATAMARK) {
            Some(d) => Some(d.text()?),
            None => None,
        };
        Ok(Self {
            id,
            size,
            offset,
            has_payload: e.has_child(schema::SECTOR_DATA) || e.has_child(schema::DATA_FILL),
            datamark,
        })
    }
}

fn sector_id(e: &Element) -> Result<u32> {
    parse_decimal(e.required_attr(schema::SECTOR_ID_ATTR)?, schema::SECTOR_ID_ATTR)
}

/// Reconcile one `<sector_list>`: order by id, fill gaps and empty sectors,
/// and rewrite every offset to the running computed position.
pub fn reconcile_track(
    list: &mut Element,
    layout: &Layout,
    mut state: ReconcileState,
    at: TrackId,
    report: &mut RepairReport,
) -> Result<ReconcileState> {
    order_by_id(list, at, report)?;

    let list_indent = list.child_indent().map(str::to_string);
    let mut expected_next: Option<u32> = None;
    let mut prev_datamark: Option<String> = None;

    let mut i = 0;
    while i < list.children.len() {
        let Some(el) = list.children[i].as_element().filter(|e| e.name == schema::SECTOR) else {
            i += 1;
            continue;
        };
        let s = SectorEntry::read(el)?;
        let indent = Indent::of(el);
        report.sectors_seen += 1;

        expect_gt("Sector size", s.size, 0)?;
        if let Some(next) = expected_next.filter(|n| s.id.saturating_sub(*n) > schema::MAX_SECTOR_GAP) {
            return Err(RepairError::Integrity(format!(
                "gap of {} sectors before sector {} in {at}",
                s.id - next,
                s.id
            )));
        }
        if s.offset > state.computed_offset {
            expect_eq("Sector offset", s.offset, state.computed_offset)?;
        }

        if !s.has_payload {
            if let Some(el) = list.children[i].as_element_mut() {
                placeholder::add_fill_marker(el);
            }
            state.introduce(s.size)?;
            report.sectors_filled += 1;
            info!(%at, sector = s.id, size = s.size, "filling empty sector");
        }

        while let Some(next) = expected_next.filter(|n| *n < s.id) {
            info!(%at, sector = next, offset = %format_offset(state.computed_offset), "adding sector");
            let datamark = prev_datamark.as_deref().unwrap_or(schema::DEFAULT_DATAMARK);
            let added = placeholder::sector(
                next,
                layout.sector_size,
                datamark,
                state.computed_offset,
                &indent,
            );
            list.insert(i, Node::Element(added));
            i += 1;
            if let Some(t) = &list_indent {
                list.insert(i, Node::Text(t.clone()));
                i += 1;
            }
            state.advance(layout.sector_size)?;
            state.introduce(layout.sector_size)?;
            report.sectors_synthesized += 1;
            expected_next = Some(next + 1);
        }

        if let Some(el) = list.children[i].as_element_mut() {
            if correct_offset(el, s.offset, state.computed_offset)? {
                debug!(
                    %at,
                    sector = s.id,
                    from = %format_offset(s.offset),
                    to = %format_offset(state.computed_offset),
                    "rewrote sector offset"
                );
                report.offsets_rewritten += 1;
            }
        }
        state.advance(s.size)?;

        if let Some(next) = expected_next {
            expect_eq("Sector number", next, s.id)?;
        }
        expected_next = s.id.checked_add(1);
        prev_datamark = s.datamark;
        i += 1;
    }

    Ok(state)
}

/// Re-seat the `<sector>` children in ascending id order, keeping every
/// other node where it was. Duplicate ids are fatal.
fn order_by_id(list: &mut Element, at: TrackId, report: &mut RepairReport) -> Result<()> {
    let slots = list.positions_of(schema::SECTOR);
    let mut ids = Vec::with_capacity(slots.len());
    for &p in &slots {
        if let Some(e) = list.children[p].as_element() {
            ids.push(sector_id(e)?);
        }
    }

    let mut sorted = ids.clone();
    sorted.sort_unstable();
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(RepairError::Integrity(format!(
            "duplicate sector id {} in {at}",
            w[0]
        )));
    }
    if sorted == ids {
        return Ok(());
    }

    debug!(%at, ?ids, "sectors out of order; sorting by id");
    let mut taken: Vec<(u32, Node)> = slots
        .iter()
        .zip(ids)
        .map(|(&p, id)| (id, std::mem::replace(&mut list.children[p], Node::Text(String::new()))))
        .collect();
    taken.sort_by_key(|(id, _)| *id);
    for (&p, (_, node)) in slots.iter().zip(taken) {
        list.children[p] = node;
    }
    report.tracks_reordered += 1;
    Ok(())
}
