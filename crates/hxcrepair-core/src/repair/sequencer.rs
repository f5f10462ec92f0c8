// crates/hxcrepair-core/src/repair/sequencer.rs

use tracing::debug;

use crate::error::{RepairError, Result};
use crate::layout::{parse_decimal, Layout};
use crate::repair::offsets::{correct_offset, format_offset, recorded_offset, ReconcileState};
use crate::repair::reconcile::{reconcile_track, TrackId};
use crate::repair::report::RepairReport;
use crate::schema;
use crate::validate::expect_eq;
use crate::xml::{Document, Element};

/// Predicts the (track, side) pair of the next `<track>`.
/// Sides count up and wrap at `side_count`; the track number moves on wrap.
#[derive(Clone, Copy, Debug)]
pub struct TrackSequencer {
    side_count: u32,
    predicted: Option<TrackId>,
}

impl TrackSequencer {
    pub fn new(layout: &Layout) -> Self {
        Self {
            side_count: layout.side_count,
            predicted: None,
        }
    }

    /// Check `actual` against the prediction (none for the first track),
    /// then predict its successor.
    pub fn accept(&mut self, actual: TrackId) -> Result<()> {
        if let Some(p) = self.predicted {
            expect_eq("Track number", p.track, actual.track)?;
            expect_eq("Side number", p.side, actual.side)?;
        }
        self.predicted = Some(self.successor(actual)?);
        Ok(())
    }

    pub fn successor(&self, t: TrackId) -> Result<TrackId> {
        let side = t.side.saturating_add(1);
        if side >= self.side_count {
            let track = t.track.checked_add(1).ok_or_else(|| {
                RepairError::Format(format!("track number overflow after {t}"))
            })?;
            Ok(TrackId { track, side: 0 })
        } else {
            Ok(TrackId { track: t.track, side })
        }
    }
}

/// Walk every `<track>` in document order, threading the offset state.
pub fn sequence_tracks(
    doc: &mut Document,
    layout: &Layout,
    report: &mut RepairReport,
) -> Result<ReconcileState> {
    let path = format!("/{}/{}/{}", schema::ROOT, schema::LAYOUT, schema::TRACK_LIST);
    let tracks = doc.require_mut(&path)?;

    let mut sequencer = TrackSequencer::new(layout);
    let mut state = ReconcileState::default();

    for track in tracks.children_named_mut(schema::TRACK) {
        let at = track_id(track)?;
        sequencer.accept(at)?;
        report.tracks += 1;

        if state.shifted() {
            if let Some(recorded) = recorded_offset(track)? {
                if correct_offset(track, recorded, state.computed_offset)? {
                    debug!(
                        %at,
                        from = %format_offset(recorded),
                        to = %format_offset(state.computed_offset),
                        "rewrote track offset"
                    );
                    report.offsets_rewritten += 1;
                }
            }
        }

        if let Some(list) = track.child_mut(schema::SECTOR_LIST) {
            state = reconcile_track(list, layout, state, at, report)?;
        }
    }

    Ok(state)
}

fn track_id(track: &Element) -> Result<TrackId> {
    Ok(TrackId {
        track: parse_decimal(track.required_attr(schema::TRACK_NUMBER_ATTR)?, schema::TRACK_NUMBER_ATTR)?,
        side: parse_decimal(track.required_attr(schema::SIDE_NUMBER_ATTR)?, schema::SIDE_NUMBER_ATTR)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(sides: u32) -> TrackSequencer {
        TrackSequencer::new(&Layout {
            track_count: 80,
            side_count: sides,
            sectors_per_track: 9,
            sector_size: 512,
            start_sector_id: 1,
        })
    }

    fn t(track: u32, side: u32) -> TrackId {
        TrackId { track, side }
    }

    #[test]
    fn double_sided_alternates_sides() {
        let mut s = seq(2);
        for at in [t(0, 0), t(0, 1), t(1, 0), t(1, 1), t(2, 0)] {
            s.accept(at).unwrap();
        }
    }

    #[test]
    fn repeated_side_is_rejected() {
        let mut s = seq(2);
        s.accept(t(0, 0)).unwrap();
        let err = s.accept(t(1, 0)).unwrap_err();
        assert!(err.is_integrity());
        assert!(err.to_string().contains("Track number"));
    }

    #[test]
    fn single_sided_advances_track_every_time() {
        let mut s = seq(1);
        s.accept(t(5, 0)).unwrap();
        s.accept(t(6, 0)).unwrap();
        let err = s.accept(t(8, 0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expectation fails: Track number: 0x7 == 0x8 -> false"
        );
    }

    #[test]
    fn more_than_two_sides_wrap() {
        let s = seq(3);
        assert_eq!(s.successor(t(4, 1)).unwrap(), t(4, 2));
        assert_eq!(s.successor(t(4, 2)).unwrap(), t(5, 0));
    }

    #[test]
    fn first_track_is_not_checked() {
        let mut s = seq(2);
        s.accept(t(3, 1)).unwrap();
        s.accept(t(4, 0)).unwrap();
    }
}
