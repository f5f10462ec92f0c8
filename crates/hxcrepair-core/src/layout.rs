// crates/hxcrepair-core/src/layout.rs

use std::str::FromStr;

use crate::error::{RepairError, Result};
use crate::schema;
use crate::xml::Document;

/// Global disk geometry, read once from `<layout>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub track_count: u32,
    pub side_count: u32,
    pub sectors_per_track: u32,
    /// Bytes per sector; also the size of every synthesized sector.
    pub sector_size: u64,
    pub start_sector_id: u32,
}

impl Layout {
    /// Read the five decimal scalars under `/disk_layout/layout`.
    /// Only presence and syntax are checked here.
    pub fn extract(doc: &Document) -> Result<Self> {
        Ok(Self {
            track_count: scalar(doc, schema::NUMBER_OF_TRACK)?,
            side_count: scalar(doc, schema::NUMBER_OF_SIDE)?,
            sectors_per_track: scalar(doc, schema::SECTOR_PER_TRACK)?,
            sector_size: scalar(doc, schema::SECTOR_SIZE)?,
            start_sector_id: scalar(doc, schema::START_SECTOR_ID)?,
        })
    }

    /// Bytes in one full track.
    pub fn track_size(&self) -> u64 {
        self.sector_size.saturating_mul(u64::from(self.sectors_per_track))
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tracks, {} sides, {} sectors, starting at {}, {} bytes per sector",
            self.track_count,
            self.side_count,
            self.sectors_per_track,
            self.start_sector_id,
            self.sector_size
        )
    }
}

fn scalar<T: FromStr>(doc: &Document, field: &str) -> Result<T> {
    let path = format!("/{}/{}/{}", schema::ROOT, schema::LAYOUT, field);
    let text = doc.require(&path)?.text()?;
    parse_decimal(&text, field)
}

/// Parse a decimal field such as `sector_id="07"`.
pub fn parse_decimal<T: FromStr>(text: &str, what: &str) -> Result<T> {
    text.trim()
        .parse()
        .map_err(|_| RepairError::Format(format!("{what}: expected decimal integer, got {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;

    const HEADER: &str = "<disk_layout><layout>\
        <number_of_track>80</number_of_track>\
        <number_of_side>2</number_of_side>\
        <format>IBM_FM</format>\
        <start_sector_id>1</start_sector_id>\
        <sector_per_track>26</sector_per_track>\
        <sector_size>128</sector_size>\
        </layout></disk_layout>";

    #[test]
    fn reads_all_scalars() {
        let layout = Layout::extract(&parse(HEADER).unwrap()).unwrap();
        assert_eq!(
            layout,
            Layout {
                track_count: 80,
                side_count: 2,
                sectors_per_track: 26,
                sector_size: 128,
                start_sector_id: 1,
            }
        );
        assert_eq!(layout.track_size(), 26 * 128);
        assert_eq!(
            layout.to_string(),
            "80 tracks, 2 sides, 26 sectors, starting at 1, 128 bytes per sector"
        );
    }

    #[test]
    fn missing_or_bad_field_is_a_format_error() {
        let doc = parse(&HEADER.replace("<sector_size>128</sector_size>", "")).unwrap();
        assert!(matches!(Layout::extract(&doc), Err(RepairError::Format(_))));

        let doc = parse(&HEADER.replace(">128<", ">0x80<")).unwrap();
        assert!(matches!(Layout::extract(&doc), Err(RepairError::Format(_))));
    }

    #[test]
    fn zero_sector_size_is_accepted_here() {
        let doc = parse(&HEADER.replace(">128<", ">0<")).unwrap();
        assert_eq!(Layout::extract(&doc).unwrap().sector_size, 0);
    }
}
