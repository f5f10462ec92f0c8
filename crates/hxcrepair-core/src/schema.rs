// crates/hxcrepair-core/src/schema.rs

//! Element and attribute names of the HxC XML disk layout export, plus the
//! values written into synthesized nodes.
//!
//! ```text
//! <disk_layout>
//!   <layout>
//!     <number_of_track>80</number_of_track>
//!     <number_of_side>1</number_of_side>
//!     <start_sector_id>1</start_sector_id>
//!     <sector_per_track>26</sector_per_track>
//!     <sector_size>128</sector_size>
//!     <track_list>
//!       <track track_number="00" side_number="0">
//!         <data_offset>0x000000</data_offset>
//!         <sector_list>
//!           <sector sector_id="1" sector_size="128">
//!             <sector_data>...</sector_data>
//!             <datamark>0xFB</datamark>
//!             <data_offset>0x000000</data_offset>
//!           </sector>
//! ```

pub const ROOT: &str = "disk_layout";
pub const LAYOUT: &str = "layout";

pub const NUMBER_OF_TRACK: &str = "number_of_track";
pub const NUMBER_OF_SIDE: &str = "number_of_side";
pub const START_SECTOR_ID: &str = "start_sector_id";
pub const SECTOR_PER_TRACK: &str = "sector_per_track";
pub const SECTOR_SIZE: &str = "sector_size";

pub const TRACK_LIST: &str = "track_list";
pub const TRACK: &str = "track";
pub const TRACK_NUMBER_ATTR: &str = "track_number";
pub const SIDE_NUMBER_ATTR: &str = "side_number";

pub const SECTOR_LIST: &str = "sector_list";
pub const SECTOR: &str = "sector";
pub const SECTOR_ID_ATTR: &str = "sector_id";
pub const SECTOR_SIZE_ATTR: &str = "sector_size";

pub const SECTOR_DATA: &str = "sector_data";
pub const DATA_FILL: &str = "data_fill";
pub const DATAMARK: &str = "datamark";
pub const DATA_OFFSET: &str = "data_offset";

/// Fill byte of every synthesized payload.
pub const FILL_VALUE: &str = "0x00";

/// Normal data address mark; used when no neighbouring sector has one.
pub const DEFAULT_DATAMARK: &str = "0xFB";

/// Minimum hex digits of a written `data_offset`.
pub const OFFSET_DIGITS: usize = 6;

/// Sector ids are one byte in the address mark, so no real gap is wider.
pub const MAX_SECTOR_GAP: u32 = 255;
