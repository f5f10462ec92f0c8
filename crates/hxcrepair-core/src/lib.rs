pub mod error;
pub mod validate;

pub mod layout;
pub mod repair;
pub mod schema;
pub mod xml;

pub use crate::error::{RepairError, Result};
pub use crate::layout::Layout;
pub use crate::repair::{repair_document, repair_str, RepairReport, Repaired};
