// crates/hxcrepair-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepairError>;

#[derive(Debug, Error)]
pub enum RepairError {
    /// A validator expectation did not hold. Operands are pre-rendered.
    #[error("expectation fails: {what}: {left} {op} {right} -> false")]
    Expectation {
        what: String,
        left: String,
        op: &'static str,
        right: String,
    },

    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("document format error: {0}")]
    Format(String),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("xml escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepairError {
    /// True for the errors that mean the sector bookkeeping no longer matches the input.
    pub fn is_integrity(&self) -> bool {
        matches!(self, RepairError::Expectation { .. } | RepairError::Integrity(_))
    }
}
