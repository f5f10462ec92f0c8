// crates/hxcrepair-core/src/validate.rs

use std::fmt::Debug;

use crate::error::{RepairError, Result};

/// Comparison used by [`expect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Gt,
}

impl Cmp {
    fn symbol(self) -> &'static str {
        match self {
            Cmp::Eq => "==",
            Cmp::Gt => ">",
        }
    }
}

/// How an operand is rendered in a failed expectation.
/// Integers print as hex, everything else structurally.
pub trait Operand: PartialOrd + Debug {
    fn render(&self) -> String {
        format!("{self:?}")
    }
}

macro_rules! hex_operand {
    ($($t:ty),*) => {
        $(impl Operand for $t {
            fn render(&self) -> String {
                format!("0x{:x}", self)
            }
        })*
    };
}

hex_operand!(u8, u16, u32, u64, usize, i32, i64);

impl Operand for &str {}
impl Operand for String {}
impl<T: Operand> Operand for Option<T> {}

/// Check `left <how> right`; on failure return the fatal `Expectation` error.
pub fn expect<T: Operand>(what: &str, left: T, how: Cmp, right: T) -> Result<()> {
    let ok = match how {
        Cmp::Eq => left == right,
        Cmp::Gt => left > right,
    };
    if ok {
        return Ok(());
    }
    Err(RepairError::Expectation {
        what: what.to_string(),
        left: left.render(),
        op: how.symbol(),
        right: right.render(),
    })
}

pub fn expect_eq<T: Operand>(what: &str, left: T, right: T) -> Result<()> {
    expect(what, left, Cmp::Eq, right)
}

pub fn expect_gt<T: Operand>(what: &str, left: T, right: T) -> Result<()> {
    expect(what, left, Cmp::Gt, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_render_as_hex() {
        let err = expect_eq("Sector number", 3u32, 5u32).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expectation fails: Sector number: 0x3 == 0x5 -> false"
        );
        assert!(err.is_integrity());
    }

    #[test]
    fn strings_render_structurally() {
        let err = expect_eq("name", "track", "sector").unwrap_err();
        assert!(err.to_string().contains("\"track\" == \"sector\""));
    }

    #[test]
    fn greater_than_is_strict() {
        assert!(expect_gt("Sector size", 128u64, 0).is_ok());
        let err = expect_gt("Sector size", 0u64, 0).unwrap_err();
        assert!(err.to_string().contains("0x0 > 0x0"));
    }
}
