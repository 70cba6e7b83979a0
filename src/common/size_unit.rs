// SizeUnit
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use humansize::{
    FormatSizeOptions,
    BINARY,
    DECIMAL,
};
use std::str::FromStr;

// We remove the space from the humansize output so that our own output is
// sortable by `sort -h`.
fn without_space(opts: FormatSizeOptions) -> FormatSizeOptions {
    FormatSizeOptions::from(opts).space_after_value(false)
}

/// Valid `--unit` values, these must match the `FromStr` impl below.
pub const VALID_SIZE_UNITS: &[&str] = &[
    "binary",
    "bytes",
    "decimal",
];

/// `SizeUnit` represents how we want the bucket sizes to be displayed.
#[derive(Debug, Default)]
pub enum SizeUnit {
    /// Represent bucket sizes as human readable using IEC units (multiples of
    /// 1024).
    Binary(FormatSizeOptions),

    /// Represent bucket sizes as the number of bytes.
    #[default]
    Bytes,

    /// Represent bucket sizes as human readable using SI units (multiples
    /// of 1000).
    Decimal(FormatSizeOptions),
}

impl SizeUnit {
    /// Column header label for sizes rendered in this unit.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary(_)  => "Size [IEC]",
            Self::Bytes      => "Size [Bytes]",
            Self::Decimal(_) => "Size [SI]",
        }
    }
}

/// This converts from the string arguments we receive on the command line to
/// our enum type.
impl FromStr for SizeUnit {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary"  => Ok(Self::Binary(without_space(BINARY))),
            "bytes"   => Ok(Self::Bytes),
            "decimal" => Ok(Self::Decimal(without_space(DECIMAL))),
            _         => Err("no match"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_size_units_parse() {
        for unit in VALID_SIZE_UNITS {
            assert!(SizeUnit::from_str(unit).is_ok(), "{unit}");
        }
    }

    #[test]
    fn test_invalid_size_unit() {
        let ret = SizeUnit::from_str("kilobytes");

        assert_eq!(ret.unwrap_err(), "no match");
    }
}
