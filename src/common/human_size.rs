// HumanSize trait and implementations
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::SizeUnit;
use humansize::format_size;
use tracing::debug;

/// `HumanSize` trait.
pub trait HumanSize {
    /// Return `self` formatted according to `unit`.
    fn humansize(&self, unit: &SizeUnit) -> String;
}

/// `HumanSize` trait implementation for `u64`.
impl HumanSize for u64 {
    /// Return `self` as a human friendly size if requested by `unit`.
    fn humansize(&self, unit: &SizeUnit) -> String {
        debug!("humansize: size {}, unit {:?}", self, unit);

        match unit {
            SizeUnit::Binary(opts)  => format_size(*self, opts),
            SizeUnit::Bytes         => self.to_string(),
            SizeUnit::Decimal(opts) => format_size(*self, opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_humansize() {
        let tests = vec![
            (0,           "binary",  "0B"),
            (1024,        "binary",  "1KiB"),
            (1,           "bytes",   "1"),
            (123_456_789, "bytes",   "123456789"),
            (123_456_789, "decimal", "123.46MB"),
        ];

        for test in tests {
            let size: u64 = test.0;
            let unit      = SizeUnit::from_str(test.1).unwrap();
            let expected  = test.2;

            let ret = size.humansize(&unit);

            assert_eq!(ret, expected);
        }
    }
}
