//! RFD identifier formatting and matching.

use crate::{
    constants::{MAX_RFD_NUMBER, RFD_ID_WIDTH},
    errors::{RfdError, RfdResult},
};
use std::fmt::Display;

/// An RFD ordinal, rendered as a zero-padded 4-digit identifier (e.g. `0007`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RfdNumber(u32);

impl RfdNumber {
    /// Creates a new [RfdNumber], rejecting ordinals that overflow the `nnnn` format.
    pub fn new(n: u32) -> RfdResult<Self> {
        if n > MAX_RFD_NUMBER {
            return Err(RfdError::IdOverflow(n));
        }
        Ok(Self(n))
    }

    /// Returns the numeric value of the identifier.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Display for RfdNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.0, width = RFD_ID_WIDTH)
    }
}

/// Returns `true` iff the first 4 characters of `name` are decimal digits.
///
/// Trailing characters are deliberately unconstrained, so `0007-extra` matches.
/// Existing repositories may carry branch or directory names in that shape, so
/// the check is a prefix check rather than a full-string pattern.
pub fn is_rfd_id(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= RFD_ID_WIDTH && bytes[..RFD_ID_WIDTH].iter().all(u8::is_ascii_digit)
}

/// Parses the leading digit run of a name that passes [is_rfd_id].
///
/// Returns [None] for non-matching names or unparseable digit runs; callers
/// skip those rather than fail, since unrelated refs may share the namespace.
pub fn parse_leading_id(name: &str) -> Option<u32> {
    if !is_rfd_id(name) {
        return None;
    }

    let digits = &name[..name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len())];
    digits.parse().ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        assert_eq!(RfdNumber::new(7).unwrap().to_string(), "0007");
        assert_eq!(RfdNumber::new(42).unwrap().to_string(), "0042");
        assert_eq!(RfdNumber::new(1000).unwrap().to_string(), "1000");
    }

    #[test]
    fn rejects_overflowing_ordinals() {
        assert!(matches!(
            RfdNumber::new(10000),
            Err(RfdError::IdOverflow(10000))
        ));
        assert!(RfdNumber::new(9999).is_ok());
    }

    #[test]
    fn matches_four_digit_prefixes() {
        assert!(is_rfd_id("0007"));
        assert!(is_rfd_id("0007-extra"));
        assert!(!is_rfd_id("abc7"));
        assert!(!is_rfd_id("07"));
        assert!(!is_rfd_id("main"));
        assert!(!is_rfd_id(""));
    }

    #[test]
    fn parses_leading_digit_run() {
        assert_eq!(parse_leading_id("0007"), Some(7));
        assert_eq!(parse_leading_id("0042-suffix"), Some(42));
        // Five leading digits parse as the full run.
        assert_eq!(parse_leading_id("00071"), Some(71));
        assert_eq!(parse_leading_id("main"), None);
        assert_eq!(parse_leading_id("07"), None);
    }
}
