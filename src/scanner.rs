//! The left-to-right anchor scanner.
//!
//! Addresses are only ever looked for around their separators: at every `.`
//! the scanner looks back over at most three decimal digits, at every `:`
//! over at most four hex digits, and tries each possible start from the
//! farthest back toward the anchor. The first candidate the validator
//! accepts becomes a match and the scan resumes right after it. Nothing before
//! the end of the previous match is ever looked at again, so matches never
//! overlap.

use std::net::IpAddr;

use bstr::ByteSlice;
use memchr::{memchr, memchr2};
use tracing::trace;

use crate::lexer::{is_dec, is_hex};
use crate::matches::Match;
use crate::{ipv4, ipv6};

/// Longest decimal octet the lookback will attach to a `.`.
const MAX_IPV4_OCTET_LEN: usize = 3;
/// Longest hex group the lookback will attach to a `:`.
const MAX_IPV6_GROUP_LEN: usize = 4;

/// Which anchors the scanner stops at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Families {
    pub(crate) ipv4: bool,
    pub(crate) ipv6: bool,
}

impl Families {
    pub(crate) const ALL: Families = Families {
        ipv4: true,
        ipv6: true,
    };
}

/// An iterator over the addresses in a haystack.
///
/// Created by [`Finder::matches`](crate::Finder::matches).
#[derive(Clone, Debug)]
pub struct Matches<'h> {
    haystack: &'h [u8],
    families: Families,
    /// Where to look for the next anchor.
    pos: usize,
    /// End of the previous match; lookback never crosses it.
    last: usize,
}

impl<'h> Matches<'h> {
    #[inline]
    pub(crate) fn new(haystack: &'h [u8], families: Families) -> Matches<'h> {
        Matches {
            haystack,
            families,
            // Offset 0 is never an anchor, nothing precedes it.
            pos: 1,
            last: 0,
        }
    }

    /// Position of the next anchor at or after `pos`.
    #[inline]
    fn next_anchor(&self) -> Option<usize> {
        let rest = self.haystack.get(self.pos..)?;
        let offset = match (self.families.ipv4, self.families.ipv6) {
            (true, true) => memchr2(b'.', b':', rest),
            (true, false) => memchr(b'.', rest),
            (false, true) => memchr(b':', rest),
            (false, false) => None,
        }?;
        Some(self.pos + offset)
    }

    /// Count the bytes right before `anchor` that satisfy `pred`, up to `max`
    /// and never reaching back before the previous match.
    #[inline]
    fn lookback(&self, anchor: usize, max: usize, pred: fn(u8) -> bool) -> usize {
        let window = max.min(anchor - self.last);
        self.haystack[anchor - window..anchor]
            .iter()
            .rev()
            .take_while(|&&b| pred(b))
            .count()
    }

    fn try_ipv4(&self, anchor: usize) -> Option<Match> {
        let n = self.lookback(anchor, MAX_IPV4_OCTET_LEN, is_dec);
        (1..=n).rev().find_map(|back| {
            let start = anchor - back;
            ipv4::validate(self.haystack, start)
                .map(|(len, addr)| Match::new(start..start + len, IpAddr::V4(addr)))
        })
    }

    fn try_ipv6(&self, anchor: usize) -> Option<Match> {
        // Zero lookback is a valid start here, "::1" opens with the anchor.
        let n = self.lookback(anchor, MAX_IPV6_GROUP_LEN, is_hex);
        (0..=n).rev().find_map(|back| {
            let start = anchor - back;
            ipv6::validate(self.haystack, start)
                .map(|(len, addr)| Match::new(start..start + len, IpAddr::V6(addr)))
        })
    }
}

impl Iterator for Matches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        while let Some(anchor) = self.next_anchor() {
            let found = match self.haystack[anchor] {
                b'.' => self.try_ipv4(anchor),
                _ => self.try_ipv6(anchor),
            };
            let Some(m) = found else {
                self.pos = anchor + 1;
                continue;
            };

            // Every accepted address extends past its own anchor.
            debug_assert!(m.end() > anchor);
            self.last = m.end();
            self.pos = m.end();
            trace!(
                start = m.start(),
                end = m.end(),
                kind = %m.kind(),
                text = %m.as_bytes(self.haystack).as_bstr(),
                "matched address"
            );
            return Some(m);
        }
        self.pos = self.haystack.len();
        None
    }
}

impl std::iter::FusedIterator for Matches<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(haystack: &str, families: Families) -> Vec<&str> {
        Matches::new(haystack.as_bytes(), families)
            .map(|m| &haystack[m.range()])
            .collect()
    }

    #[test]
    fn test_lookback_is_capped() {
        // "1192" is never considered whole, the window stops at "192".
        assert_eq!(scan("1192.168.1.1", Families::ALL), vec!["192.168.1.1"]);
    }

    #[test]
    fn test_lookback_shrinks_on_failure() {
        // Starting at "999" clamps to "99" before the dot; "99." works.
        assert_eq!(scan("999.1.1.1", Families::ALL), vec!["99.1.1.1"]);
    }

    #[test]
    fn test_lookback_stops_at_previous_match() {
        assert_eq!(
            scan("1.2.3.4.5.6.7.8", Families::ALL),
            vec!["1.2.3.4", "5.6.7.8"]
        );
    }

    #[test]
    fn test_scan_resumes_after_match() {
        let found: Vec<_> = Matches::new(b"1.1.1.1,2.2.2.2", Families::ALL)
            .map(|m| m.range())
            .collect();
        assert_eq!(found, vec![0..7, 8..15]);
    }

    #[test]
    fn test_anchor_at_offset_zero_is_skipped() {
        // The scan opens at offset 1, so "::" at the very start is split.
        assert!(scan("::1 is home", Families::ALL).is_empty());
        assert_eq!(scan(" ::1 is home", Families::ALL), vec!["::1"]);
        let found: Vec<_> = Matches::new(b" ::1", Families::ALL)
            .map(|m| m.range())
            .collect();
        assert_eq!(found, vec![1..4]);
    }

    #[test]
    fn test_ipv6_lookback_takes_hex() {
        assert_eq!(scan("host=dead:beef::1;", Families::ALL), vec!["dead:beef::1"]);
    }

    #[test]
    fn test_family_filter() {
        let text = "v4 10.1.2.3 v6 fe80::1";
        assert_eq!(
            scan(
                text,
                Families {
                    ipv4: true,
                    ipv6: false
                }
            ),
            vec!["10.1.2.3"]
        );
        assert_eq!(
            scan(
                text,
                Families {
                    ipv4: false,
                    ipv6: true
                }
            ),
            vec!["fe80::1"]
        );
    }

    #[test]
    fn test_embedded_ipv4_survives_ipv4_filter() {
        let families = Families {
            ipv4: false,
            ipv6: true,
        };
        assert_eq!(scan("via ::ffff:10.0.0.1", families), vec!["::ffff:10.0.0.1"]);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut it = Matches::new(b"8.8.8.8", Families::ALL);
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_trailing_anchor() {
        assert!(scan("end:", Families::ALL).is_empty());
        assert!(scan("1.", Families::ALL).is_empty());
        assert!(scan(".", Families::ALL).is_empty());
        assert!(scan(":", Families::ALL).is_empty());
    }
}
