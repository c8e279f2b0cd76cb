//! Find IPv4 and IPv6 address literals in free-form text.
//!
//! `ipsearch` locates every substring of a byte buffer that is a lexically
//! valid IPv4 or IPv6 literal and reports its byte offsets. Addresses do not
//! need to be delimited: they may touch punctuation, words, or each other.
//!
//! - **Anchor scanning**: only `.` and `:` start a search. Everything else is
//!   skipped with `memchr`. The first byte is never an anchor, so text that
//!   opens with `::` does not match there.
//! - **Bounded backtracking**: at each anchor at most three (IPv4) or four
//!   (IPv6) preceding digits are considered as the start of an address, and
//!   candidates are tried from the farthest back toward the anchor.
//! - **Lexical validation only**: no address is rejected for being private,
//!   loopback, or otherwise special.
//!
//! ## Quick Start
//!
//! ```
//! let text = "github.com has address 140.82.121.4, yandex.ru has 2a02:6b8:a::a";
//! let found: Vec<&str> = ipsearch::find(text)
//!     .into_iter()
//!     .map(|range| &text[range])
//!     .collect();
//! assert_eq!(found, ["140.82.121.4", "2a02:6b8:a::a"]);
//! ```
//!
//! ## Configuration
//!
//! Use [`FinderBuilder`] to restrict the search to one address family, and
//! [`Finder::matches`] to get the decoded address with each range:
//!
//! ```
//! use ipsearch::{FinderBuilder, Kind};
//!
//! # fn main() -> anyhow::Result<()> {
//! let finder = FinderBuilder::new().ipv4(false).build()?;
//! let data = b"10.0.0.1 routed via fe80::1";
//!
//! let found: Vec<_> = finder.matches(data).collect();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].kind(), Kind::V6);
//! assert_eq!(found[0].as_bytes(data), b"fe80::1");
//! assert_eq!(found[0].addr(), "fe80::1".parse::<std::net::IpAddr>()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Matching rules worth knowing
//!
//! Digit runs are clamped rather than rejected: an octet stops before the
//! digit that would take it over 255, and a group before the digit that would
//! take it over `ffff`. So `1.2.3.4567` yields `1.2.3.45`, leaving `67` outside
//! the match. A `::` may appear once; in `1::1::1` the first address ends
//! before the second `::`.

use std::ops::Range;

use tracing::debug;

pub mod error;
mod ipv4;
mod ipv6;
mod lexer;
mod matches;
mod scanner;

pub use crate::error::{Error, Result};
pub use crate::ipv4::check_ipv4;
pub use crate::ipv6::check_ipv6;
pub use crate::matches::{Kind, Match};
pub use crate::scanner::Matches;

use crate::scanner::Families;

/// Find every IPv4 and IPv6 literal in `haystack`.
///
/// Returns byte ranges `[start, end)` in ascending, non-overlapping order.
/// This never fails: empty or binary input just yields no ranges.
///
/// # Example
///
/// ```
/// assert_eq!(ipsearch::find("1.1.1.1,2.2.2.2"), vec![0..7, 8..15]);
/// assert!(ipsearch::find("no addresses here").is_empty());
/// ```
#[must_use]
pub fn find<B: AsRef<[u8]> + ?Sized>(haystack: &B) -> Vec<Range<usize>> {
    Finder::default().find_iter(haystack.as_ref()).collect()
}

/// A reusable address finder.
///
/// A `Finder` holds nothing but its configuration, so it is cheap to copy and
/// safe to share between threads. Build one with [`FinderBuilder`] or use
/// [`Finder::default`] to search for both address families.
///
/// # Bytes vs. Strings
///
/// Haystacks are byte slices. Only ASCII digits, hex letters, `.` and `:`
/// mean anything to the scanner, so no UTF-8 validation is needed, and
/// ranges returned for a `&str` haystack always fall on char boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Finder {
    families: Families,
}

impl Default for Finder {
    fn default() -> Self {
        Finder {
            families: Families::ALL,
        }
    }
}

impl Finder {
    /// Find all addresses in a byte slice.
    ///
    /// Returns an iterator of byte ranges `[start, end)`, one per address, in
    /// the order they appear.
    ///
    /// # Example
    ///
    /// ```
    /// use ipsearch::Finder;
    ///
    /// let data = b"Log: 192.168.1.1 sent request to 8.8.8.8";
    /// let ips: Vec<&[u8]> = Finder::default()
    ///     .find_iter(data)
    ///     .map(|range| &data[range])
    ///     .collect();
    /// assert_eq!(ips, [&b"192.168.1.1"[..], &b"8.8.8.8"[..]]);
    /// ```
    #[inline]
    pub fn find_iter<'h>(
        &self,
        haystack: &'h [u8],
    ) -> impl Iterator<Item = Range<usize>> + 'h {
        self.matches(haystack).map(Range::<usize>::from)
    }

    /// Find all addresses in a byte slice, with their kind and decoded value.
    #[inline]
    pub fn matches<'h>(&self, haystack: &'h [u8]) -> Matches<'h> {
        Matches::new(haystack, self.families)
    }

    /// Whether IPv4 literals are reported.
    #[inline]
    #[must_use]
    pub fn ipv4(&self) -> bool {
        self.families.ipv4
    }

    /// Whether IPv6 literals are reported.
    #[inline]
    #[must_use]
    pub fn ipv6(&self) -> bool {
        self.families.ipv6
    }
}

/// A builder for configuring which addresses a [`Finder`] reports.
///
/// Both families are enabled by default.
///
/// # Example
///
/// ```
/// use ipsearch::FinderBuilder;
///
/// # fn main() -> anyhow::Result<()> {
/// let finder = FinderBuilder::new()
///     .ipv4(true)
///     .ipv6(false) // Only IPv4
///     .build()?;
/// assert_eq!(finder.find_iter(b"::1 and 1.2.3.4").count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FinderBuilder {
    include_ipv4: bool,
    include_ipv6: bool,
}

impl Default for FinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FinderBuilder {
    /// Create a new builder with both IPv4 and IPv6 enabled.
    pub fn new() -> Self {
        Self {
            include_ipv4: true,
            include_ipv6: true,
        }
    }

    /// Enable or disable IPv4 address extraction.
    ///
    /// Disabling IPv4 stops the scanner from anchoring on `.`; an IPv4 suffix
    /// embedded in an IPv6 literal such as `::ffff:10.0.0.1` is still part of
    /// that IPv6 match.
    ///
    /// Default: `true`
    pub fn ipv4(&mut self, include: bool) -> &mut Self {
        self.include_ipv4 = include;
        self
    }

    /// Enable or disable IPv6 address extraction.
    ///
    /// Default: `true`
    pub fn ipv6(&mut self, include: bool) -> &mut Self {
        self.include_ipv6 = include;
        self
    }

    /// Build a `Finder` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFamilies`] if neither IPv4 nor IPv6 is enabled.
    pub fn build(&self) -> Result<Finder> {
        if !self.include_ipv4 && !self.include_ipv6 {
            return Err(Error::NoFamilies);
        }
        debug!(
            ipv4 = self.include_ipv4,
            ipv6 = self.include_ipv6,
            "built address finder"
        );
        Ok(Finder {
            families: Families {
                ipv4: self.include_ipv4,
                ipv6: self.include_ipv6,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let finder = FinderBuilder::new().build().unwrap();
        assert!(finder.ipv4());
        assert!(finder.ipv6());
        assert_eq!(finder, Finder::default());
    }

    #[test]
    fn test_builder_requires_a_family() {
        let err = FinderBuilder::new().ipv4(false).ipv6(false).build();
        assert_eq!(err, Err(Error::NoFamilies));
        assert_eq!(
            Error::NoFamilies.to_string(),
            "no address family selected"
        );
    }

    #[test]
    fn test_find_accepts_str_and_bytes() {
        assert_eq!(find("140.82.121.4"), vec![0..12]);
        assert_eq!(find(b"140.82.121.4"), vec![0..12]);
        assert_eq!(find(&b"x 1.2.3.4".to_vec()), vec![2..9]);
    }

    #[test]
    fn test_find_iter_matches_find() {
        let data = b"a 1.2.3.4 b ::1 c 2001:db8::2 d";
        let ranges: Vec<_> = Finder::default().find_iter(data).collect();
        assert_eq!(ranges, find(data));
    }
}
