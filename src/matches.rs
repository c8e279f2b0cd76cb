use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use std::ops::Range;

/// Which validator accepted a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    /// A dotted-quad IPv4 literal.
    #[serde(rename = "ipv4")]
    V4,
    /// An IPv6 literal, possibly with `::` or an embedded IPv4 suffix.
    #[serde(rename = "ipv6")]
    V6,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::V4 => f.write_str("ipv4"),
            Kind::V6 => f.write_str("ipv6"),
        }
    }
}

/// An address found in a haystack.
///
/// A match does not borrow the haystack it came from. Use
/// [`Match::as_bytes`] or index the haystack with [`Match::range`] to get
/// the literal text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Byte range `[start, end)` of the literal in the haystack.
    range: Range<usize>,
    kind: Kind,
    /// The value the literal spells, with `::` expanded.
    #[serde(rename = "value")]
    addr: IpAddr,
}

impl Match {
    #[inline]
    pub(crate) fn new(range: Range<usize>, addr: IpAddr) -> Match {
        let kind = match addr {
            IpAddr::V4(_) => Kind::V4,
            IpAddr::V6(_) => Kind::V6,
        };
        Match { range, kind, addr }
    }

    /// Offset of the first byte of the literal.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Offset one past the last byte of the literal.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// The byte range `[start, end)` of the literal.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Whether the literal is IPv4 or IPv6.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The decoded address.
    ///
    /// Octets and groups are decoded exactly as lexed, so `010.1.1.1` decodes
    /// to `10.1.1.1` and `1.2.3.4567` matches and decodes as `1.2.3.45`.
    #[inline]
    #[must_use]
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Slice the literal out of the haystack this match was found in.
    ///
    /// # Panics
    ///
    /// Panics if `haystack` is shorter than the match's end, which can only
    /// happen when passing a different haystack than the one searched.
    #[inline]
    #[must_use]
    pub fn as_bytes<'h>(&self, haystack: &'h [u8]) -> &'h [u8] {
        &haystack[self.range()]
    }
}

impl From<Match> for Range<usize> {
    #[inline]
    fn from(m: Match) -> Range<usize> {
        m.range
    }
}
