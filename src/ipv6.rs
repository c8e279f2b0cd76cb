use std::net::Ipv6Addr;

use crate::ipv4;
use crate::lexer::{hex_run, is_hex};

/// Bytes in an IPv6 address.
const IPV6_LEN: usize = 16;
/// Bytes covered by an embedded IPv4 suffix.
const IPV4_LEN: usize = 4;

/// What the group loop consumed last, so a dangling separator can be given back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trailing {
    /// A hex group or nothing.
    Group,
    /// A single `:` separator.
    Colon,
    /// A `::` compression.
    Ellipsis,
}

/// Scan state for one IPv6 candidate.
///
/// `filled` counts address bytes (two per group, four for an embedded IPv4),
/// `ellipsis` holds the byte position of the `::` if one has been seen.
struct Candidate<'a> {
    text: &'a [u8],
    cur: usize,
    filled: usize,
    ellipsis: Option<usize>,
    trailing: Trailing,
    words: [u16; 8],
}

impl<'a> Candidate<'a> {
    fn new(text: &'a [u8], pos: usize) -> Candidate<'a> {
        Candidate {
            text,
            cur: pos,
            filled: 0,
            ellipsis: None,
            trailing: Trailing::Group,
            words: [0; 8],
        }
    }

    #[inline(always)]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.text.get(self.cur + offset).copied()
    }

    #[inline(always)]
    fn exhausted(&self) -> bool {
        self.cur >= self.text.len()
    }

    /// Consume a leading `::`. Returns `true` if the address is just `::`.
    fn leading_ellipsis(&mut self) -> bool {
        if self.peek(0) != Some(b':') || self.peek(1) != Some(b':') {
            return false;
        }
        self.ellipsis = Some(0);
        self.trailing = Trailing::Ellipsis;
        self.cur += 2;
        !self.peek(0).is_some_and(is_hex)
    }

    /// Run the group loop. Returns `None` if the candidate is rejected outright.
    fn groups(&mut self) -> Option<()> {
        while self.filled < IPV6_LEN {
            let Some(run) = hex_run(self.text, self.cur) else {
                // "1:2::3:xxxxx" stops before the dangling colon. A trailing
                // "::" is never split: "1::x" yields "1::", not "1:", so the
                // span stays a valid literal ("2001:db8::" is complete).
                if self.trailing == Trailing::Colon {
                    self.cur -= 1;
                }
                break;
            };

            if self.text.get(self.cur + run.len) == Some(&b'.') {
                // Embedded IPv4 goes in the last 32 bits unless "::" let it float.
                if self.ellipsis.is_none() && self.filled != IPV6_LEN - IPV4_LEN {
                    return None;
                }
                let (len, v4) = ipv4::validate(self.text, self.cur)?;
                let [a, b, c, d] = v4.octets();
                self.words[self.filled / 2] = u16::from_be_bytes([a, b]);
                self.words[self.filled / 2 + 1] = u16::from_be_bytes([c, d]);
                self.filled += IPV4_LEN;
                self.cur += len;
                self.trailing = Trailing::Group;
                break;
            }

            self.words[self.filled / 2] = run.value;
            self.cur += run.len;
            self.filled += 2;
            self.trailing = Trailing::Group;

            if self.exhausted()
                || self.filled == IPV6_LEN
                || (self.ellipsis.is_some() && self.filled == IPV6_LEN - 2)
            {
                break;
            }

            // A separator needs something after it to be worth consuming.
            if self.peek(0) != Some(b':') || self.peek(1).is_none() {
                break;
            }
            self.cur += 1;
            self.trailing = Trailing::Colon;

            if self.peek(0) == Some(b':') {
                if self.ellipsis.is_some() {
                    // Second "::", the address ends before it ("1::1::1").
                    self.cur -= 1;
                    self.trailing = Trailing::Group;
                    break;
                }
                self.ellipsis = Some(self.filled);
                self.cur += 1;
                self.trailing = Trailing::Ellipsis;
                if self.exhausted() || self.filled == IPV6_LEN - 2 {
                    break;
                }
            }
        }
        Some(())
    }

    /// Expand the `::` into zero groups and build the address.
    fn finish(mut self) -> Ipv6Addr {
        if let Some(at) = self.ellipsis {
            let (head, tail) = (at / 2, self.filled / 2);
            let shift = (IPV6_LEN - self.filled) / 2;
            self.words.copy_within(head..tail, head + shift);
            self.words[head..head + shift].fill(0);
        }
        Ipv6Addr::from(self.words)
    }
}

/// Validate an IPv6 literal at `text[pos..]`.
///
/// Returns the number of bytes belonging to the address and its decoded
/// value. Like the IPv4 validator this accepts a valid prefix and ignores
/// whatever follows it.
pub(crate) fn validate(text: &[u8], pos: usize) -> Option<(usize, Ipv6Addr)> {
    let mut cand = Candidate::new(text, pos);
    if cand.leading_ellipsis() {
        return Some((2, Ipv6Addr::UNSPECIFIED));
    }
    cand.groups()?;

    if cand.filled < IPV6_LEN && cand.ellipsis.is_none() {
        return None;
    }
    let len = cand.cur - pos;
    Some((len, cand.finish()))
}

/// Check whether `text` starts with an IPv6 literal.
///
/// Returns the number of bytes the address occupies. At most one `::` is
/// accepted, and an embedded IPv4 suffix must either follow six groups or
/// come after a `::`.
///
/// # Example
///
/// ```
/// use ipsearch::check_ipv6;
///
/// assert_eq!(check_ipv6(b"2a02:6b8:a::a"), Some(13));
/// assert_eq!(check_ipv6(b"::ffff:192.168.1.1"), Some(18));
/// assert_eq!(check_ipv6(b"1:2::3:xxxxx"), Some(6));
/// assert_eq!(check_ipv6(b"1:2:3"), None);
/// ```
#[inline]
pub fn check_ipv6(text: &[u8]) -> Option<usize> {
    validate(text, 0).map(|(len, _)| len)
}
