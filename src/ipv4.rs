use std::net::Ipv4Addr;

use crate::lexer::decimal_run;

/// Validate a dotted-quad at `text[pos..]`.
///
/// Returns the number of bytes belonging to the address and its decoded
/// value. Anything after the fourth octet is ignored: `1.2.3.4.5` validates
/// as `1.2.3.4` with 7 bytes consumed.
#[inline]
pub(crate) fn validate(text: &[u8], pos: usize) -> Option<(usize, Ipv4Addr)> {
    let mut octets = [0u8; 4];
    let mut cur = pos;
    for (slot, octet) in octets.iter_mut().enumerate() {
        if slot > 0 {
            if text.get(cur) != Some(&b'.') {
                return None;
            }
            cur += 1;
        }
        let run = decimal_run(text, cur)?;
        *octet = run.value;
        cur += run.len;
    }
    Some((cur - pos, Ipv4Addr::from(octets)))
}

/// Check whether `text` starts with an IPv4 literal.
///
/// Returns the number of bytes the address occupies. Octets are lexed with
/// overflow clamping, so a too-long final octet is truncated rather than
/// rejected.
///
/// # Example
///
/// ```
/// use ipsearch::check_ipv4;
///
/// assert_eq!(check_ipv4(b"192.168.1.1 port 22"), Some(11));
/// assert_eq!(check_ipv4(b"1.2.3.4567"), Some(8));
/// assert_eq!(check_ipv4(b"1.2.3"), None);
/// ```
#[inline]
pub fn check_ipv4(text: &[u8]) -> Option<usize> {
    validate(text, 0).map(|(len, _)| len)
}
