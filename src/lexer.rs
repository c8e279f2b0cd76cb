//! Numeric run lexers shared by the address validators.
//!
//! Both lexers clamp instead of rejecting: once the accumulated value would
//! exceed the per-unit maximum, lexing stops *before* the offending digit and
//! the run consumed so far is still reported as a success. This is what lets
//! `1.2.3.4567` match as `1.2.3.45` and leaves the remaining digits outside
//! the address.

/// A lexed run of digits starting at some offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Run<T> {
    /// Number of bytes consumed.
    pub(crate) len: usize,
    /// Accumulated numeric value of the consumed bytes.
    pub(crate) value: T,
}

#[inline(always)]
pub(crate) fn is_dec(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline(always)]
pub(crate) fn is_hex(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline(always)]
fn hex_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

/// Lex a decimal run at `text[pos..]`, clamped to 255.
///
/// Returns `None` if there is no digit at `pos`.
#[inline]
pub(crate) fn decimal_run(text: &[u8], pos: usize) -> Option<Run<u8>> {
    let mut value = 0u32;
    let mut len = 0;
    while let Some(&b) = text.get(pos + len) {
        if !is_dec(b) {
            break;
        }
        let next = value * 10 + u32::from(b - b'0');
        if next > 0xFF {
            break;
        }
        value = next;
        len += 1;
    }
    if len == 0 {
        return None;
    }
    Some(Run {
        len,
        value: value as u8,
    })
}

/// Lex a hexadecimal run at `text[pos..]`, clamped to 65535.
///
/// Returns `None` if there is no hex digit at `pos`.
#[inline]
pub(crate) fn hex_run(text: &[u8], pos: usize) -> Option<Run<u16>> {
    let mut value = 0u32;
    let mut len = 0;
    while let Some(digit) = text.get(pos + len).and_then(|&b| hex_value(b)) {
        let next = value * 16 + digit;
        if next > 0xFFFF {
            break;
        }
        value = next;
        len += 1;
    }
    if len == 0 {
        return None;
    }
    Some(Run {
        len,
        value: value as u16,
    })
}
