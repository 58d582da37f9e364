//! Narrow-scope case folding over UTF-8 bytes.
//!
//! [`to_lower`] and [`to_upper`] fold exactly two alphabets:
//!
//! - ASCII `A..Z` / `a..z`, by the usual 0x20 offset;
//! - the two-byte Cyrillic block with lead bytes `0xD0`/`0xD1`
//!   (U+0410..U+044F plus the Ё/ё pair, which crosses the lead-byte rows).
//!
//! ## Known limitation
//!
//! Everything else passes through byte-identical: accented Latin letters,
//! Greek, Cyrillic outside the basic rows, and all three- and four-byte
//! sequences. This asymmetry is deliberate and preserved from the reference
//! behavior; callers needing full Unicode case mapping should use a proper
//! case-mapping library instead.
//!
//! Folding assumes well-formed input. Malformed bytes are copied through
//! unchanged, and a `0xD0`/`0xD1` lead with nothing after it passes through
//! as-is.

use alloc::vec::Vec;

#[derive(Clone, Copy)]
enum Case {
    Lower,
    Upper,
}

/// Fold ASCII and basic Cyrillic letters to lowercase.
///
/// # Examples
///
/// ```
/// use utf8_mend::to_lower;
///
/// assert_eq!(to_lower(b"Hello"), b"hello");
/// assert_eq!(to_lower("ПрИвЕт".as_bytes()), "привет".as_bytes());
/// assert_eq!(to_lower("Ёлка".as_bytes()), "ёлка".as_bytes());
///
/// // Outside the folded scope: unchanged.
/// assert_eq!(to_lower("École 日本 🎉".as_bytes()), "École 日本 🎉".as_bytes());
/// ```
pub fn to_lower(bytes: &[u8]) -> Vec<u8> {
    fold(bytes, Case::Lower)
}

/// Fold ASCII and basic Cyrillic letters to uppercase.
///
/// # Examples
///
/// ```
/// use utf8_mend::to_upper;
///
/// assert_eq!(to_upper(b"Hello"), b"HELLO");
/// assert_eq!(to_upper("привет".as_bytes()), "ПРИВЕТ".as_bytes());
/// assert_eq!(to_upper("ёж".as_bytes()), "ЁЖ".as_bytes());
/// ```
pub fn to_upper(bytes: &[u8]) -> Vec<u8> {
    fold(bytes, Case::Upper)
}

fn fold(bytes: &[u8], case: Case) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        match (byte, case) {
            (b'A'..=b'Z', Case::Lower) => {
                out.push(byte + 0x20);
                pos += 1;
            }
            (b'a'..=b'z', Case::Upper) => {
                out.push(byte - 0x20);
                pos += 1;
            }
            (0xD0 | 0xD1, _) if pos + 1 < bytes.len() => {
                let (lead, second) = match case {
                    Case::Lower => lower_pair(byte, bytes[pos + 1]),
                    Case::Upper => upper_pair(byte, bytes[pos + 1]),
                };
                out.push(lead);
                out.push(second);
                pos += 2;
            }
            _ => {
                out.push(byte);
                pos += 1;
            }
        }
    }

    out
}

/// Map one Cyrillic two-byte pair to lowercase, or return it unchanged.
///
/// The uppercase rows are `D0 90..9F` (А..П) and `D0 A0..AF` (Р..Я); the
/// second row crosses into the `D1` lead when lowered. Ё is the lone letter
/// outside the rows.
#[inline]
fn lower_pair(lead: u8, second: u8) -> (u8, u8) {
    match (lead, second) {
        (0xD0, 0x81) => (0xD1, 0x91),                 // Ё -> ё
        (0xD0, 0x90..=0x9F) => (0xD0, second + 0x20), // А..П -> а..п
        (0xD0, 0xA0..=0xAF) => (0xD1, second - 0x20), // Р..Я -> р..я
        _ => (lead, second),
    }
}

/// Inverse of [`lower_pair`].
#[inline]
fn upper_pair(lead: u8, second: u8) -> (u8, u8) {
    match (lead, second) {
        (0xD1, 0x91) => (0xD0, 0x81),                 // ё -> Ё
        (0xD0, 0xB0..=0xBF) => (0xD0, second - 0x20), // а..п -> А..П
        (0xD1, 0x80..=0x8F) => (0xD0, second + 0x20), // р..я -> Р..Я
        _ => (lead, second),
    }
}
