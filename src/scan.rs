//! UTF-8 scanning and classification.
//!
//! This module walks a byte slice one scalar unit at a time and reports the
//! first malformed run as an exact `(offset, length)` pair. Accept/reject
//! decisions follow Table 3-7 of the Unicode Standard:
//!
//! | Scalar range       | Byte 1 | Byte 2 | Byte 3 | Byte 4 |
//! |--------------------|--------|--------|--------|--------|
//! | U+0000..U+007F     | 00..7F |        |        |        |
//! | U+0080..U+07FF     | C2..DF | 80..BF |        |        |
//! | U+0800..U+0FFF     | E0     | A0..BF | 80..BF |        |
//! | U+1000..U+CFFF     | E1..EC | 80..BF | 80..BF |        |
//! | U+D000..U+D7FF     | ED     | 80..9F | 80..BF |        |
//! | U+E000..U+FFFF     | EE..EF | 80..BF | 80..BF |        |
//! | U+10000..U+3FFFF   | F0     | 90..BF | 80..BF | 80..BF |
//! | U+40000..U+FFFFF   | F1..F3 | 80..BF | 80..BF | 80..BF |
//! | U+100000..U+10FFFF | F4     | 80..8F | 80..BF | 80..BF |
//!
//! As a consequence, the byte values C0-C1 and F5-FF never appear in
//! well-formed UTF-8.
//!
//! ## Run length reporting
//!
//! A malformed run is reported with the *expected* class length implied by
//! its leading byte (2, 3, or 4; 1 when the leading byte itself is invalid),
//! not the number of bytes actually present. A sequence truncated by the end
//! of input is classified exactly like a sequence with a bad continuation
//! byte. This lets [`crate::repair`](mod@crate::repair) consume a failed
//! multi-byte attempt as one unit instead of emitting a marker per leftover
//! byte; the repair side clamps consumption to the real input length.
//!
//! Input is length-delimited. A zero byte is ordinary data: valid ASCII on
//! its own, and rejected like any other non-continuation byte where a
//! continuation is required.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length class of a byte in lead position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadClass {
    /// Single-byte scalar, 0x00-0x7F.
    Ascii,
    /// Two-byte lead, 0xC0-0xDF.
    Lead2,
    /// Three-byte lead, 0xE0-0xEF.
    Lead3,
    /// Four-byte lead, 0xF0-0xF7.
    Lead4,
    /// A continuation byte (0x80-0xBF) or 0xF8-0xFF in lead position.
    Invalid,
}

impl LeadClass {
    /// Classify a byte by its high bits.
    ///
    /// Note that classification alone does not imply validity: C0-C1 classify
    /// as [`LeadClass::Lead2`] and F5-F7 as [`LeadClass::Lead4`] but are
    /// rejected by [`locate_invalid`] with their full class length.
    #[inline]
    pub fn of(byte: u8) -> Self {
        match byte {
            0x00..=0x7F => Self::Ascii,
            0x80..=0xBF => Self::Invalid,
            0xC0..=0xDF => Self::Lead2,
            0xE0..=0xEF => Self::Lead3,
            0xF0..=0xF7 => Self::Lead4,
            0xF8..=0xFF => Self::Invalid,
        }
    }

    /// Expected sequence width in bytes (1 for `Ascii` and `Invalid`).
    #[inline]
    pub fn width(self) -> usize {
        match self {
            Self::Ascii | Self::Invalid => 1,
            Self::Lead2 => 2,
            Self::Lead3 => 3,
            Self::Lead4 => 4,
        }
    }
}

/// The first malformed byte range found by [`locate_invalid`].
///
/// `length` is the expected class length implied by the leading byte, which
/// may extend past the end of the input for a truncated sequence (consumers
/// clamp; see the module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InvalidRun {
    /// Byte offset of the run's leading byte (0-indexed).
    pub offset: usize,
    /// Expected width of the run in bytes, in `1..=4`.
    pub length: usize,
}

impl fmt::Display for InvalidRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed UTF-8 run of {} byte(s) at offset {}",
            self.length, self.offset
        )
    }
}

/// Inclusive bounds for the second byte of a multi-byte sequence.
///
/// E0/ED narrow the range to exclude overlong encodings and surrogates;
/// F0/F4 narrow it to exclude overlongs and code points above U+10FFFF.
/// Every other lead takes the generic continuation range.
#[inline]
fn second_byte_bounds(lead: u8) -> (u8, u8) {
    match lead {
        0xE0 => (0xA0, 0xBF),
        0xED => (0x80, 0x9F),
        0xF0 => (0x90, 0xBF),
        0xF4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}

/// Check if a byte matches the generic continuation pattern `10xxxxxx`.
#[inline(always)]
fn is_continuation(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Find the first malformed run in `bytes`, or `None` if the input is
/// well-formed UTF-8.
///
/// # Examples
///
/// ```
/// use utf8_mend::{locate_invalid, InvalidRun};
///
/// assert_eq!(locate_invalid(b"Hello, world!"), None);
/// assert_eq!(locate_invalid("фыва".as_bytes()), None);
///
/// // Bare continuation byte: one-byte run.
/// assert_eq!(
///     locate_invalid(&[b'a', 0x80, b'b']),
///     Some(InvalidRun { offset: 1, length: 1 })
/// );
///
/// // Truncated two-byte sequence: reported with its full class length.
/// assert_eq!(
///     locate_invalid(&[0xC2]),
///     Some(InvalidRun { offset: 0, length: 2 })
/// );
/// ```
#[inline]
pub fn locate_invalid(bytes: &[u8]) -> Option<InvalidRun> {
    locate_invalid_from(bytes, 0)
}

/// Scan for the first malformed run at or after `start`.
///
/// `start` must lie on a scalar-unit boundary for the result to be
/// meaningful; [`crate::repair`](fn@crate::repair) maintains that by
/// resuming exactly where the previous run ended.
pub(crate) fn locate_invalid_from(bytes: &[u8], start: usize) -> Option<InvalidRun> {
    let len = bytes.len();
    let mut pos = start;

    while pos < len {
        let lead = bytes[pos];
        let width = match LeadClass::of(lead) {
            LeadClass::Ascii => {
                pos += 1;
                continue;
            }
            LeadClass::Invalid => {
                return Some(InvalidRun {
                    offset: pos,
                    length: 1,
                });
            }
            // C0 and C1 would encode code points below U+0080: overlong.
            LeadClass::Lead2 if lead < 0xC2 => {
                return Some(InvalidRun {
                    offset: pos,
                    length: 2,
                });
            }
            // F5-F7 would encode code points above U+10FFFF.
            LeadClass::Lead4 if lead > 0xF4 => {
                return Some(InvalidRun {
                    offset: pos,
                    length: 4,
                });
            }
            class => class.width(),
        };

        // Second byte, with the narrowed range where the lead requires one.
        // A missing byte (truncated input) fails the same way.
        let (lo, hi) = second_byte_bounds(lead);
        match bytes.get(pos + 1) {
            Some(&b) if b >= lo && b <= hi => {}
            _ => {
                return Some(InvalidRun {
                    offset: pos,
                    length: width,
                });
            }
        }

        // Remaining continuation bytes take the generic pattern.
        for i in 2..width {
            match bytes.get(pos + i) {
                Some(&b) if is_continuation(b) => {}
                _ => {
                    return Some(InvalidRun {
                        offset: pos,
                        length: width,
                    });
                }
            }
        }

        pos += width;
    }

    None
}

/// Check that `bytes` is well-formed UTF-8.
///
/// Agrees with `core::str::from_utf8` on every input.
///
/// # Examples
///
/// ```
/// use utf8_mend::is_valid;
///
/// assert!(is_valid(b"plain ascii"));
/// assert!(is_valid("日本語 🎉".as_bytes()));
/// assert!(!is_valid(&[0xC0, 0x80])); // overlong NUL
/// assert!(!is_valid(&[0xED, 0xA0, 0x80])); // surrogate
/// ```
#[inline]
pub fn is_valid(bytes: &[u8]) -> bool {
    locate_invalid(bytes).is_none()
}

/// Count scalar units structurally, by leading bytes alone.
///
/// Each step classifies the byte under the cursor and advances by the class
/// width (1 for ASCII and invalid leads), incrementing the count once.
/// Continuation bytes are *not* validated: this assumes well-formed input as
/// a precondition and may under- or over-count on malformed input. It is not
/// a validity oracle; use [`is_valid`] for that.
///
/// # Examples
///
/// ```
/// use utf8_mend::count_scalars;
///
/// assert_eq!(count_scalars(b""), 0);
/// assert_eq!(count_scalars(b"abc"), 3);
/// assert_eq!(count_scalars("фыва".as_bytes()), 4);
/// assert_eq!(count_scalars("a€🎉".as_bytes()), 3);
/// ```
pub fn count_scalars(bytes: &[u8]) -> usize {
    let mut pos = 0;
    let mut count = 0;
    while pos < bytes.len() {
        pos += LeadClass::of(bytes[pos]).width();
        count += 1;
    }
    count
}
