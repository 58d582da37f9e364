//! Repair of malformed UTF-8 by marker substitution.
//!
//! [`repair`] walks the input with the scanner from [`crate::scan`], copies
//! well-formed spans verbatim, and substitutes a caller-supplied marker for
//! each malformed run. Adjacent or overlapping runs each receive their own
//! marker instance; consecutive markers are never coalesced.
//!
//! The scanner reports a run with the full class length implied by its
//! leading byte, even when the input ends early, so a truncated trailing
//! sequence becomes exactly one marker. The cursor advance is clamped to the
//! input length so that case never reads past the end.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::scan::locate_invalid_from;

/// Replace every malformed run in `bytes` with `replacement`.
///
/// Well-formed input is returned as `Cow::Borrowed` without allocating.
/// Otherwise a fresh buffer is built by appending valid spans and one
/// `replacement` per run; the input is never mutated. An empty replacement
/// simply drops the malformed runs.
///
/// The output is well-formed whenever `replacement` is.
///
/// # Examples
///
/// ```
/// use utf8_mend::repair;
///
/// assert_eq!(repair(b"1\xFF34", b"*").as_ref(), b"1*34");
///
/// // A lone truncated lead becomes a single marker.
/// assert_eq!(repair(&[0xC2], b"*").as_ref(), b"*");
///
/// // Valid input comes back borrowed and unchanged.
/// let fixed = repair("все хорошо".as_bytes(), b"*");
/// assert!(matches!(fixed, std::borrow::Cow::Borrowed(_)));
/// ```
pub fn repair<'a>(bytes: &'a [u8], replacement: &[u8]) -> Cow<'a, [u8]> {
    let first = match locate_invalid_from(bytes, 0) {
        None => return Cow::Borrowed(bytes),
        Some(run) => run,
    };

    let mut out = Vec::with_capacity(bytes.len() + replacement.len());
    let mut cursor = 0;
    let mut next = Some(first);

    while let Some(run) = next {
        out.extend_from_slice(&bytes[cursor..run.offset]);
        out.extend_from_slice(replacement);

        // The reported length may extend past the end for a truncated
        // trailing sequence; clamp before resuming the scan.
        cursor = usize::min(run.offset + run.length, bytes.len());
        next = if cursor < bytes.len() {
            locate_invalid_from(bytes, cursor)
        } else {
            None
        };
    }

    out.extend_from_slice(&bytes[cursor..]);
    Cow::Owned(out)
}
