//! # utf8-mend
//!
//! Validation, repair, measurement, and narrow case folding for byte
//! sequences expected to encode UTF-8 text.
//!
//! The core is a scanner that walks a byte slice one scalar unit at a time,
//! classifies each leading byte into a sequence-length class, validates
//! continuation bytes against both the generic `10xxxxxx` pattern and the
//! narrowed ranges of Unicode Table 3-7 (the C2 floor, the E0/ED and F0/F4
//! second-byte narrowings, the F4 ceiling), and reports the first malformed
//! run as an exact `(offset, length)` pair. Repair, validity checking, and
//! scalar counting are layered on top.
//!
//! ## Operations
//!
//! - [`locate_invalid`] - first malformed run, or `None`
//! - [`is_valid`] - well-formedness check, agrees with `core::str::from_utf8`
//! - [`repair`](fn@repair) - splice a marker over every malformed run
//! - [`count_scalars`] - structural scalar count by leading bytes
//! - [`to_lower`] / [`to_upper`] - ASCII + basic Cyrillic case folding
//!
//! ## Quick Start
//!
//! ```
//! use utf8_mend::{is_valid, locate_invalid, repair};
//!
//! assert!(is_valid("съешь ещё этих мягких булок".as_bytes()));
//!
//! let broken = b"1\xFF34";
//! let run = locate_invalid(broken).unwrap();
//! assert_eq!((run.offset, run.length), (1, 1));
//!
//! assert_eq!(repair(broken, b"*").as_ref(), b"1*34");
//! ```
//!
//! ## Features
//!
//! - `std` (default) - standard library; disable for `no_std` + `alloc`
//! - `serde` - serialization support for [`InvalidRun`]
//! - `cli` - the `utf8mend` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Leading-byte classification and the malformed-run scanner.
pub mod scan;

/// Marker substitution over malformed runs.
pub mod repair;

/// ASCII and basic-Cyrillic case folding.
pub mod fold;

// Re-export the public operations at the crate root
pub use fold::{to_lower, to_upper};
pub use repair::repair;
pub use scan::{count_scalars, is_valid, locate_invalid, InvalidRun, LeadClass};
