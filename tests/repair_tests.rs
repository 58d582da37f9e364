//! End-to-end tests for scanning, repair, counting, and folding.

use std::borrow::Cow;

use utf8_mend::{count_scalars, is_valid, locate_invalid, repair, to_lower, to_upper, InvalidRun};

// ============================================================================
// Literal repair scenarios
// ============================================================================

#[test]
fn test_single_bad_byte_between_ascii() {
    assert_eq!(repair(b"1\xFF34", b"*").as_ref(), b"1*34");
}

#[test]
fn test_corrupted_cyrillic_scalar() {
    // "фЫваолдж" with the second byte of Ы forced to ASCII range.
    let mut input = "фЫваолдж".as_bytes().to_vec();
    input[3] = 0x7F;
    let fixed = repair(&input, b"*").into_owned();
    let expected: Vec<u8> =
        ["ф".as_bytes(), &b"*"[..], "ваолдж".as_bytes()].concat();
    assert_eq!(fixed, expected);
}

#[test]
fn test_lone_truncated_two_byte_lead() {
    assert_eq!(repair(&[0xC2], b"*").as_ref(), b"*");
}

#[test]
fn test_truncated_four_byte_sequence_single_marker() {
    // Four-byte lead, two valid continuations, then end of input: one marker.
    assert_eq!(repair(&[0xF0, 0x90, 0x80], b"*").as_ref(), b"*");
}

#[test]
fn test_many_runs_with_interleaved_text() {
    let input = b"a\xFFb\xC0\x80c\xF5\x80\x80\x80d";
    let fixed = repair(input, b"<?>").into_owned();
    // 0xFF is a one-byte run, C0 80 a two-byte run, and F5 80 80 80 a
    // four-byte run (F5 is rejected with its full class length).
    assert!(is_valid(&fixed));
    assert_eq!(fixed, b"a<?>b<?>c<?>d".to_vec());
}

// ============================================================================
// Repair contract
// ============================================================================

#[test]
fn test_noop_on_valid_input_is_borrowed() {
    let input = "valid: фыва 日本 🎉".as_bytes();
    match repair(input, b"*") {
        Cow::Borrowed(b) => assert_eq!(b, input),
        Cow::Owned(_) => panic!("valid input must not allocate"),
    }
}

#[test]
fn test_idempotent_with_ascii_replacement() {
    let inputs: &[&[u8]] = &[
        b"1\xFF34",
        &[0xC2],
        &[0xF0, 0x90, 0x80],
        b"\x80\x80\x80",
        b"mid\xED\xA0\x80dle",
    ];
    for input in inputs {
        let once = repair(input, b"*").into_owned();
        let twice = repair(&once, b"*").into_owned();
        assert_eq!(once, twice, "{input:02X?}");
    }
}

#[test]
fn test_replacement_instances_not_coalesced() {
    assert_eq!(repair(&[0xFF, 0xFF], b"*").as_ref(), b"**");
    assert_eq!(repair(&[0x80, 0x80, 0x80], b"!").as_ref(), b"!!!");
}

#[test]
fn test_empty_input_and_empty_replacement() {
    assert_eq!(repair(b"", b"*").as_ref(), b"");
    assert_eq!(repair(b"\xFF", b"").as_ref(), b"");
}

// ============================================================================
// Zero bytes are data (length-delimited contract)
// ============================================================================

#[test]
fn test_zero_byte_is_valid_ascii() {
    assert!(is_valid(b"a\x00b"));
    assert_eq!(count_scalars(b"a\x00b"), 3);
    assert_eq!(repair(b"a\x00b", b"*").as_ref(), b"a\x00b");
}

#[test]
fn test_zero_byte_rejected_as_continuation() {
    assert_eq!(
        locate_invalid(&[0xD0, 0x00]),
        Some(InvalidRun {
            offset: 0,
            length: 2
        })
    );
}

// ============================================================================
// Scanner position reporting
// ============================================================================

#[test]
fn test_offset_is_run_start_not_failing_byte() {
    // The third byte of the sequence is bad, but the run starts at the lead.
    assert_eq!(
        locate_invalid(b"xy\xE0\xA0\x41z"),
        Some(InvalidRun {
            offset: 2,
            length: 3
        })
    );
}

#[test]
fn test_single_byte_corruption_is_detectable() {
    // Flip each byte of a well-formed multi-byte scalar out of range.
    let samples = ["д", "€", "𐍈"];
    for s in samples {
        let clean = s.as_bytes();
        for i in 0..clean.len() {
            let mut corrupted = clean.to_vec();
            corrupted[i] = if i == 0 { 0xFF } else { 0x7F };
            assert!(!is_valid(&corrupted), "{s} byte {i}");
        }
    }
}

// ============================================================================
// Counting and folding across operations
// ============================================================================

#[test]
fn test_count_monotonicity() {
    let samples = ["", "ascii", "фыва", "日本語", "🎉🚀", "mix Ё 日 🎉"];
    for s in samples {
        let n = count_scalars(s.as_bytes());
        assert!(n <= s.len(), "{s}");
        if !s.is_empty() && s.is_ascii() {
            assert_eq!(n, s.len(), "{s}");
        }
    }
}

#[test]
fn test_fold_after_repair() {
    // Repair then fold: markers are ASCII and fold like any other letter.
    let input = b"Hello \xFF\xC0\x80 WORLD";
    let fixed = repair(input, b"X").into_owned();
    assert_eq!(to_lower(&fixed), b"hello xx world".to_vec());
}

#[test]
fn test_fold_round_trip_mixed_scripts() {
    let s = "Hello ПрИвЕт Ёжик café 日本 🎉";
    let bytes = s.as_bytes();
    assert_eq!(to_upper(&to_lower(bytes)), to_upper(bytes));
    assert_eq!(to_lower(&to_upper(bytes)), to_lower(bytes));
    assert!(is_valid(&to_lower(bytes)));
    assert!(is_valid(&to_upper(bytes)));
}

// ============================================================================
// Agreement with the standard library
// ============================================================================

#[test]
fn test_validity_agrees_with_std_on_corpus() {
    let mut corpus: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"plain".to_vec(),
        "фЫваолдж".as_bytes().to_vec(),
        "_ह_€_한_".as_bytes().to_vec(),
        "_𐍈_𐍈_😁_".as_bytes().to_vec(),
    ];
    // Every single-byte corruption of the multi-byte samples.
    for base in corpus.clone() {
        for i in 0..base.len() {
            for bad in [0x00, 0x7F, 0x80, 0xC1, 0xE0, 0xF5, 0xFF] {
                let mut v = base.clone();
                v[i] = bad;
                corpus.push(v);
            }
        }
    }
    for bytes in &corpus {
        assert_eq!(
            is_valid(bytes),
            std::str::from_utf8(bytes).is_ok(),
            "{bytes:02X?}"
        );
    }
}
