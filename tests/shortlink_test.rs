// ABOUTME: Property tests for the base62 short link codec
// ABOUTME: Round-trip coverage over the full documented id range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

#![allow(missing_docs, clippy::unwrap_used)]

use foodgram_api::shortlink::{
    decode, decode_short_code, encode, encode_short_code, ShortLinkError,
};

#[test]
fn round_trip_holds_over_documented_range() {
    for n in 0..=10_000_000u64 {
        assert_eq!(decode(&encode(n)), Ok(n));
    }
}

#[test]
fn encode_zero_is_single_first_symbol() {
    let encoded = encode(0);
    assert_eq!(encoded.len(), 1);
    assert_eq!(encoded, "0");
}

#[test]
fn decode_rejects_out_of_alphabet_characters() {
    for input in ["abc$", "-1", "12 3", "naïve"] {
        match decode(input) {
            Err(ShortLinkError::InvalidCharacter(_)) => {}
            other => panic!("expected invalid character error for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn codes_grow_monotonically_in_length() {
    // 62^k boundaries each add one symbol
    assert_eq!(encode(61).len(), 1);
    assert_eq!(encode(62).len(), 2);
    assert_eq!(encode(62 * 62 - 1).len(), 2);
    assert_eq!(encode(62 * 62).len(), 3);
}

#[test]
fn prefixed_codes_round_trip() {
    for n in [0u64, 1, 42, 9999, 10_000_000] {
        let code = encode_short_code(n);
        assert!(code.starts_with("r-"), "code {code:?} lacks prefix");
        assert_eq!(decode_short_code(&code), Ok(n));
    }
}

#[test]
fn distinct_ids_yield_distinct_codes() {
    use std::collections::HashSet;

    let codes: HashSet<String> = (0..10_000u64).map(encode).collect();
    assert_eq!(codes.len(), 10_000);
}
