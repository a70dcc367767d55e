// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A byte-level run-length transform applied to the concatenated residual
//! planes before arithmetic coding. Each run of identical bytes becomes a
//! `(count, value)` pair; runs longer than 255 bytes are split across
//! multiple pairs so that `count` always fits in a `u8`.

use log::trace;
use medcodec_core::errors::{size_mismatch_error, Result};

const MAX_RUN: usize = 255;

/// Encodes `data` as a sequence of `(count, value)` pairs. `count` is
/// always in `1..=255` and the output is always an even number of bytes.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        let value = data[i];
        let mut run = 1;
        while run < MAX_RUN && i + run < data.len() && data[i + run] == value {
            run += 1;
        }
        out.push(run as u8);
        out.push(value);
        i += run;
    }

    trace!("rle: encoded {} bytes into {} bytes ({} pairs)", data.len(), out.len(), out.len() / 2);
    out
}

/// Decodes a `(count, value)` pair stream produced by [`encode`], expanding
/// pairs until exactly `expected_len` bytes have been produced.
///
/// A `data` buffer that runs out of complete pairs before `expected_len`
/// bytes have been emitted — whether because it was truncated to an odd
/// length or because the pairs simply don't add up to enough bytes —
/// is reported as [`medcodec_core::errors::CodecError::SizeMismatch`]
/// rather than silently zero-filled: the container always records the
/// exact expected length, so a well-formed stream never exercises this
/// path.
pub fn decode(data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(expected_len);
    let mut i = 0;

    while out.len() < expected_len && i + 1 < data.len() {
        let count = data[i] as usize;
        let value = data[i + 1];
        out.extend(std::iter::repeat(value).take(count));
        i += 2;
    }

    out.truncate(expected_len);

    if out.len() != expected_len {
        return size_mismatch_error(expected_len, out.len());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_data() {
        let data: Vec<u8> = (0..1000).map(|i| ((i / 13) % 7) as u8).collect();
        let encoded = encode(&data);
        assert_eq!(encoded.len() % 2, 0);
        assert_eq!(decode(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn splits_runs_longer_than_255() {
        let data = vec![9u8; 600];
        let encoded = encode(&data);
        // ceil(600 / 255) == 3 pairs.
        assert_eq!(encoded.len(), 6);
        assert_eq!(encoded, vec![255, 9, 255, 9, 90, 9]);
        assert_eq!(decode(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn never_emits_a_zero_count() {
        let data: Vec<u8> = (0..50).collect();
        let encoded = encode(&data);
        for pair in encoded.chunks(2) {
            assert_ne!(pair[0], 0);
        }
    }

    #[test]
    fn matches_worked_example_s1() {
        // residual bytes for scenario S1: [255, 0, 0, 0, 0, 0]
        let residual = [255u8, 0, 0, 0, 0, 0];
        let encoded = encode(&residual);
        assert_eq!(encoded, vec![1, 255, 5, 0]);
        assert_eq!(decode(&encoded, residual.len()).unwrap(), residual);
    }

    #[test]
    fn truncated_stream_is_a_size_mismatch() {
        let data = vec![5u8; 10];
        let mut encoded = encode(&data);
        encoded.truncate(1); // odd length, no complete pairs
        assert!(decode(&encoded, data.len()).is_err());
    }

    #[test]
    fn empty_input_round_trips() {
        let encoded = encode(&[]);
        assert!(encoded.is_empty());
        assert_eq!(decode(&encoded, 0).unwrap(), Vec::<u8>::new());
    }
}
