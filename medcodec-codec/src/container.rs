// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The on-disk container format and the top-level `encode`/`decode` entry
//! points that chain plane-splitting, prediction, RLE, and arithmetic coding
//! together.
//!
//! Layout, all fields little-endian regardless of host byte order:
//!
//! | offset | field            | type |
//! |-------:|------------------|------|
//! |      0 | width            | u32  |
//! |      4 | height           | u32  |
//! |      8 | channels         | u32  |
//! |     12 | residual_bytes   | u64  |
//! |     20 | rle_bytes        | u64  |
//! |     28 | arith_bytes      | u64  |
//! |     36 | arithmetic payload, `arith_bytes` long |

use log::{debug, warn};
use medcodec_core::errors::{image_decode_error, invalid_dimensions_error, Result};
use medcodec_core::io::{ByteReader, WriteBytesLe};

use crate::arith::{ArithmeticDecoder, ArithmeticEncoder};
use crate::model::Model;
use crate::planes;
use crate::predictor;
use crate::rle;

const CHANNELS: u32 = 3;
const HEADER_LEN: usize = 36;

/// Compresses an interleaved RGB8 image (`rgb.len() == 3 * width * height`)
/// into the container format described in the module docs.
pub fn encode(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return invalid_dimensions_error(width, height);
    }
    if rgb.len() != 3 * width as usize * height as usize {
        return image_decode_error(format!(
            "expected {} bytes of RGB8 data for a {}x{} image, got {}",
            3 * width as usize * height as usize,
            width,
            height,
            rgb.len()
        ));
    }

    let (w, h) = (width as usize, height as usize);
    let planes = planes::split(rgb, w, h);

    let mut residual = Vec::with_capacity(rgb.len());
    for plane in &planes {
        residual.extend(predictor::forward(plane, w, h));
    }
    debug!("container: predicted {} residual bytes", residual.len());

    let rle_bytes = rle::encode(&residual);
    debug!("container: rle packed into {} bytes", rle_bytes.len());

    let mut model = Model::new();
    let mut encoder = ArithmeticEncoder::new();
    for &byte in &rle_bytes {
        encoder.encode(&mut model, byte);
    }
    let arith_payload = encoder.finish();
    debug!("container: arithmetic coded into {} bytes", arith_payload.len());

    let mut out = Vec::with_capacity(HEADER_LEN + arith_payload.len());
    out.write_u32_le(width);
    out.write_u32_le(height);
    out.write_u32_le(CHANNELS);
    out.write_u64_le(residual.len() as u64);
    out.write_u64_le(rle_bytes.len() as u64);
    out.write_u64_le(arith_payload.len() as u64);
    out.extend_from_slice(&arith_payload);

    Ok(out)
}

/// Decompresses a container produced by [`encode`] back into an interleaved
/// RGB8 buffer, returning it along with the image's width and height.
pub fn decode(data: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let mut reader = ByteReader::new(data);

    let width = reader.read_u32_le()?;
    let height = reader.read_u32_le()?;
    let channels = reader.read_u32_le()?;
    let residual_bytes = reader.read_u64_le()? as usize;
    let rle_bytes = reader.read_u64_le()? as usize;
    let arith_bytes = reader.read_u64_le()? as usize;

    if width == 0 || height == 0 {
        return invalid_dimensions_error(width, height);
    }
    if channels != CHANNELS {
        return image_decode_error(format!("unsupported channel count {}", channels));
    }

    let arith_payload = reader.read_slice(arith_bytes)?;

    let mut model = Model::new();
    let mut decoder = ArithmeticDecoder::new(arith_payload);
    let mut rle_packed = Vec::with_capacity(rle_bytes);
    for _ in 0..rle_bytes {
        rle_packed.push(decoder.decode(&mut model)?);
    }

    let residual = rle::decode(&rle_packed, residual_bytes)?;

    let (w, h) = (width as usize, height as usize);
    let plane_len = w * h;
    if residual.len() != 3 * plane_len {
        return medcodec_core::errors::size_mismatch_error(3 * plane_len, residual.len());
    }

    let mut planes = [Vec::new(), Vec::new(), Vec::new()];
    for (i, plane) in planes.iter_mut().enumerate() {
        let chunk = &residual[i * plane_len..(i + 1) * plane_len];
        *plane = predictor::inverse(chunk, w, h);
    }

    let rgb = planes::join(&planes, w, h);
    if reader.remaining() > 0 {
        warn!("container: {} trailing bytes after arithmetic payload", reader.remaining());
    }

    Ok((rgb, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgb(width: u32, height: u32, r: u8, g: u8, b: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 * width as usize * height as usize);
        for _ in 0..(width as usize * height as usize) {
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    #[test]
    fn round_trips_a_solid_color_image() {
        let rgb = solid_rgb(4, 3, 10, 20, 30);
        let packed = encode(&rgb, 4, 3).unwrap();
        let (decoded, w, h) = decode(&packed).unwrap();
        assert_eq!((w, h), (4, 3));
        assert_eq!(decoded, rgb);
    }

    #[test]
    fn round_trips_an_arbitrary_image() {
        let width = 37u32;
        let height = 23u32;
        let rgb: Vec<u8> = (0..3 * width as usize * height as usize)
            .map(|i| ((i * 113 + 7) % 256) as u8)
            .collect();
        let packed = encode(&rgb, width, height).unwrap();
        let (decoded, w, h) = decode(&packed).unwrap();
        assert_eq!((w, h), (width, height));
        assert_eq!(decoded, rgb);
    }

    #[test]
    fn header_round_trips_its_length_fields() {
        let rgb = solid_rgb(640, 480, 0, 0, 0);
        let packed = encode(&rgb, 640, 480).unwrap();

        let mut reader = ByteReader::new(&packed);
        assert_eq!(reader.read_u32_le().unwrap(), 640);
        assert_eq!(reader.read_u32_le().unwrap(), 480);
        assert_eq!(reader.read_u32_le().unwrap(), 3);
        let residual_bytes = reader.read_u64_le().unwrap();
        assert_eq!(residual_bytes, 3 * 640 * 480);
        let rle_bytes = reader.read_u64_le().unwrap();
        let arith_bytes = reader.read_u64_le().unwrap();
        assert_eq!(reader.remaining(), arith_bytes as usize);
        // An all-black image is one giant run per plane: two bytes of RLE
        // per plane once it's past the first pixel's residual.
        assert!(rle_bytes < residual_bytes);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(encode(&[], 0, 10).is_err());
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(encode(&[], 10, 0).is_err());
    }

    #[test]
    fn mismatched_buffer_length_is_rejected() {
        assert!(encode(&[0, 0, 0], 2, 2).is_err());
    }

    #[test]
    fn truncated_container_is_rejected() {
        let rgb = solid_rgb(2, 2, 1, 2, 3);
        let mut packed = encode(&rgb, 2, 2).unwrap();
        packed.truncate(10);
        assert!(decode(&packed).is_err());
    }
}
