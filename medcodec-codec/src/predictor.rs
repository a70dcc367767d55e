// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The LOCO-I (Median Edge Detector) predictor used by JPEG-LS. Given the
//! left, top, and top-left neighbors of a sample, it picks between a
//! horizontal predictor, a vertical predictor, and a planar predictor based
//! on the corner geometry, which tends to track edges in natural images
//! better than a fixed-order linear predictor.
//!
//! Residuals are computed and restored entirely in `u8` arithmetic modulo
//! 256; there is no clamping, so forward and inverse prediction are exact
//! inverses of one another regardless of image content.

use log::trace;

/// Predicts a sample from its left (`a`), top (`b`), and top-left (`c`)
/// neighbors, per the JPEG-LS / LOCO-I median edge detector.
#[inline]
fn predict(a: u8, b: u8, c: u8) -> u8 {
    let (a, b, c) = (a as i32, b as i32, c as i32);
    if c >= a.max(b) {
        a.min(b) as u8
    }
    else if c <= a.min(b) {
        a.max(b) as u8
    }
    else {
        (a + b - c) as u8
    }
}

/// Neighbor sample for a pixel at `(x, y)` in a `width`-wide plane, or 0 if
/// the neighbor falls outside the plane (the predictor's edge policy: no
/// mirroring or extension).
#[inline]
fn neighbor(plane: &[u8], width: usize, x: usize, y: usize) -> u8 {
    plane[y * width + x]
}

/// Computes the LOCO-I residual plane for a single `width`×`height` 8-bit
/// plane, traversing samples in raster order (row-major, x increasing
/// within a row, y increasing).
///
/// `plane.len()` must equal `width * height`; the output is the same
/// length.
pub fn forward(plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(plane.len(), width * height);

    let mut residual = vec![0u8; plane.len()];

    for y in 0..height {
        for x in 0..width {
            let a = if x > 0 { neighbor(plane, width, x - 1, y) } else { 0 };
            let b = if y > 0 { neighbor(plane, width, x, y - 1) } else { 0 };
            let c = if x > 0 && y > 0 { neighbor(plane, width, x - 1, y - 1) } else { 0 };

            let pred = predict(a, b, c);
            let idx = y * width + x;
            residual[idx] = plane[idx].wrapping_sub(pred);
        }
    }

    trace!("predictor: forward pass over {}x{} plane", width, height);
    residual
}

/// Reconstructs a plane from its LOCO-I residual. Must be walked in the
/// same raster order as [`forward`], using already-reconstructed neighbors
/// (not the original samples, which are not available to a decoder) —
/// otherwise the predictor bias at each pixel would not match the one the
/// encoder used.
pub fn inverse(residual: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(residual.len(), width * height);

    let mut plane = vec![0u8; residual.len()];

    for y in 0..height {
        for x in 0..width {
            let a = if x > 0 { neighbor(&plane, width, x - 1, y) } else { 0 };
            let b = if y > 0 { neighbor(&plane, width, x, y - 1) } else { 0 };
            let c = if x > 0 && y > 0 { neighbor(&plane, width, x - 1, y - 1) } else { 0 };

            let pred = predict(a, b, c);
            let idx = y * width + x;
            plane[idx] = residual[idx].wrapping_add(pred);
        }
    }

    trace!("predictor: inverse pass over {}x{} plane", width, height);
    plane
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_plane() {
        let width = 5;
        let height = 4;
        let plane: Vec<u8> =
            (0..width * height).map(|i| ((i * 37 + 11) % 256) as u8).collect();

        let residual = forward(&plane, width, height);
        assert_eq!(residual.len(), plane.len());
        assert_eq!(inverse(&residual, width, height), plane);
    }

    #[test]
    fn single_pixel_uses_zero_neighbors() {
        let plane = [200u8];
        let residual = forward(&plane, 1, 1);
        // a = b = c = 0, predict = 0.
        assert_eq!(residual[0], 200);
        assert_eq!(inverse(&residual, 1, 1), plane);
    }

    #[test]
    fn single_column_uses_only_top_neighbor() {
        let plane = [10u8, 20, 30];
        let residual = forward(&plane, 1, 3);
        assert_eq!(residual[0], 10); // a = b = c = 0
        assert_eq!(residual[1], 10); // predict = b = 10
        assert_eq!(residual[2], 10); // predict = b = 20
        assert_eq!(inverse(&residual, 1, 3), plane);
    }

    #[test]
    fn single_row_uses_only_left_neighbor() {
        let plane = [10u8, 20, 30];
        let residual = forward(&plane, 3, 1);
        assert_eq!(residual[0], 10); // a = b = c = 0
        assert_eq!(residual[1], 10); // predict = a = 10
        assert_eq!(residual[2], 10); // predict = a = 20
        assert_eq!(inverse(&residual, 3, 1), plane);
    }

    #[test]
    fn checkerboard_matches_worked_example() {
        // 2x2 checker: (0,0)=0, (1,0)=255, (0,1)=255, (1,1)=0.
        let plane = [0u8, 255, 255, 0];
        let residual = forward(&plane, 2, 2);
        assert_eq!(residual[0], 0);
        assert_eq!(residual[1], 255);
        assert_eq!(residual[2], 255);
        // At (1,1): a=255, b=255, c=0 -> predict = a+b-c = 510 mod 256 = 254.
        // residual = (0 - 254) mod 256 = 2.
        assert_eq!(residual[3], 2);
        assert_eq!(inverse(&residual, 2, 2), plane);
    }

    #[test]
    fn all_zero_plane_has_zero_residual() {
        let plane = vec![0u8; 64];
        let residual = forward(&plane, 8, 8);
        assert!(residual.iter().all(|&b| b == 0));
        assert_eq!(inverse(&residual, 8, 8), plane);
    }
}
