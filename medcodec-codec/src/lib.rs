// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A lossless codec for 24-bit RGB images: a LOCO-I (MED) predictor
//! decorrelates each color plane, residuals are packed with a byte-level
//! run-length transform, and the result is entropy coded with an adaptive
//! order-0 arithmetic coder. See [`container`] for the top-level
//! `encode`/`decode` entry points and the on-disk framing.

pub mod arith;
pub mod container;
pub mod model;
pub mod planes;
pub mod predictor;
pub mod rle;
