// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `io` module implements the byte- and bit-level I/O primitives shared
//! by the container and arithmetic coder: little-endian integer
//! reading/writing over an in-memory buffer, and an MSB-first bit writer and
//! reader pair.
//!
//! Everything here operates on a single in-memory `&[u8]`/`Vec<u8>` rather
//! than a generic stream, since the codec only ever processes whole buffers
//! at once (see the workspace-level Non-goal on streaming).

mod bit;

pub use bit::{BitReaderMsb, BitWriterMsb};

use crate::errors::{size_mismatch_error, Result};

/// A cursor over an in-memory byte buffer exposing the little-endian integer
/// reads the container header needs.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Reads exactly `buf.len()` bytes or returns an error if the
    /// underlying buffer is exhausted first.
    pub fn read_exact(&mut self, out: &mut [u8]) -> Result<()> {
        if self.remaining() < out.len() {
            return size_mismatch_error(self.pos + out.len(), self.buf.len());
        }
        out.copy_from_slice(&self.buf[self.pos..self.pos + out.len()]);
        self.pos += out.len();
        Ok(())
    }

    /// Reads a slice of `len` bytes without copying.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return size_mismatch_error(self.pos + len, self.buf.len());
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.read_exact(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        self.read_exact(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }
}

/// Appends little-endian integers to a growable output buffer.
pub trait WriteBytesLe {
    fn write_u32_le(&mut self, value: u32);
    fn write_u64_le(&mut self, value: u64);
}

impl WriteBytesLe for Vec<u8> {
    fn write_u32_le(&mut self, value: u32) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_u64_le(&mut self, value: u64) {
        self.extend_from_slice(&value.to_le_bytes());
    }
}
