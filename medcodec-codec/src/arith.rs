// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A 32-bit adaptive arithmetic coder over the [`Model`] in the sibling
//! `model` module.
//!
//! Both [`ArithmeticEncoder`] and [`ArithmeticDecoder`] own their `low`/`high`
//! range state as plain fields rather than reaching for process-global
//! statics, so nothing stops two encodes (or an encode and a decode) from
//! running side by side. The renormalization ladder below follows the usual
//! three cases for a carryless range coder: E1 (`high` has dropped below the
//! midpoint), E2 (`low` has risen past it), and E3 (both straddle the
//! midpoint but are converging on it, the classic underflow case, handled by
//! counting pending bits rather than shifting in a carry).

use log::trace;
use medcodec_core::errors::{arithmetic_corruption_error, Result};
use medcodec_core::io::{BitReaderMsb, BitWriterMsb};

use crate::model::Model;

const TOP: u32 = 0xFFFF_FFFF;
const HALF: u32 = 0x8000_0000;
const QTR: u32 = 0x4000_0000;
const TQTR: u32 = 0xC000_0000;

/// Encodes a stream of symbols against a [`Model`] that both sides keep in
/// lock-step. Call [`encode`](Self::encode) once per symbol, then
/// [`finish`](Self::finish) to flush the final range and pad out to a whole
/// number of bytes.
pub struct ArithmeticEncoder {
    low: u32,
    high: u32,
    pending: u32,
    writer: BitWriterMsb,
}

impl ArithmeticEncoder {
    pub fn new() -> Self {
        ArithmeticEncoder { low: 0, high: TOP, pending: 0, writer: BitWriterMsb::new() }
    }

    /// Narrows the current `[low, high]` range to the sub-interval `model`
    /// assigns `sym`, renormalizes, and updates `model` with `sym`.
    pub fn encode(&mut self, model: &mut Model, sym: u8) {
        let range = u64::from(self.high - self.low) + 1;
        let total = u64::from(model.total());

        let new_high = self
            .low
            .wrapping_add(((range * u64::from(model.cum_high(sym))) / total) as u32)
            .wrapping_sub(1);
        let new_low = self.low.wrapping_add(((range * u64::from(model.cum_low(sym))) / total) as u32);
        self.low = new_low;
        self.high = new_high;

        loop {
            if self.high < HALF {
                self.emit(0);
            }
            else if self.low >= HALF {
                self.emit(1);
                self.low -= HALF;
                self.high -= HALF;
            }
            else if self.low >= QTR && self.high < TQTR {
                self.pending += 1;
                self.low -= QTR;
                self.high -= QTR;
            }
            else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
        }

        model.update(sym);
    }

    fn emit(&mut self, bit: u32) {
        self.writer.write_bit(bit);
        self.writer.write_bits(1 - bit, self.pending);
        self.pending = 0;
    }

    /// Flushes enough bits to disambiguate the final range and returns the
    /// packed bitstream. Consumes the encoder: there is nothing meaningful
    /// left to encode into afterward.
    pub fn finish(mut self) -> Vec<u8> {
        self.pending += 1;
        if self.low < QTR {
            self.emit(0);
        }
        else {
            self.emit(1);
        }
        let bytes = self.writer.finish();
        trace!("arith: flushed encoder, {} bytes", bytes.len());
        bytes
    }
}

impl Default for ArithmeticEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes a stream of symbols previously produced by [`ArithmeticEncoder`].
/// The caller drives a [`Model`] identically to the encoder's, calling
/// [`decode`](Self::decode) once per expected symbol.
pub struct ArithmeticDecoder<'a> {
    low: u32,
    high: u32,
    code: u32,
    reader: BitReaderMsb<'a>,
}

impl<'a> ArithmeticDecoder<'a> {
    /// Primes the decoder by reading the first 32 bits of `data` as the
    /// initial code value. A `data` shorter than 4 bytes is padded with 1
    /// bits, per [`BitReaderMsb`]'s past-EOF convention.
    pub fn new(data: &'a [u8]) -> Self {
        let mut reader = BitReaderMsb::new(data);
        let code = reader.next_bits(32);
        ArithmeticDecoder { low: 0, high: TOP, code, reader }
    }

    /// Looks up the symbol whose cumulative range contains the current code
    /// value, narrows the range the same way the encoder did, and updates
    /// `model`. Returns [`medcodec_core::errors::CodecError::ArithmeticCorruption`]
    /// if the scaled code value does not land inside any symbol's range,
    /// which only happens when the compressed stream itself is corrupt.
    pub fn decode(&mut self, model: &mut Model) -> Result<u8> {
        let range = u64::from(self.high - self.low) + 1;
        let total = u64::from(model.total());

        let scaled = ((u64::from(self.code - self.low) + 1) * total - 1) / range;
        let sym = match model.find_symbol(scaled as u32) {
            Some(sym) => sym,
            None => return arithmetic_corruption_error(),
        };

        let new_high = self
            .low
            .wrapping_add(((range * u64::from(model.cum_high(sym))) / total) as u32)
            .wrapping_sub(1);
        let new_low = self.low.wrapping_add(((range * u64::from(model.cum_low(sym))) / total) as u32);
        self.low = new_low;
        self.high = new_high;

        loop {
            if self.high < HALF {
                // Nothing to subtract, just shift.
            }
            else if self.low >= HALF {
                self.low -= HALF;
                self.high -= HALF;
                self.code -= HALF;
            }
            else if self.low >= QTR && self.high < TQTR {
                self.low -= QTR;
                self.high -= QTR;
                self.code -= QTR;
            }
            else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.code = (self.code << 1) | self.reader.next_bit();
        }

        model.update(sym);
        Ok(sym)
    }
}
