// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An order-0 adaptive frequency model over the 256-symbol byte alphabet.
//!
//! Unlike Opus's range coder, which uses static per-context tables baked in
//! at compile time, this model starts uniform and adapts after every coded
//! symbol: frequently seen bytes get cheaper over the course of a stream.
//! Both the encoder and decoder carry one `Model` each and MUST call
//! [`Model::update`] with the same sequence of symbols, or they desynchronize.

use log::debug;

const N_SYMBOLS: usize = 256;
const MAX_TOTAL: u32 = 1 << 15;

/// Cumulative-frequency table for the 256-symbol alphabet, rescaled before
/// `total` would otherwise reach `2^15`.
pub struct Model {
    freq: [u32; N_SYMBOLS],
    cum: [u32; N_SYMBOLS + 1],
    total: u32,
}

impl Model {
    /// A fresh model: every symbol starts with frequency 1, so `total`
    /// starts at 256.
    pub fn new() -> Self {
        let freq = [1u32; N_SYMBOLS];
        let mut cum = [0u32; N_SYMBOLS + 1];
        for i in 0..N_SYMBOLS {
            cum[i + 1] = cum[i] + freq[i];
        }
        let total = cum[N_SYMBOLS];

        Model { freq, cum, total }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[inline]
    pub fn cum_low(&self, sym: u8) -> u32 {
        self.cum[sym as usize]
    }

    #[inline]
    pub fn cum_high(&self, sym: u8) -> u32 {
        self.cum[sym as usize + 1]
    }

    /// Finds the unique symbol such that `cum[sym] <= target < cum[sym+1]`.
    /// `target` must be in `0..self.total()`; a 256-symbol alphabet keeps a
    /// linear scan cheap relative to the surrounding 64-bit divide.
    pub fn find_symbol(&self, target: u32) -> Option<u8> {
        if target >= self.total {
            return None;
        }
        for sym in 0..N_SYMBOLS {
            if target < self.cum[sym + 1] {
                return Some(sym as u8);
            }
        }
        None
    }

    /// Bumps `sym`'s frequency by one, rescaling first if `total` would
    /// otherwise reach `2^15`.
    pub fn update(&mut self, sym: u8) {
        if self.total >= MAX_TOTAL {
            self.rescale();
        }

        let sym = sym as usize;
        self.freq[sym] += 1;
        self.total += 1;
        for c in self.cum[sym + 1..].iter_mut() {
            *c += 1;
        }
    }

    /// Halves every frequency (never below 1) and rebuilds the cumulative
    /// table. Keeps `total` well under the 32-bit range/total product limit
    /// the coder relies on.
    fn rescale(&mut self) {
        for f in self.freq.iter_mut() {
            *f = (*f + 1) / 2;
        }
        self.cum[0] = 0;
        for i in 0..N_SYMBOLS {
            self.cum[i + 1] = self.cum[i] + self.freq[i];
        }
        self.total = self.cum[N_SYMBOLS];

        debug!("model: rescaled, total now {}", self.total);
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uniform() {
        let model = Model::new();
        assert_eq!(model.total(), 256);
        assert_eq!(model.cum_low(0), 0);
        assert_eq!(model.cum_high(0), 1);
        assert_eq!(model.cum_low(255), 255);
        assert_eq!(model.cum_high(255), 256);
    }

    #[test]
    fn update_shifts_higher_symbols_cumulative_range() {
        let mut model = Model::new();
        model.update(5);
        assert_eq!(model.total(), 257);
        assert_eq!(model.cum_high(5) - model.cum_low(5), 2);
        // Every symbol after 5 is shifted up by one in the cumulative table.
        assert_eq!(model.cum_low(6), model.cum_high(5));
        assert_eq!(model.cum_low(255), 256);
        assert_eq!(model.cum_high(255), 257);
    }

    #[test]
    fn find_symbol_matches_cumulative_ranges() {
        let mut model = Model::new();
        for _ in 0..10 {
            model.update(42);
        }
        for sym in 0..=255u8 {
            let lo = model.cum_low(sym);
            let hi = model.cum_high(sym);
            if lo < hi {
                assert_eq!(model.find_symbol(lo), Some(sym));
                assert_eq!(model.find_symbol(hi - 1), Some(sym));
            }
        }
        assert_eq!(model.find_symbol(model.total()), None);
    }

    #[test]
    fn rescales_before_total_reaches_2_15_and_never_below_256() {
        let mut model = Model::new();
        for i in 0..200_000u32 {
            model.update((i % 256) as u8);
            assert!(model.total() < (1 << 15));
            assert!(model.total() >= 256);
        }
    }

    #[test]
    fn dominant_symbol_shrinks_toward_the_full_range() {
        let mut model = Model::new();
        for _ in 0..5000 {
            model.update(7);
        }
        // Symbol 7 should now occupy the overwhelming majority of the total.
        let share = (model.cum_high(7) - model.cum_low(7)) as f64 / model.total() as f64;
        assert!(share > 0.9, "dominant symbol only has {share} of the range");
    }
}
