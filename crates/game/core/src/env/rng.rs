//! Injectable randomness for damage rolls, turn order, and opponent choices.
//!
//! Every random decision in the engine goes through [`RandomSource`], so a
//! match can be replayed exactly by seeding [`PcgRng`] or scripted outright
//! with [`ScriptedRng`].

use std::collections::VecDeque;

/// Source of uniformly distributed integers.
pub trait RandomSource: Send {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Generate a value in range [min, max] inclusive.
    ///
    /// Uses rejection sampling so every outcome is equally likely. A reversed
    /// or empty range yields `min`.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        let space = u64::from(u32::MAX) + 1;
        let zone = space - (space % span);
        loop {
            let value = u64::from(self.next_u32());
            if value < zone {
                return min + (value % span) as u32;
            }
        }
    }

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&mut self) -> u32 {
        self.range(1, 100)
    }

    /// Fair coin.
    fn coin_flip(&mut self) -> bool {
        self.range(0, 1) == 1
    }

    /// Uniform index into a collection of `len` elements (`len` must be non-zero).
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty collection");
        let upper = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.range(0, upper) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Same seed, same sequence. Used by the runtime for live matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seed_from(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// `state' = state * multiplier + increment (mod 2^64)`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed script of values; intended for tests and replays.
///
/// Each call to [`RandomSource::range`] consumes one scripted value and
/// clamps it into the requested range. Once the script is exhausted the
/// fallback value (if any) repeats forever, otherwise the range minimum is
/// returned.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
    fallback: Option<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: None,
        }
    }

    /// Returns the same value for every draw.
    pub fn constant(value: u32) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: Some(value),
        }
    }

    /// Value to repeat once the script runs out.
    #[must_use]
    pub fn then_repeat(mut self, value: u32) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn draw(&mut self) -> Option<u32> {
        self.values.pop_front().or(self.fallback)
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.draw().unwrap_or(0)
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            // Still consume so scripts stay aligned with call order.
            let _ = self.draw();
            return min;
        }
        self.draw().map_or(min, |value| value.clamp(min, max))
    }
}
