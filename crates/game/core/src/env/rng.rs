//! Engine-owned random stream.
//!
//! Every random decision in a session (deck shuffles, reshuffles, weighted
//! intent selection) consumes this one stream. The stream is a plain value
//! owned by the session, so it serializes with the snapshot and can be handed
//! to a follow-up session to continue the same sequence.
//!
//! # Determinism
//!
//! Given the same seed, the stream produces the same sequence of values on
//! every platform. Nothing else in the crate is allowed to produce randomness.

/// PCG random stream (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. `position` counts how many outputs have been consumed and is
/// carried in snapshots so replays can be compared draw-for-draw.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomStream {
    state: u64,
    position: u64,
}

impl RandomStream {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream from a caller-supplied seed.
    ///
    /// The seed is avalanched first so that nearby seeds (0, 1, 2, ...) start
    /// from unrelated states.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
            position: 0,
        }
    }

    /// Rebuilds a stream at an exact state and position.
    pub fn from_parts(state: u64, position: u64) -> Self {
        Self { state, position }
    }

    /// Internal generator state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Number of values drawn from this stream so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Draws the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let previous = self.state;
        self.state = Self::pcg_step(previous);
        self.position += 1;
        Self::pcg_output(previous)
    }

    /// Draws a value in `[0, bound)` without modulo bias.
    ///
    /// Returns 0 for a zero bound without consuming the stream.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }

        // Reject the low slice of the range that would over-represent small values
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u32();
            if value >= threshold {
                return value % bound;
            }
        }
    }

    /// Shuffles a slice in place (Fisher-Yates, back to front).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for index in (1..items.len()).rev() {
            let bound = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let swap_with = self.below(bound) as usize;
            items.swap(index, swap_with);
        }
    }
}

/// Avalanche a seed into a well-distributed initial state.
///
/// Mixing constants are based on SplitMix64 and FxHash multipliers.
pub fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed ^ 0x9e3779b97f4a7c15;
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomStream::from_seed(42);
        let mut b = RandomStream::from_seed(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        assert_eq!(a, b);
        assert_eq!(a.position(), 64);
    }

    #[test]
    fn nearby_seeds_diverge() {
        let mut a = RandomStream::from_seed(1);
        let mut b = RandomStream::from_seed(2);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = RandomStream::from_seed(7);
        for bound in 1..50 {
            for _ in 0..20 {
                assert!(rng.below(bound) < bound);
            }
        }
        let before = rng.position();
        assert_eq!(rng.below(0), 0);
        assert_eq!(rng.position(), before);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = RandomStream::from_seed(99);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn resumed_stream_continues_sequence() {
        let mut original = RandomStream::from_seed(5);
        original.next_u32();
        original.next_u32();
        let mut resumed = RandomStream::from_parts(original.state(), original.position());
        assert_eq!(original.next_u32(), resumed.next_u32());
        assert_eq!(resumed.position(), 3);
    }
}
