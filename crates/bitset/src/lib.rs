//! A dense, word-packed bit array with lock-free concurrent test-and-set.
//!
//! Backed by `AtomicU64` words. `set_if_unset` is the only mutating
//! operation; bits only ever transition 0 -> 1, which is what lets
//! concurrent workers share one array without a global lock.

use std::sync::atomic::{AtomicU64, Ordering};

const WORD_BITS: u64 = 64;

/// A fixed-width atomic bit array of `len_bits` bits, allocated once.
pub struct BitArray {
    words: Vec<AtomicU64>,
    len_bits: u64,
}

impl BitArray {
    /// Allocate a zeroed bit array of exactly `len_bits` bits.
    pub fn new(len_bits: u64) -> Self {
        assert!(len_bits > 0, "bit array width must be nonzero");
        let word_count = len_bits.div_ceil(WORD_BITS) as usize;
        let mut words = Vec::with_capacity(word_count);
        words.resize_with(word_count, || AtomicU64::new(0));
        Self { words, len_bits }
    }

    /// Number of addressable bits.
    pub fn len_bits(&self) -> u64 {
        self.len_bits
    }

    fn locate(&self, bit_index: u64) -> (usize, u64) {
        debug_assert!(bit_index < self.len_bits, "bit index out of range");
        ((bit_index / WORD_BITS) as usize, bit_index % WORD_BITS)
    }

    /// Atomically set `bit_index`. Returns `true` if this call caused the
    /// 0 -> 1 transition, `false` if the bit was already set.
    pub fn set_if_unset(&self, bit_index: u64) -> bool {
        let (word_idx, bit_off) = self.locate(bit_index);
        let mask = 1u64 << bit_off;
        let prev = self.words[word_idx].fetch_or(mask, Ordering::AcqRel);
        prev & mask == 0
    }

    /// Read a single bit.
    pub fn test(&self, bit_index: u64) -> bool {
        let (word_idx, bit_off) = self.locate(bit_index);
        let mask = 1u64 << bit_off;
        self.words[word_idx].load(Ordering::Acquire) & mask != 0
    }

    /// Total number of set bits. A non-atomic snapshot across words: safe
    /// to call concurrently with writers, but the result may undercount
    /// bits set by a writer mid-scan.
    pub fn popcount(&self) -> u64 {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire).count_ones() as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_set_if_unset_first_call_transitions() {
        let b = BitArray::new(128);
        assert!(!b.test(5));
        assert!(b.set_if_unset(5));
        assert!(b.test(5));
    }

    #[test]
    fn test_set_if_unset_second_call_returns_false() {
        let b = BitArray::new(128);
        assert!(b.set_if_unset(5));
        assert!(!b.set_if_unset(5));
    }

    #[test]
    fn test_popcount_tracks_distinct_bits() {
        let b = BitArray::new(256);
        for i in [1u64, 2, 3, 64, 65, 200] {
            b.set_if_unset(i);
        }
        assert_eq!(b.popcount(), 6);
    }

    #[test]
    fn test_bits_across_word_boundary_are_independent() {
        let b = BitArray::new(128);
        b.set_if_unset(63);
        assert!(b.test(63));
        assert!(!b.test(64));
        b.set_if_unset(64);
        assert!(b.test(64));
    }

    #[test]
    fn test_concurrent_set_if_unset_exactly_one_winner() {
        let b = Arc::new(BitArray::new(64));
        let winners: Vec<_> = (0..8)
            .map(|_| {
                let b = Arc::clone(&b);
                thread::spawn(move || b.set_if_unset(10))
            })
            .collect();
        let wins = winners
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&w| w)
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_concurrent_disjoint_sets_all_succeed() {
        let b = Arc::new(BitArray::new(4096));
        let handles: Vec<_> = (0..16)
            .map(|t| {
                let b = Arc::clone(&b);
                thread::spawn(move || {
                    for i in 0..100u64 {
                        assert!(b.set_if_unset(t * 100 + i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(b.popcount(), 1600);
    }
}
