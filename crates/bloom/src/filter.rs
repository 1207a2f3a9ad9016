//! The Bloom filter: sizing, insertion, membership, cardinality estimate.

use bitset::BitArray;
use hasher::{DoubleHash, Reduction};

use crate::error::ConfigError;
use crate::params::{self, BloomParams};

/// A thread-safe, fixed-size Bloom filter.
///
/// Construction derives `(m, k)` analytically from `(n, p)` and allocates
/// the bit array once; `m` and `k` never change afterward. Whether index
/// reduction uses a mask or modulo is also decided once here, from `m`,
/// rather than re-checked on every hashed index. `add` and `contains`
/// take `&self` and are safe to call from multiple threads concurrently
/// — the only shared mutable state is the underlying `BitArray`, which
/// is wait-free at the word level.
pub struct BloomFilter {
    bits: BitArray,
    m: u64,
    k: u32,
    n: u64,
    p: f64,
    reduction: Reduction,
}

impl BloomFilter {
    /// Build a filter sized for `n` expected elements at false-positive
    /// rate `p`.
    pub fn new(n: u64, p: f64) -> Result<Self, ConfigError> {
        let BloomParams { m, k } = params::m_k_min(n, p)?;
        Ok(Self {
            bits: BitArray::new(m),
            m,
            k,
            n,
            p,
            reduction: Reduction::for_width(m),
        })
    }

    /// Build a filter with an explicit bit-array width, overriding the
    /// value sizing would otherwise derive. Fails if `m_bits` is too
    /// small to support any `k >= 1` — see `m_k_min`.
    pub fn with_explicit_bits(n: u64, p: f64, m_bits: u64) -> Result<Self, ConfigError> {
        let minimum = params::minimum_feasible_bits(n, p)?;
        if m_bits < minimum {
            return Err(ConfigError::MemoryTooSmall {
                requested_bits: m_bits,
                n,
                p,
                minimum_bits: minimum,
            });
        }
        let k = ((m_bits as f64 / n as f64) * std::f64::consts::LN_2)
            .round()
            .max(1.0) as u32;
        Ok(Self {
            bits: BitArray::new(m_bits),
            m: m_bits,
            k,
            n,
            p,
            reduction: Reduction::for_width(m_bits),
        })
    }

    /// The diagnostic `(m, k)` pair for `(n, p)`, without allocating.
    pub fn m_k_min(n: u64, p: f64) -> Result<BloomParams, ConfigError> {
        params::m_k_min(n, p)
    }

    /// Bit array width.
    pub fn m(&self) -> u64 {
        self.m
    }

    /// Number of hash functions.
    pub fn k(&self) -> u32 {
        self.k
    }

    /// The expected element count this filter was sized for.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// The target false-positive rate this filter was sized for.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Insert `key`. Returns `true` if at least one of the `k` bits
    /// transitioned 0 -> 1 (the key was definitely new to this filter),
    /// `false` if all `k` bits were already set (the key was probably
    /// already present).
    ///
    /// When two threads race to insert the same novel key, at most one
    /// will observe `true` — the other observes `false` and should treat
    /// its caller's item as a duplicate. This is expected and harmless.
    pub fn add(&self, key: &[u8]) -> bool {
        let h = DoubleHash::of(key);
        let mut any_new = false;
        for i in 0..self.k as u64 {
            let idx = h.reduce(i, self.reduction);
            if self.bits.set_if_unset(idx) {
                any_new = true;
            }
        }
        any_new
    }

    /// Test membership. May return `true` for a key never inserted (a
    /// false positive) but never `false` for a key that was inserted.
    pub fn contains(&self, key: &[u8]) -> bool {
        let h = DoubleHash::of(key);
        (0..self.k as u64).all(|i| self.bits.test(h.reduce(i, self.reduction)))
    }

    /// Number of bits currently set.
    pub fn popcount(&self) -> u64 {
        self.bits.popcount()
    }

    /// Estimate the number of distinct elements inserted so far, from the
    /// fraction of set bits: `round(-(m/k) * ln(1 - x/m))`.
    pub fn count_estimate(&self) -> u64 {
        let x = self.popcount();
        if x == 0 {
            return 0;
        }
        let m = self.m as f64;
        let k = self.k as f64;
        let fraction = x as f64 / m;
        // Fraction can reach 1.0 once the filter is saturated; ln(0) is
        // -inf, which would blow up the estimate, so clamp just below 1.
        let fraction = fraction.min(1.0 - f64::EPSILON);
        let estimate = -(m / k) * (1.0 - fraction).ln();
        estimate.round().max(0.0) as u64
    }

    /// The theoretical false-positive rate implied by the current fill
    /// level, i.e. using `count_estimate()` in place of the design `n`.
    pub fn observed_false_positive_rate(&self) -> f64 {
        params::false_positive_rate(self.m, self.k, self.count_estimate())
    }
}
