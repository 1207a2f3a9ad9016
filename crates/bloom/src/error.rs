//! Error types for Bloom filter sizing and construction.

use thiserror::Error;

/// Errors from sizing or constructing a `BloomFilter`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected item count must be nonzero, got {0}")]
    InvalidNItems(u64),

    #[error("false positive rate must be in (0, 1), got {0}")]
    InvalidFpRate(f64),

    #[error(
        "requested memory ({requested_bits} bits) cannot satisfy n={n}, p={p}; minimum is {minimum_bits} bits"
    )]
    MemoryTooSmall {
        requested_bits: u64,
        n: u64,
        p: f64,
        minimum_bits: u64,
    },
}
