//! A space-optimal probabilistic set used to identify PCR/optical
//! duplicate templates from a single pass over a record stream.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: false-positive rate `(1 - e^(-kn/m))^k` approximates
//!   the target `p` at the design load `n`.
//! - **INVARIANT-2**: no false negatives — once `add(key)` has returned,
//!   `contains(key)` is `true` for the remainder of the filter's life.
//!
//! ## Usage
//!
//! ```
//! use bloom::BloomFilter;
//!
//! let filter = BloomFilter::new(1_000, 0.01).unwrap();
//! assert!(filter.add(b"template-a"));
//! assert!(filter.contains(b"template-a"));
//! ```

pub mod error;
pub mod filter;
pub mod params;

pub use error::ConfigError;
pub use filter::BloomFilter;
pub use params::{false_positive_rate, m_k_min, minimum_feasible_bits, BloomParams};
