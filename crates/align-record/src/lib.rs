//! Alignment record parsing and emission.
//!
//! Tokenizes tab-separated alignment record lines, exposes the fields the
//! rest of the system needs (query name, flag, reference position,
//! cigar), and re-serializes with only the duplicate flag bit patched,
//! leaving every other byte of the original line untouched.

pub mod cigar;
pub mod error;
pub mod flags;
pub mod record;

pub use cigar::{Cigar, CigarOp, OpKind};
pub use error::ParseError;
pub use record::Record;

/// Returns `true` if `line` is a header line (begins with `@`).
pub fn is_header_line(line: &str) -> bool {
    line.starts_with('@')
}
