use thiserror::Error;

/// Errors raised while parsing an alignment record line.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected at least 11 tab-separated fields, found {found}")]
    TooFewFields { line: u64, found: usize },

    #[error("line {line}: invalid flag field '{value}'")]
    InvalidFlag { line: u64, value: String },

    #[error("line {line}: invalid position field '{value}'")]
    InvalidPosition { line: u64, value: String },

    #[error("line {line}: invalid mapping quality field '{value}'")]
    InvalidMappingQuality { line: u64, value: String },

    #[error("line {line}: invalid cigar field: {reason}")]
    InvalidCigar { line: u64, reason: String },

    #[error("line {line}: record's query name '{found}' does not match the open group '{expected}'")]
    UnorderedQueryNames {
        line: u64,
        expected: String,
        found: String,
    },
}
