use thiserror::Error;

/// A reply that does not fit the expected layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("packet truncated: needed {needed} byte(s) at offset {offset}, {len} available")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
}
