use thiserror::Error;

/// A caller bug detected before any byte was read from the stream.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("destination has zero capacity")]
    ZeroCapacity,
    #[error("token bound is zero")]
    ZeroTokenBound,
    #[error("token bound {bound} exceeds the token length {len}")]
    TokenBoundOutOfRange { bound: usize, len: usize },
    #[error("token contains the reserved terminator byte at index {index}")]
    TokenContainsTerminator { index: usize },
    #[error("token spans lines, but only single-line tokens are supported here")]
    MultiLineToken,
    #[error("buffer capacity {capacity} cannot hold a token of {token_len} bytes and its terminator")]
    BufferTooSmallForToken { capacity: usize, token_len: usize },
    #[error("token of {token_len} bytes does not fit the stream's rewind window of {limit} bytes")]
    TokenExceedsRewindLimit { token_len: usize, limit: usize },
}

/// Failure of a scan over a stream whose reads fail with `E`.
#[derive(Debug, Error, PartialEq)]
pub enum ScanError<E> {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    #[error("stream error: {0}")]
    Stream(E),
    #[error("section exceeds the limit of {limit} bytes")]
    SectionTooLarge { limit: usize },
}

impl<E> ScanError<E> {
    /// Returns the argument error, if that is what this is.
    #[must_use]
    pub fn as_argument(&self) -> Option<ArgumentError> {
        match self {
            ScanError::InvalidArgument(err) => Some(*err),
            _ => None,
        }
    }
}
