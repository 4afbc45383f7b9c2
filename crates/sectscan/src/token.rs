use crate::{NEWLINE, TERMINATOR, error::ArgumentError};

/// An exact byte sequence marking a section boundary.
///
/// A token may contain line feeds, in which case it only matches a run of
/// complete lines. Comparison is byte-exact: no trimming, no case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    bytes: &'t [u8],
}

impl<'t> Token<'t> {
    /// A token made of all of `bytes`.
    ///
    /// # Errors
    ///
    /// See [`Token::bounded`].
    pub fn new(bytes: &'t [u8]) -> Result<Self, ArgumentError> {
        Self::bounded(bytes, bytes.len())
    }

    /// A token made of the first `max_len` bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Fails when `max_len` is zero or larger than `bytes`, or when the token
    /// contains the reserved terminator byte.
    pub fn bounded(bytes: &'t [u8], max_len: usize) -> Result<Self, ArgumentError> {
        if max_len == 0 {
            return Err(ArgumentError::ZeroTokenBound);
        }
        let Some(bytes) = bytes.get(..max_len) else {
            return Err(ArgumentError::TokenBoundOutOfRange {
                bound: max_len,
                len: bytes.len(),
            });
        };
        if let Some(index) = bytes.iter().position(|&b| b == TERMINATOR) {
            return Err(ArgumentError::TokenContainsTerminator { index });
        }
        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'t [u8] {
        self.bytes
    }

    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the token spans more than one line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.bytes.contains(&NEWLINE)
    }
}
