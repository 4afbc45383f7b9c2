/// How a bounded scan ended.
///
/// Invalid arguments are not an outcome: they are reported as
/// [`ScanError::InvalidArgument`](crate::ScanError::InvalidArgument) before
/// the stream is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    /// The token was matched; the cursor sits after it and its line feed.
    Found,
    /// The stream ended before the token was seen.
    EndOfStream,
    /// The destination filled up. Call again to continue where this left
    /// off.
    Truncated,
}

/// What a bounded capture wrote and where it left the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Capture {
    pub outcome: Outcome,
    /// Bytes written before the terminator, which sits at `dst[len]`.
    pub len: usize,
    /// Whether the next unread byte starts a line. Pass it to the next call
    /// when resuming after [`Outcome::Truncated`].
    pub line_start: bool,
}

impl Capture {
    pub(crate) fn new(outcome: Outcome, len: usize, line_start: bool) -> Self {
        Self {
            outcome,
            len,
            line_start,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.outcome == Outcome::Found
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.outcome == Outcome::Truncated
    }
}
