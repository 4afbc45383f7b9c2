/// Configuration for streams that replay bytes after a rewind.
///
/// # Examples
///
/// ```rust
/// use sectscan::StreamOptions;
///
/// let options = StreamOptions {
///     replay_limit: 4 * 1024,
/// };
/// assert!(options.replay_limit > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// How many already-consumed bytes a reader-backed stream keeps while a
    /// bookmark is live.
    ///
    /// A multi-line token match rewinds at most the token's length plus one
    /// byte, so tokens must be shorter than this window. A failed
    /// `skip_to_token` rewinds to where it started only if every skipped
    /// byte still fits.
    ///
    /// # Default
    ///
    /// 64 KiB
    pub replay_limit: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            replay_limit: 64 * 1024,
        }
    }
}

/// Configuration for [`SectionExtractor`](crate::SectionExtractor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorOptions {
    /// Capacity, terminator included, of the scratch buffer each bounded
    /// capture call fills.
    ///
    /// A fill that makes no progress doubles the scratch, so even a capacity
    /// of 1 terminates.
    ///
    /// # Default
    ///
    /// `32`
    pub chunk_capacity: usize,

    /// Upper bound on the assembled section, in bytes.
    ///
    /// # Default
    ///
    /// 16 KiB
    pub max_section_len: usize,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            chunk_capacity: 32,
            max_section_len: 16 * 1024,
        }
    }
}
