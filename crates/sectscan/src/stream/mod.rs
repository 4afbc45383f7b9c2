//! Byte streams with one byte of pushback and bookmark/rewind support.
//!
//! The scanners only ever move forward through a stream, with two
//! exceptions:
//! - a single just-read byte may be handed back with
//!   [`ByteStream::unread`] (the line reader does this when a destination
//!   fills up), and
//! - a [`Bookmark`] taken earlier may be rewound to when a multi-line token
//!   match fails part way.
//!
//! In-memory sources ([`SliceStream`]) rewind by resetting an index.
//! Reader-backed sources (`ReaderStream`, `std` only) keep the bytes read
//! since the oldest live bookmark in a bounded replay window.
//!
//! Invariants
//! - At most one byte is pushed back at a time; it must be read again before
//!   the next `unread`.
//! - A bookmark is only valid until [`ByteStream::release`] is called.

use crate::error::ScanError;

mod slice;
pub use slice::SliceStream;

#[cfg(feature = "std")]
mod reader;
#[cfg(feature = "std")]
pub use reader::{ReaderStream, StreamError};


/// Opaque saved position in a [`ByteStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bookmark(u64);

impl Bookmark {
    pub(crate) fn at(offset: u64) -> Self {
        Bookmark(offset)
    }

    pub(crate) fn offset(self) -> u64 {
        self.0
    }
}

/// A forward-only byte source with single-byte pushback and rewindable
/// bookmarks.
pub trait ByteStream {
    /// Error produced by the underlying source.
    type Error;

    /// Reads the next byte, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Fails when the underlying source fails.
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Hands back the byte that was just read.
    ///
    /// # Panics
    ///
    /// Panics if a previously unread byte has not been read again yet.
    fn unread(&mut self, byte: u8);

    /// Number of bytes consumed so far.
    fn offset(&self) -> u64;

    /// Saves the current position.
    fn bookmark(&mut self) -> Bookmark;

    /// Whether [`rewind`](Self::rewind) to `mark` would succeed.
    fn can_rewind(&self, mark: Bookmark) -> bool;

    /// Moves the cursor back to `mark`.
    ///
    /// Bytes after the mark are delivered again, in order, by subsequent
    /// reads. Live bookmarks taken before `mark` stay valid.
    ///
    /// # Errors
    ///
    /// Fails when the stream no longer holds the bytes after `mark`.
    fn rewind(&mut self, mark: Bookmark) -> Result<(), Self::Error>;

    /// Drops every live bookmark.
    fn release(&mut self);

    /// The farthest back, in bytes, a bookmark is guaranteed to stay
    /// rewindable.
    fn rewind_limit(&self) -> usize {
        usize::MAX
    }
}

/// The one-byte pushback slot shared by stream implementations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pushback(Option<u8>);

impl Pushback {
    /// Stores `byte`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already occupied.
    pub fn put(&mut self, byte: u8) {
        assert!(
            self.0.is_none(),
            "pushback slot already holds a byte; read it before unreading another"
        );
        self.0 = Some(byte);
    }

    /// Empties the slot, returning its byte.
    pub fn take(&mut self) -> Option<u8> {
        self.0.take()
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.0.is_some()
    }
}

/// Reads one byte, lifting the stream's error into a [`ScanError`].
pub(crate) fn pull<S: ByteStream + ?Sized>(stream: &mut S) -> Result<Option<u8>, ScanError<S::Error>> {
    stream.next_byte().map_err(ScanError::Stream)
}

/// Reads one byte and hands it straight back.
pub(crate) fn peek<S: ByteStream + ?Sized>(stream: &mut S) -> Result<Option<u8>, ScanError<S::Error>> {
    let byte = pull(stream)?;
    if let Some(byte) = byte {
        stream.unread(byte);
    }
    Ok(byte)
}
