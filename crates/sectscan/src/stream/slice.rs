use core::convert::Infallible;

use super::{Bookmark, ByteStream, Pushback};

/// A stream over an in-memory byte slice.
///
/// Every bookmark stays rewindable, so a failed
/// [`skip_to_token`](crate::skip_to_token) always restores the cursor.
///
/// ```rust
/// use sectscan::{ByteStream, SliceStream};
///
/// let mut s = SliceStream::new(b"ab");
/// let mark = s.bookmark();
/// assert_eq!(s.next_byte(), Ok(Some(b'a')));
/// s.rewind(mark).unwrap();
/// assert_eq!(s.rest(), b"ab");
/// ```
#[derive(Debug, Clone)]
pub struct SliceStream<'a> {
    data: &'a [u8],
    pos: usize,
    pushback: Pushback,
}

impl<'a> SliceStream<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            pushback: Pushback::default(),
        }
    }

    /// The bytes not consumed yet.
    ///
    /// A pushed-back byte is reported as the source byte at that position.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.cursor()..]
    }

    fn cursor(&self) -> usize {
        self.pos - usize::from(self.pushback.is_occupied())
    }
}

impl ByteStream for SliceStream<'_> {
    type Error = Infallible;

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, Infallible> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn unread(&mut self, byte: u8) {
        debug_assert!(self.pos > 0, "unread at the start of the stream");
        self.pushback.put(byte);
    }

    fn offset(&self) -> u64 {
        self.cursor() as u64
    }

    fn bookmark(&mut self) -> Bookmark {
        Bookmark::at(self.offset())
    }

    fn can_rewind(&self, mark: Bookmark) -> bool {
        mark.offset() <= self.offset()
    }

    fn rewind(&mut self, mark: Bookmark) -> Result<(), Infallible> {
        debug_assert!(self.can_rewind(mark), "bookmark lies ahead of the cursor");
        let cursor = self.cursor();
        self.pushback.take();
        // Marks are taken from `cursor`, which indexes `data`.
        #[allow(clippy::cast_possible_truncation)]
        let pos = mark.offset() as usize;
        self.pos = pos.min(cursor);
        Ok(())
    }

    fn release(&mut self) {}
}
