use alloc::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};

use thiserror::Error;
use tracing::trace;

use super::{Bookmark, ByteStream, Pushback};
use crate::options::StreamOptions;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("bookmark at offset {offset} is outside the replay window starting at {window_start}")]
    MarkExpired { offset: u64, window_start: u64 },
}

/// Bytes consumed since the oldest live bookmark, capped to the replay limit.
#[derive(Debug)]
struct Journal {
    start: u64,
    bytes: VecDeque<u8>,
}

impl Journal {
    fn record(&mut self, byte: u8, limit: usize) {
        self.bytes.push_back(byte);
        if self.bytes.len() > limit {
            self.bytes.pop_front();
            self.start += 1;
        }
    }
}

/// A stream over any [`Read`] implementation.
///
/// Reads are buffered. Bytes consumed while a bookmark is live are journaled
/// so that [`rewind`](ByteStream::rewind) can deliver them again; the
/// journal is a sliding window of [`StreamOptions::replay_limit`] bytes and
/// is dropped by [`release`](ByteStream::release).
///
/// ```rust
/// use sectscan::{ByteStream, ReaderStream};
///
/// let mut s = ReaderStream::new(&b"x\ny"[..]);
/// assert_eq!(s.next_byte().unwrap(), Some(b'x'));
/// let mark = s.bookmark();
/// assert_eq!(s.next_byte().unwrap(), Some(b'\n'));
/// s.rewind(mark).unwrap();
/// assert_eq!(s.next_byte().unwrap(), Some(b'\n'));
/// ```
#[derive(Debug)]
pub struct ReaderStream<R> {
    inner: BufReader<R>,
    pushback: Pushback,
    replay: VecDeque<u8>,
    journal: Option<Journal>,
    offset: u64,
    options: StreamOptions,
}

impl<R: Read> ReaderStream<R> {
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, StreamOptions::default())
    }

    pub fn with_options(inner: R, options: StreamOptions) -> Self {
        Self {
            inner: BufReader::new(inner),
            pushback: Pushback::default(),
            replay: VecDeque::new(),
            journal: None,
            offset: 0,
            options,
        }
    }

    /// Returns the wrapped reader.
    ///
    /// Bytes buffered, pushed back, or waiting for replay are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn fill_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.inner.consume(1);
                    return Ok(Some(byte));
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }

    fn window_start(&self) -> u64 {
        self.journal.as_ref().map_or(self.offset, |j| j.start)
    }
}

impl<R: Read> ByteStream for ReaderStream<R> {
    type Error = StreamError;

    fn next_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let byte = match self.pushback.take().or_else(|| self.replay.pop_front()) {
            Some(byte) => Some(byte),
            None => self.fill_byte()?,
        };
        if let Some(byte) = byte {
            self.offset += 1;
            if let Some(journal) = &mut self.journal {
                journal.record(byte, self.options.replay_limit);
            }
        }
        Ok(byte)
    }

    fn unread(&mut self, byte: u8) {
        self.pushback.put(byte);
        self.offset -= 1;
        if let Some(journal) = &mut self.journal {
            // A byte read before the journal began is journaled again on the
            // next read, so the window moves back to cover it.
            if journal.bytes.pop_back().is_none() {
                journal.start = self.offset;
            }
        }
    }

    fn offset(&self) -> u64 {
        self.offset
    }

    fn bookmark(&mut self) -> Bookmark {
        if self.journal.is_none() {
            self.journal = Some(Journal {
                start: self.offset,
                bytes: VecDeque::new(),
            });
        }
        Bookmark::at(self.offset)
    }

    fn can_rewind(&self, mark: Bookmark) -> bool {
        self.journal
            .as_ref()
            .is_some_and(|j| j.start <= mark.offset() && mark.offset() <= self.offset)
    }

    fn rewind(&mut self, mark: Bookmark) -> Result<(), StreamError> {
        let window_start = self.window_start();
        let offset = self.offset;
        let Some(journal) = self
            .journal
            .as_mut()
            .filter(|j| j.start <= mark.offset() && mark.offset() <= offset)
        else {
            return Err(StreamError::MarkExpired {
                offset: mark.offset(),
                window_start,
            });
        };
        // The window bounds the distance by the journal's length.
        #[allow(clippy::cast_possible_truncation)]
        let keep = (mark.offset() - journal.start) as usize;
        if let Some(byte) = self.pushback.take() {
            self.replay.push_front(byte);
        }
        for byte in journal.bytes.drain(keep..).rev() {
            self.replay.push_front(byte);
        }
        trace!(
            from = self.offset,
            to = mark.offset(),
            "rewinding reader stream"
        );
        self.offset = mark.offset();
        Ok(())
    }

    fn release(&mut self) {
        self.journal = None;
    }

    fn rewind_limit(&self) -> usize {
        self.options.replay_limit
    }
}
