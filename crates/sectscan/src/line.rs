//! Bounded line reads.

use crate::{
    NEWLINE, TERMINATOR,
    error::{ArgumentError, ScanError},
    stream::{ByteStream, pull},
};

/// Why a [`read_line`] stopped storing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LineEnd {
    /// A line feed was read and stored.
    Newline,
    /// The destination filled up; the next byte was pushed back.
    Truncated,
    /// The stream ended after a line without a trailing line feed.
    EndOfStream,
}

/// Result of a [`read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LineRead {
    /// `len` bytes were stored; `len` is also the index of the terminator.
    Line { len: usize, end: LineEnd },
    /// The stream was already exhausted; nothing was stored.
    NoData,
}

/// Reads one line from `stream` into `dst`.
///
/// Stores bytes until a line feed has been stored, `dst.len() - 1` bytes are
/// stored, or the stream ends, then writes the terminator byte after them.
/// When `dst` fills before the line ends, the byte that did not fit is
/// pushed back to the stream.
///
/// ```rust
/// use sectscan::{LineEnd, LineRead, SliceStream, read_line};
///
/// let mut stream = SliceStream::new(b"ab\ncd");
/// let mut buf = [0u8; 8];
/// let read = read_line(&mut buf, &mut stream).unwrap();
/// assert_eq!(read, LineRead::Line { len: 3, end: LineEnd::Newline });
/// assert_eq!(&buf[..4], b"ab\n\0");
/// ```
///
/// # Errors
///
/// Fails without touching the stream when `dst` is empty, and fails when the
/// stream does.
pub fn read_line<S: ByteStream + ?Sized>(
    dst: &mut [u8],
    stream: &mut S,
) -> Result<LineRead, ScanError<S::Error>> {
    let Some(room) = dst.len().checked_sub(1) else {
        return Err(ArgumentError::ZeroCapacity.into());
    };

    let mut len = 0;
    let end = loop {
        let Some(byte) = pull(stream)? else {
            if len == 0 {
                dst[0] = TERMINATOR;
                return Ok(LineRead::NoData);
            }
            break LineEnd::EndOfStream;
        };
        if len == room {
            stream.unread(byte);
            break LineEnd::Truncated;
        }
        dst[len] = byte;
        len += 1;
        if byte == NEWLINE {
            break LineEnd::Newline;
        }
    };
    dst[len] = TERMINATOR;
    Ok(LineRead::Line { len, end })
}
