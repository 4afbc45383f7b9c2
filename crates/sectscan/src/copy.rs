//! Line-by-line copying up to a single-line token.

use crate::{
    NEWLINE, TERMINATOR,
    error::{ArgumentError, ScanError},
    line::{LineEnd, LineRead, read_line},
    outcome::{Capture, Outcome},
    stream::{ByteStream, peek, pull},
    token::Token,
};

/// Copies whole lines from `stream` into `dst` until a line equals `token`.
///
/// The matching line is consumed but not copied. Equivalent to
/// [`resume_copy_until_token`] called at a line start.
///
/// ```rust
/// use sectscan::{Outcome, SliceStream, copy_until_token};
///
/// let mut stream = SliceStream::new(b"1\n### EXPECT\nNUM 1.00\n");
/// let mut buf = [0u8; 16];
/// let capture = copy_until_token(&mut buf, b"### EXPECT", &mut stream).unwrap();
/// assert_eq!(capture.outcome, Outcome::Found);
/// assert_eq!(&buf[..capture.len], b"1\n");
/// assert_eq!(stream.rest(), b"NUM 1.00\n");
/// ```
///
/// # Errors
///
/// See [`resume_copy_until_token`].
pub fn copy_until_token<S: ByteStream + ?Sized>(
    dst: &mut [u8],
    token: &[u8],
    stream: &mut S,
) -> Result<Capture, ScanError<S::Error>> {
    resume_copy_until_token(dst, token, true, stream)
}

/// Copies whole lines from `stream` into `dst` until a line equals `token`,
/// the stream ends, or `dst` fills up.
///
/// Only complete lines that began at a line start are compared with the
/// token, so `line_start` must say whether the cursor sits at the start of a
/// line; pass [`Capture::line_start`] from a truncated call.
///
/// A line that may be the token is never split: when the space left in `dst`
/// cannot hold the token, the copy stops at the line start and reports
/// [`Outcome::Truncated`].
///
/// # Errors
///
/// Fails before reading when the token is empty, spans lines or contains the
/// terminator byte, and when `dst` cannot hold the token plus a terminator.
/// Stream failures are passed through.
pub fn resume_copy_until_token<S: ByteStream + ?Sized>(
    dst: &mut [u8],
    token: &[u8],
    line_start: bool,
    stream: &mut S,
) -> Result<Capture, ScanError<S::Error>> {
    let token = Token::new(token)?;
    if token.is_multiline() {
        return Err(ArgumentError::MultiLineToken.into());
    }
    if dst.len() <= token.len() {
        return Err(ArgumentError::BufferTooSmallForToken {
            capacity: dst.len(),
            token_len: token.len(),
        }
        .into());
    }
    let token = token.as_bytes();

    let mut written = 0;
    let mut line_start = line_start;
    loop {
        if line_start && written > 0 && dst.len() - written <= token.len() {
            dst[written] = TERMINATOR;
            let outcome = match peek(stream)? {
                Some(_) => Outcome::Truncated,
                None => Outcome::EndOfStream,
            };
            return Ok(Capture::new(outcome, written, true));
        }

        let (len, end) = match read_line(&mut dst[written..], stream)? {
            LineRead::NoData => return Ok(Capture::new(Outcome::EndOfStream, written, line_start)),
            LineRead::Line { len, end } => (len, end),
        };
        if line_start && is_token_line(&dst[written..written + len], end, token, stream)? {
            dst[written] = TERMINATOR;
            return Ok(Capture::new(Outcome::Found, written, true));
        }
        written += len;
        match end {
            LineEnd::Newline => line_start = true,
            LineEnd::EndOfStream => return Ok(Capture::new(Outcome::EndOfStream, written, false)),
            LineEnd::Truncated => return Ok(Capture::new(Outcome::Truncated, written, false)),
        }
    }
}

/// Whether a line just read is the token, consuming the token's line feed
/// when the read stopped right before it.
fn is_token_line<S: ByteStream + ?Sized>(
    line: &[u8],
    end: LineEnd,
    token: &[u8],
    stream: &mut S,
) -> Result<bool, ScanError<S::Error>> {
    let content = match end {
        LineEnd::Newline => &line[..line.len() - 1],
        LineEnd::Truncated | LineEnd::EndOfStream => line,
    };
    if content != token {
        return Ok(false);
    }
    if end != LineEnd::Truncated {
        return Ok(true);
    }
    match pull(stream)? {
        None | Some(NEWLINE) => Ok(true),
        Some(byte) => {
            stream.unread(byte);
            Ok(false)
        }
    }
}
