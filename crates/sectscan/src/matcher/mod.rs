//! Backtracking token matcher.
//!
//! Finds the first line start at which the stream continues with the token's
//! bytes followed by a line feed or the end of the stream. Tokens may span
//! lines, so a failed partial match may have consumed line starts that must
//! still be tried as candidates; those are revisited by rewinding the stream
//! to a [`Bookmark`].
//!
//! Two drivers share the same discipline:
//! - [`skip_to_token`] / [`skip_to_token_bounded`] only move the cursor. The
//!   bookmark is taken when an in-progress match first crosses a line
//!   boundary and a mismatch rewinds there, so the attempt's first line is not
//!   examined twice.
//! - [`scan_capture`] also writes every byte that is not part of the token
//!   into a bounded destination, and can be resumed after
//!   [`Outcome::Truncated`]. Bytes of a failed attempt are content, so the
//!   bookmark is taken at the attempt's first byte and a mismatch rewinds
//!   there; the byte under the rewound cursor is then read as content with
//!   line-start detection suppressed, and scanning carries on normally.
//!
//! The cursor never moves before where the call started.

use tracing::{debug, trace};

use crate::{
    NEWLINE, TERMINATOR,
    dump::ByteDump,
    error::{ArgumentError, ScanError},
    outcome::{Capture, Outcome},
    stream::{Bookmark, ByteStream, pull},
    token::Token,
};


/// Progress of a match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchState {
    /// Index of the next token byte expected; zero when no attempt is in
    /// progress.
    index: usize,
    /// Whether the next byte is the first of a line. Attempts only begin at
    /// line starts.
    line_start: bool,
}

impl MatchState {
    #[must_use]
    pub(crate) fn new(line_start: bool) -> Self {
        Self {
            index: 0,
            line_start,
        }
    }

    /// Feeds one byte. Returns `true` when it extends the current attempt
    /// (or begins one, when `may_begin` allows it).
    fn advance(&mut self, token: &[u8], byte: u8, may_begin: bool) -> bool {
        let extends = match self.index {
            0 => may_begin && self.line_start && token[0] == byte,
            i => token.get(i) == Some(&byte),
        };
        if extends {
            self.index += 1;
            self.line_start = byte == NEWLINE;
        }
        extends
    }

    fn is_complete(&self, token: &[u8]) -> bool {
        self.index == token.len()
    }
}

/// Moves the cursor past the first line equal to `token`.
///
/// Returns `false` when the token never appears; the cursor is then put back
/// where it was if the stream can still rewind that far.
///
/// # Errors
///
/// See [`skip_to_token_bounded`].
pub fn skip_to_token<S: ByteStream + ?Sized>(
    token: &[u8],
    stream: &mut S,
) -> Result<bool, ScanError<S::Error>> {
    skip_to_token_bounded(token, token.len(), stream)
}

/// Moves the cursor past the first run of complete lines equal to the first
/// `max_len` bytes of `token`.
///
/// The stream must be positioned at a line start. On success the cursor sits
/// after the token's trailing line feed (or at the end of the stream). When
/// the token is absent this returns `false` and, if the stream can still
/// rewind to where the call started, restores the cursor there; otherwise the
/// cursor is left at the end of the stream.
///
/// ```rust
/// use sectscan::{SliceStream, skip_to_token_bounded};
///
/// let mut stream = SliceStream::new(b"x\nEND\nY\nEND\nEND\nrest");
/// assert!(skip_to_token_bounded(b"END\nEND", 7, &mut stream).unwrap());
/// assert_eq!(stream.rest(), b"rest");
/// ```
///
/// # Errors
///
/// Fails before reading on an invalid token bound, and when the stream
/// fails.
pub fn skip_to_token_bounded<S: ByteStream + ?Sized>(
    token: &[u8],
    max_len: usize,
    stream: &mut S,
) -> Result<bool, ScanError<S::Error>> {
    let token = Token::bounded(token, max_len)?;
    check_rewind_limit(&token, stream)?;

    let origin = stream.bookmark();
    let result = skip(token.as_bytes(), stream);
    if let Ok(false) = result {
        if stream.can_rewind(origin) {
            stream.rewind(origin).map_err(ScanError::Stream)?;
        } else {
            debug!(
                offset = stream.offset(),
                "token absent; skipped bytes no longer replayable"
            );
        }
    }
    stream.release();
    result
}

fn skip<S: ByteStream + ?Sized>(token: &[u8], stream: &mut S) -> Result<bool, ScanError<S::Error>> {
    let mut state = MatchState::new(true);
    let mut bookmark: Option<Bookmark> = None;

    loop {
        let byte = pull(stream)?;
        if state.is_complete(token) {
            if matches!(byte, None | Some(NEWLINE)) {
                return Ok(true);
            }
        } else if let Some(b) = byte {
            if state.advance(token, b, true) {
                if state.line_start && bookmark.is_none() {
                    bookmark = Some(stream.bookmark());
                }
                continue;
            }
        }

        if state.index > 0 {
            state.index = 0;
            if let Some(mark) = bookmark.take() {
                trace!(
                    to = mark.offset(),
                    "partial multi-line match failed; rewinding"
                );
                stream.rewind(mark).map_err(ScanError::Stream)?;
                state.line_start = true;
                continue;
            }
        }
        let Some(b) = byte else {
            return Ok(false);
        };
        state.line_start = b == NEWLINE;
    }
}

/// Copies bytes from `stream` into `dst` until the first `max_len` bytes of
/// `token` are matched as a run of complete lines, the stream ends, or `dst`
/// fills up.
///
/// The token itself is consumed, not copied. `line_start` says whether the
/// cursor sits at the start of a line; when resuming after
/// [`Outcome::Truncated`], pass the previous [`Capture::line_start`]. The
/// cursor is always left at the first byte not yet accounted for, so a
/// sequence of resumed calls writes exactly what one call with a large
/// enough `dst` would.
///
/// ```rust
/// use sectscan::{Outcome, SliceStream, scan_capture};
///
/// let mut stream = SliceStream::new(b"1\n2\n### EXPECT\nNUM 1.00\n");
/// let mut buf = [0u8; 3];
/// let first = scan_capture(&mut buf, b"### EXPECT", 10, true, &mut stream).unwrap();
/// assert_eq!((first.outcome, &buf[..first.len]), (Outcome::Truncated, &b"1\n"[..]));
/// let rest = scan_capture(&mut buf, b"### EXPECT", 10, first.line_start, &mut stream).unwrap();
/// assert_eq!((rest.outcome, &buf[..rest.len]), (Outcome::Found, &b"2\n"[..]));
/// ```
///
/// # Errors
///
/// Fails before reading when `dst` is empty or the token bound is invalid,
/// and when the stream fails.
pub fn scan_capture<S: ByteStream + ?Sized>(
    dst: &mut [u8],
    token: &[u8],
    max_len: usize,
    line_start: bool,
    stream: &mut S,
) -> Result<Capture, ScanError<S::Error>> {
    let Some(room) = dst.len().checked_sub(1) else {
        return Err(ArgumentError::ZeroCapacity.into());
    };
    let token = Token::bounded(token, max_len)?;
    check_rewind_limit(&token, stream)?;
    let token = token.as_bytes();

    let mut written = 0;
    let mut state = MatchState::new(line_start);
    let mut attempt: Option<Bookmark> = None;
    let mut suppressed = false;

    let (outcome, line_start) = loop {
        let may_begin = state.index == 0 && state.line_start && !suppressed;
        if may_begin {
            attempt = Some(stream.bookmark());
        }
        let byte = pull(stream)?;

        if state.is_complete(token) && matches!(byte, None | Some(NEWLINE)) {
            stream.release();
            break (Outcome::Found, true);
        }
        if let Some(b) = byte {
            if state.advance(token, b, may_begin) {
                continue;
            }
        }

        let failed = state.index > 0;
        state.index = 0;
        if let Some(mark) = attempt.take() {
            if failed {
                trace!(to = mark.offset(), "partial match failed; replaying as content");
                stream.rewind(mark).map_err(ScanError::Stream)?;
                stream.release();
                state.line_start = true;
                suppressed = true;
                continue;
            }
            stream.release();
        }

        let Some(b) = byte else {
            break (Outcome::EndOfStream, state.line_start && !suppressed);
        };
        if written == room {
            stream.unread(b);
            break (Outcome::Truncated, state.line_start && !suppressed);
        }
        dst[written] = b;
        written += 1;
        suppressed = false;
        state.line_start = b == NEWLINE;
    };

    dst[written] = TERMINATOR;
    trace!(
        ?outcome,
        len = written,
        bytes = %ByteDump(&dst[..written]),
        "bounded capture finished"
    );
    Ok(Capture::new(outcome, written, line_start))
}

fn check_rewind_limit<S: ByteStream + ?Sized>(
    token: &Token<'_>,
    stream: &S,
) -> Result<(), ArgumentError> {
    let limit = stream.rewind_limit();
    if token.len() >= limit {
        return Err(ArgumentError::TokenExceedsRewindLimit {
            token_len: token.len(),
            limit,
        });
    }
    Ok(())
}
