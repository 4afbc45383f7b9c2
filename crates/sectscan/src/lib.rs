//! Bounded-memory scanning of line-delimited sections in byte streams.
//!
//! A section is the run of bytes between two *tokens*: exact byte strings
//! that only count when they make up whole lines. Tokens may span several
//! lines, so a scanner that has matched part of a token and then fails must
//! go back and retry from the next line start; streams support this through
//! [`Bookmark`]s.
//!
//! The scanners never allocate. They write into caller buffers, always
//! terminate what they wrote with [`TERMINATOR`], and report through
//! [`Outcome::Truncated`] when a buffer filled up so the caller can resume.
//! [`SectionExtractor`] and [`Fixture`] build growable sections on top of
//! that.
//!
//! ```rust
//! use sectscan::{Outcome, SliceStream, scan_capture, skip_to_token};
//!
//! let mut stream = SliceStream::new(b"### INPUT\n1\n### EXPECT\nNUM 1.00\n");
//! assert!(skip_to_token(b"### INPUT", &mut stream).unwrap());
//!
//! let mut buf = [0u8; 32];
//! let capture = scan_capture(&mut buf, b"### EXPECT", 10, true, &mut stream).unwrap();
//! assert_eq!(capture.outcome, Outcome::Found);
//! assert_eq!(&buf[..=capture.len], b"1\n\0");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod copy;
mod dump;
mod error;
mod fixture;
mod line;
mod matcher;
mod options;
mod outcome;
mod section;
mod stream;
mod token;

#[cfg(test)]
mod tests;

pub use copy::{copy_until_token, resume_copy_until_token};
pub use dump::ByteDump;
pub use error::{ArgumentError, ScanError};
pub use fixture::{EXPECT_MARKER, Fixture, FixtureError, INPUT_MARKER, LineMismatch};
pub use line::{LineEnd, LineRead, read_line};
pub use matcher::{scan_capture, skip_to_token, skip_to_token_bounded};
pub use options::{ExtractorOptions, StreamOptions};
pub use outcome::{Capture, Outcome};
pub use section::{Section, SectionExtractor};
#[cfg(feature = "std")]
pub use stream::{ReaderStream, StreamError};
pub use stream::{Bookmark, ByteStream, Pushback, SliceStream};
pub use token::Token;

/// Byte that ends a line.
pub const NEWLINE: u8 = b'\n';

/// Byte written after the last byte stored in a destination buffer.
///
/// Tokens must not contain it.
pub const TERMINATOR: u8 = 0;
