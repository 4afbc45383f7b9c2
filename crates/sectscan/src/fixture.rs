//! `.ast` test fixtures.
//!
//! A fixture holds a parser input and the AST dump it is expected to
//! produce:
//!
//! ```text
//! ### INPUT
//! 1
//! ### EXPECT
//! NUM 1.00
//! ```
//!
//! Anything before the `### INPUT` line is ignored. The INPUT section runs up
//! to the `### EXPECT` line and the EXPECT section runs to the end of the
//! file.

use alloc::{vec, vec::Vec};
use core::{convert::Infallible, fmt};

use bstr::{BStr, BString, ByteSlice};
use thiserror::Error;
use tracing::debug;

use crate::{
    error::ScanError,
    line::{LineEnd, LineRead, read_line},
    options::ExtractorOptions,
    section::SectionExtractor,
    stream::{ByteStream, SliceStream},
};

/// The line that opens the INPUT section.
pub const INPUT_MARKER: &[u8] = b"### INPUT";
/// The line that ends the INPUT section and opens the EXPECT section.
pub const EXPECT_MARKER: &[u8] = b"### EXPECT";

#[derive(Debug, Error, PartialEq)]
pub enum FixtureError<E> {
    #[error("fixture has no `### INPUT` line")]
    MissingInput,
    #[error("fixture has no `### EXPECT` line after its input")]
    MissingExpect,
    #[error(transparent)]
    Scan(#[from] ScanError<E>),
}

/// A parsed `.ast` fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fixture {
    pub input: BString,
    pub expect: BString,
}

/// The first line at which an actual dump departs from the EXPECT section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineMismatch {
    /// 1-based.
    pub line: usize,
    /// `None` when the EXPECT section has fewer lines.
    pub expected: Option<BString>,
    /// `None` when the actual dump has fewer lines.
    pub actual: Option<BString>,
}

impl fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(line: Option<&BString>) -> &BStr {
            line.map_or(b"<no line>".as_bstr(), |l| l.as_bstr())
        }
        write!(
            f,
            "line {}: expected `{}`, got `{}`",
            self.line,
            side(self.expected.as_ref()),
            side(self.actual.as_ref())
        )
    }
}

impl Fixture {
    /// Reads a fixture from the current position of `stream`.
    ///
    /// # Errors
    ///
    /// Fails when either marker is missing, when a section is larger than
    /// the default [`ExtractorOptions::max_section_len`], and when the
    /// stream fails.
    pub fn read<S: ByteStream + ?Sized>(stream: &mut S) -> Result<Self, FixtureError<S::Error>> {
        Self::read_with_options(stream, ExtractorOptions::default())
    }

    /// Like [`read`](Self::read), with explicit chunking and size limits.
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read).
    pub fn read_with_options<S: ByteStream + ?Sized>(
        stream: &mut S,
        options: ExtractorOptions,
    ) -> Result<Self, FixtureError<S::Error>> {
        let section = SectionExtractor::with_options(INPUT_MARKER, EXPECT_MARKER, options)
            .extract(stream)?;
        if !section.start_found {
            return Err(FixtureError::MissingInput);
        }
        if !section.end_found {
            return Err(FixtureError::MissingExpect);
        }
        let expect = read_remaining_lines(stream, options)?;
        debug!(
            input_len = section.content.len(),
            expect_len = expect.len(),
            "fixture read"
        );
        Ok(Fixture {
            input: section.content,
            expect: expect.into(),
        })
    }

    /// Reads a fixture held in memory.
    ///
    /// ```rust
    /// use sectscan::Fixture;
    ///
    /// let fixture = Fixture::parse(b"### INPUT\n1\n### EXPECT\nNUM 1.00\n").unwrap();
    /// assert_eq!(fixture.input, "1\n");
    /// assert_eq!(fixture.expect, "NUM 1.00\n");
    /// ```
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read).
    pub fn parse(bytes: &[u8]) -> Result<Self, FixtureError<Infallible>> {
        Self::read(&mut SliceStream::new(bytes))
    }

    /// Opens and reads the fixture at `path`.
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read); failing to open the file is a
    /// [`StreamError::Io`](crate::StreamError::Io).
    #[cfg(feature = "std")]
    pub fn open(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, FixtureError<crate::StreamError>> {
        let file = std::fs::File::open(path)
            .map_err(|err| ScanError::Stream(crate::StreamError::from(err)))?;
        Self::read(&mut crate::ReaderStream::new(file))
    }

    /// Compares `actual` with the EXPECT section line by line.
    ///
    /// Lines are compared byte for byte without their line feeds, so a
    /// missing final line feed is not a difference.
    #[must_use]
    pub fn first_mismatch(&self, actual: &[u8]) -> Option<LineMismatch> {
        let mut expected = self.expect.lines_with_terminator();
        let mut actual = actual.lines_with_terminator();
        let mut line = 0;
        loop {
            line += 1;
            let (e, a) = (expected.next().map(chomp), actual.next().map(chomp));
            match (e, a) {
                (None, None) => return None,
                (Some(e), Some(a)) if e == a => {}
                (e, a) => {
                    return Some(LineMismatch {
                        line,
                        expected: e.map(BString::from),
                        actual: a.map(BString::from),
                    });
                }
            }
        }
    }
}

fn chomp(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

/// Reads every line left in `stream`, one bounded [`read_line`] at a time.
fn read_remaining_lines<S: ByteStream + ?Sized>(
    stream: &mut S,
    options: ExtractorOptions,
) -> Result<Vec<u8>, ScanError<S::Error>> {
    let mut scratch = vec![0u8; options.chunk_capacity.max(2)];
    let mut out = Vec::new();
    while let LineRead::Line { len, end } = read_line(&mut scratch, stream)? {
        out.extend_from_slice(&scratch[..len]);
        if out.len() > options.max_section_len {
            return Err(ScanError::SectionTooLarge {
                limit: options.max_section_len,
            });
        }
        if end == LineEnd::EndOfStream {
            break;
        }
    }
    Ok(out)
}
