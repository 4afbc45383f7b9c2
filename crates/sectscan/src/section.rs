//! Assembling a whole section out of bounded captures.

use alloc::{vec, vec::Vec};

use bstr::{BString, ByteSlice};
use tracing::{debug, trace};

use crate::{
    error::{ArgumentError, ScanError},
    matcher::{scan_capture, skip_to_token},
    options::ExtractorOptions,
    outcome::Outcome,
    stream::ByteStream,
};

/// The bytes between a start token and an end token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    pub content: BString,
    pub start_found: bool,
    /// When `false`, `content` runs to the end of the stream.
    pub end_found: bool,
}

impl Section {
    /// Whether both delimiting tokens were seen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.start_found && self.end_found
    }
}

/// Extracts the section between two line tokens.
///
/// The start token is skipped with [`skip_to_token`]; the content up to the
/// end token is then gathered with repeated [`scan_capture`] calls into a
/// fixed-size scratch buffer, so memory use per call stays bounded while the
/// assembled section may be much larger.
///
/// ```rust
/// use sectscan::{SectionExtractor, SliceStream};
///
/// let mut stream = SliceStream::new(b"### INPUT\n1\n### EXPECT\nNUM 1.00\n");
/// let section = SectionExtractor::new(b"### INPUT", b"### EXPECT")
///     .extract(&mut stream)
///     .unwrap();
/// assert!(section.is_complete());
/// assert_eq!(section.content, "1\n");
/// ```
#[derive(Debug, Clone)]
pub struct SectionExtractor<'t> {
    start: &'t [u8],
    end: &'t [u8],
    options: ExtractorOptions,
}

impl<'t> SectionExtractor<'t> {
    #[must_use]
    pub fn new(start: &'t [u8], end: &'t [u8]) -> Self {
        Self::with_options(start, end, ExtractorOptions::default())
    }

    #[must_use]
    pub fn with_options(start: &'t [u8], end: &'t [u8], options: ExtractorOptions) -> Self {
        Self {
            start,
            end,
            options,
        }
    }

    /// Skips past the start token, then captures up to the end token.
    ///
    /// A missing start token yields an empty section with `start_found` unset
    /// and the cursor restored as far as the stream allows; a missing end
    /// token yields everything after the start token. Whether either is an
    /// error is up to the caller.
    ///
    /// # Errors
    ///
    /// Fails on invalid tokens or options, when the section outgrows
    /// [`ExtractorOptions::max_section_len`], and when the stream fails.
    pub fn extract<S: ByteStream + ?Sized>(
        &self,
        stream: &mut S,
    ) -> Result<Section, ScanError<S::Error>> {
        if !skip_to_token(self.start, stream)? {
            debug!(start = %self.start.as_bstr(), "start token not found");
            return Ok(Section::default());
        }
        let mut content = Vec::new();
        let end_found = self.capture_into(&mut content, stream)?;
        Ok(Section {
            content: content.into(),
            start_found: true,
            end_found,
        })
    }

    /// Appends everything up to the end token to `out`, starting at the
    /// current cursor, which must sit at a line start.
    ///
    /// Returns whether the end token was found.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn capture_into<S: ByteStream + ?Sized>(
        &self,
        out: &mut Vec<u8>,
        stream: &mut S,
    ) -> Result<bool, ScanError<S::Error>> {
        if self.options.chunk_capacity == 0 {
            return Err(ArgumentError::ZeroCapacity.into());
        }
        let mut scratch = vec![0u8; self.options.chunk_capacity];
        let base = out.len();
        let mut line_start = true;

        loop {
            let capture = scan_capture(&mut scratch, self.end, self.end.len(), line_start, stream)?;
            out.extend_from_slice(&scratch[..capture.len]);
            trace!(outcome = ?capture.outcome, len = capture.len, total = out.len() - base, "section chunk");
            if out.len() - base > self.options.max_section_len {
                return Err(ScanError::SectionTooLarge {
                    limit: self.options.max_section_len,
                });
            }

            match capture.outcome {
                Outcome::Found => {
                    debug!(len = out.len() - base, "section complete");
                    return Ok(true);
                }
                Outcome::EndOfStream => {
                    debug!(end = %self.end.as_bstr(), "end token not found before end of stream");
                    return Ok(false);
                }
                Outcome::Truncated => {
                    if capture.len == 0 {
                        let grown = scratch.len() * 2;
                        trace!(capacity = grown, "no progress; enlarging scratch buffer");
                        scratch.resize(grown, 0);
                    }
                    line_start = capture.line_start;
                }
            }
        }
    }
}
