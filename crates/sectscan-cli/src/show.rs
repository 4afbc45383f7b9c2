//! Per-fill view of a fixture's sections.

use std::fmt;

use bstr::ByteSlice;
use sectscan::{
    ByteStream, Capture, EXPECT_MARKER, FixtureError, INPUT_MARKER, LineEnd, LineRead, Outcome,
    read_line, scan_capture, skip_to_token,
};
use serde::Serialize;
use tracing::debug;

/// One bounded capture call and the text it wrote.
#[derive(Debug, Serialize)]
pub struct Fill {
    #[serde(flatten)]
    pub capture: Capture,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub fills: Vec<Fill>,
    pub input: String,
    pub expect: String,
}

/// Captures the INPUT section in `chunk`-sized fills, then reads the EXPECT
/// section line by line through the same buffer.
///
/// `chunk` must be at least 2 so that every fill makes progress.
pub fn inspect<S: ByteStream + ?Sized>(
    stream: &mut S,
    chunk: usize,
) -> Result<SectionReport, FixtureError<S::Error>> {
    if !skip_to_token(INPUT_MARKER, stream)? {
        return Err(FixtureError::MissingInput);
    }

    let mut buf = vec![0u8; chunk];
    let mut fills = Vec::new();
    let mut input = Vec::new();
    let mut line_start = true;
    loop {
        let capture = scan_capture(
            &mut buf,
            EXPECT_MARKER,
            EXPECT_MARKER.len(),
            line_start,
            stream,
        )?;
        let written = &buf[..capture.len];
        debug!(?capture, "fill {}", fills.len());
        input.extend_from_slice(written);
        fills.push(Fill {
            capture,
            text: written.to_str_lossy().into_owned(),
        });
        line_start = capture.line_start;
        match capture.outcome {
            Outcome::Found => break,
            Outcome::EndOfStream => return Err(FixtureError::MissingExpect),
            Outcome::Truncated => {}
        }
    }

    let mut expect = Vec::new();
    while let LineRead::Line { len, end } = read_line(&mut buf, stream)? {
        expect.extend_from_slice(&buf[..len]);
        if end == LineEnd::EndOfStream {
            break;
        }
    }

    Ok(SectionReport {
        fills,
        input: input.to_str_lossy().into_owned(),
        expect: expect.to_str_lossy().into_owned(),
    })
}

impl fmt::Display for SectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fill) in self.fills.iter().enumerate() {
            let Capture {
                outcome,
                len,
                line_start,
            } = fill.capture;
            writeln!(
                f,
                "fill {i}: {outcome:?} len={len} line_start={line_start} [{}]",
                fill.text.escape_debug()
            )?;
        }
        for (name, text) in [("INPUT", &self.input), ("EXPECT", &self.expect)] {
            writeln!(f, "--- {name} ({} bytes)", text.len())?;
            f.write_str(text)?;
            if !text.is_empty() && !text.ends_with('\n') {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sectscan::SliceStream;

    use super::*;

    const FIXTURE: &[u8] = b"### INPUT\n1\n### EXPECT\nNUM 1.00\n";

    #[test]
    fn renders_each_fill() {
        let report = inspect(&mut SliceStream::new(FIXTURE), 2).unwrap();
        insta::assert_snapshot!(report, @r"
        fill 0: Truncated len=1 line_start=false [1]
        fill 1: Found len=1 line_start=true [\n]
        --- INPUT (2 bytes)
        1
        --- EXPECT (9 bytes)
        NUM 1.00
        ");
    }

    #[test]
    fn serializes_fills_with_their_capture() {
        let report = inspect(&mut SliceStream::new(FIXTURE), 32).unwrap();
        insta::assert_snapshot!(serde_json::to_string_pretty(&report).unwrap(), @r#"
        {
          "fills": [
            {
              "outcome": "Found",
              "len": 2,
              "line_start": true,
              "text": "1\n"
            }
          ],
          "input": "1\n",
          "expect": "NUM 1.00\n"
        }
        "#);
    }

    #[test]
    fn missing_markers_are_reported() {
        assert_eq!(
            inspect(&mut SliceStream::new(b"1\n"), 32).unwrap_err(),
            FixtureError::MissingInput
        );
        assert_eq!(
            inspect(&mut SliceStream::new(b"### INPUT\n1\n"), 32).unwrap_err(),
            FixtureError::MissingExpect
        );
    }
}
