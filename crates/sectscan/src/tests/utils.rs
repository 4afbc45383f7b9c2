use alloc::{vec, vec::Vec};

use crate::{ByteStream, Outcome, TERMINATOR, resume_copy_until_token, scan_capture};

/// Where a token is expected to split `data`, found by brute force.
#[derive(Debug, PartialEq, Eq)]
pub struct Split<'a> {
    pub found: bool,
    pub captured: &'a [u8],
    pub rest: &'a [u8],
}

/// Splits `data` at the first line start followed by `token` and then a line
/// feed or the end of the data.
pub fn reference_split<'a>(data: &'a [u8], token: &[u8]) -> Split<'a> {
    let at = (0..data.len())
        .filter(|&p| p == 0 || data[p - 1] == b'\n')
        .find(|&p| {
            data[p..].starts_with(token) && matches!(data.get(p + token.len()), None | Some(b'\n'))
        });
    match at {
        Some(p) => Split {
            found: true,
            captured: &data[..p],
            rest: &data[(p + token.len() + 1).min(data.len())..],
        },
        None => Split {
            found: false,
            captured: data,
            rest: &[],
        },
    }
}

/// Drives [`scan_capture`] with `capacity`-sized buffers until it stops
/// truncating.
pub fn capture_chunked<S: ByteStream + ?Sized>(
    stream: &mut S,
    token: &[u8],
    capacity: usize,
) -> (Vec<u8>, Outcome)
where
    S::Error: core::fmt::Debug,
{
    let mut buf = vec![0u8; capacity];
    let mut out = Vec::new();
    let mut line_start = true;
    loop {
        let capture = scan_capture(&mut buf, token, token.len(), line_start, stream).unwrap();
        assert_eq!(buf[capture.len], TERMINATOR);
        out.extend_from_slice(&buf[..capture.len]);
        line_start = capture.line_start;
        if !capture.is_truncated() {
            return (out, capture.outcome);
        }
    }
}

/// Drives [`resume_copy_until_token`] with `capacity`-sized buffers until it
/// stops truncating.
pub fn copy_chunked<S: ByteStream + ?Sized>(
    stream: &mut S,
    token: &[u8],
    capacity: usize,
) -> (Vec<u8>, Outcome)
where
    S::Error: core::fmt::Debug,
{
    let mut buf = vec![0u8; capacity];
    let mut out = Vec::new();
    let mut line_start = true;
    loop {
        let capture = resume_copy_until_token(&mut buf, token, line_start, stream).unwrap();
        assert_eq!(buf[capture.len], TERMINATOR);
        out.extend_from_slice(&buf[..capture.len]);
        line_start = capture.line_start;
        if !capture.is_truncated() {
            return (out, capture.outcome);
        }
    }
}

/// Reads whatever is left in `stream`.
pub fn drain<S: ByteStream + ?Sized>(stream: &mut S) -> Vec<u8>
where
    S::Error: core::fmt::Debug,
{
    let mut out = Vec::new();
    while let Some(byte) = stream.next_byte().unwrap() {
        out.push(byte);
    }
    out
}
