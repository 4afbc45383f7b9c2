use std::fmt::Write;

use bstr::BStr;
use sectscan::{ByteDump, ByteStream, Outcome, SliceStream, scan_capture};

pub const FIXTURE: &[u8] = b"### INPUT\n1 + 2\n### EXPECT\nADD\n  NUM 1.00\n  NUM 2.00\n";

/// Renders every fill of a chunked capture, one line per call.
pub fn render_fills(stream: &mut SliceStream<'_>, token: &[u8], capacity: usize) -> String {
    let mut buf = vec![0u8; capacity];
    let mut out = String::new();
    let mut line_start = true;
    loop {
        let capture = scan_capture(&mut buf, token, token.len(), line_start, stream).unwrap();
        writeln!(
            out,
            "{:?} len={} line_start={}: {}",
            capture.outcome,
            capture.len,
            capture.line_start,
            ByteDump(&buf[..capture.len])
        )
        .unwrap();
        line_start = capture.line_start;
        if capture.outcome != Outcome::Truncated {
            break;
        }
    }
    writeln!(out, "offset: {}", stream.offset()).unwrap();
    writeln!(out, "rest: {:?}", BStr::new(stream.rest())).unwrap();
    out
}
