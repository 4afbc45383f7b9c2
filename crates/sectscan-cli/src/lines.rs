//! The line-slurp dump.

use std::fmt::Write;

use bstr::ByteSlice;
use sectscan::{ByteStream, LineRead, ScanError, read_line};

/// Reads `stream` one bounded line at a time and labels every read with its
/// length.
///
/// Reads ending in a line feed print as `len: [text]`; reads cut short by
/// the buffer or the end of the stream get a trailing `-\n` marker.
pub fn dump_lines<S: ByteStream + ?Sized>(
    stream: &mut S,
    buffer: usize,
) -> Result<String, ScanError<S::Error>> {
    let mut buf = vec![0u8; buffer];
    let mut out = String::new();
    while let LineRead::Line { len, .. } = read_line(&mut buf, stream)? {
        let text = &buf[..len];
        let _ = match text.strip_suffix(b"\n") {
            Some(line) => writeln!(out, "{len:2}: [{}]", line.as_bstr()),
            None => writeln!(out, r"{len:2}: [{}]-\n", text.as_bstr()),
        };
    }
    out.push_str("EOF\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use sectscan::SliceStream;

    use super::*;

    #[test]
    fn labels_every_read() {
        let mut stream = SliceStream::new(b"### INPUT\n1\n### EXPECT\nNUM 1.00\n");
        insta::assert_snapshot!(dump_lines(&mut stream, 8).unwrap(), @r"
         7: [### INP]-\n
         3: [UT]
         2: [1]
         7: [### EXP]-\n
         4: [ECT]
         7: [NUM 1.0]-\n
         2: [0]
        EOF
        ");
    }

    #[test]
    fn unterminated_last_line_is_marked() {
        let mut stream = SliceStream::new(b"a\n\nb");
        insta::assert_snapshot!(dump_lines(&mut stream, 32).unwrap(), @r"
         2: [a]
         1: []
         1: [b]-\n
        EOF
        ");
    }
}
