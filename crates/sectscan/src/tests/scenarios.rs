//! End-to-end runs over the `.ast` layout.

use alloc::vec::Vec;

use rstest::rstest;

use crate::{
    ArgumentError, Capture, ExtractorOptions, Outcome, SectionExtractor, SliceStream,
    copy_until_token, scan_capture, skip_to_token,
};

const FIXTURE: &[u8] = b"### INPUT\n1\n### EXPECT\nNUM 1.00\n";

#[test]
fn absent_start_token_keeps_the_cursor() {
    let mut stream = SliceStream::new(b"1\n### EXPECT\n");
    assert!(!skip_to_token(b"### INPUT", &mut stream).unwrap());
    assert_eq!(stream.rest(), b"1\n### EXPECT\n");
}

#[test]
fn copies_the_input_section() {
    let mut stream = SliceStream::new(FIXTURE);
    assert!(skip_to_token(b"### INPUT", &mut stream).unwrap());
    let mut buf = [0u8; 16];
    let capture = copy_until_token(&mut buf, b"### EXPECT", &mut stream).unwrap();
    assert_eq!(capture.outcome, Outcome::Found);
    assert_eq!(&buf[..=capture.len], b"1\n\0");
}

#[test]
fn one_byte_buffer_truncates_then_enlarging_finishes() {
    let mut stream = SliceStream::new(FIXTURE);
    assert!(skip_to_token(b"### INPUT", &mut stream).unwrap());

    let mut buf = Vec::from([0u8; 1]);
    let first = scan_capture(&mut buf, b"### EXPECT", 10, true, &mut stream).unwrap();
    assert_eq!(first, Capture { outcome: Outcome::Truncated, len: 0, line_start: true });

    buf.resize(2, 0);
    let mut out = Vec::new();
    let mut line_start = first.line_start;
    loop {
        let capture = scan_capture(&mut buf, b"### EXPECT", 10, line_start, &mut stream).unwrap();
        out.extend_from_slice(&buf[..capture.len]);
        line_start = capture.line_start;
        if capture.outcome != Outcome::Truncated {
            assert_eq!(capture.outcome, Outcome::Found);
            break;
        }
    }
    assert_eq!(out, b"1\n");
    assert_eq!(stream.rest(), b"NUM 1.00\n");
}

#[test]
fn extractor_grows_a_one_byte_scratch() {
    let mut stream = SliceStream::new(FIXTURE);
    let options = ExtractorOptions {
        chunk_capacity: 1,
        ..ExtractorOptions::default()
    };
    let section = SectionExtractor::with_options(b"### INPUT", b"### EXPECT", options)
        .extract(&mut stream)
        .unwrap();
    assert_eq!(section.content, "1\n");
    assert!(section.end_found);
}

#[rstest]
#[case(b"### EXPECT")]
#[case(b"### EXPECT\n")]
fn token_line_exactly_fills_the_buffer(#[case] tail: &[u8]) {
    let mut input = b"x\n".to_vec();
    input.extend_from_slice(tail);
    let mut stream = SliceStream::new(&input);
    // After "x\n" there is room for the token and the terminator, nothing more.
    let mut buf = [0u8; 13];
    let capture = copy_until_token(&mut buf, b"### EXPECT", &mut stream).unwrap();
    assert_eq!(capture, Capture { outcome: Outcome::Found, len: 2, line_start: true });
    assert_eq!(stream.rest(), b"");
}

#[test]
fn buffer_one_short_of_the_token_is_rejected() {
    let mut stream = SliceStream::new(FIXTURE);
    let mut buf = [0u8; 10];
    let err = copy_until_token(&mut buf, b"### EXPECT", &mut stream).unwrap_err();
    assert_eq!(
        err.as_argument(),
        Some(ArgumentError::BufferTooSmallForToken { capacity: 10, token_len: 10 })
    );
}
