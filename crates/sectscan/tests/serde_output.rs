#![expect(missing_docs)]

use sectscan::{Fixture, Outcome, SectionExtractor, SliceStream, scan_capture};

#[test]
fn capture_serializes_as_a_flat_record() {
    let mut stream = SliceStream::new(b"1\n### EXPECT\n");
    let mut buf = [0u8; 8];
    let capture = scan_capture(&mut buf, b"### EXPECT", 10, true, &mut stream).unwrap();
    insta::assert_snapshot!(
        serde_json::to_string(&capture).unwrap(),
        @r#"{"outcome":"Found","len":2,"line_start":true}"#
    );
    insta::assert_snapshot!(
        serde_json::to_string(&Outcome::Truncated).unwrap(),
        @r#""Truncated""#
    );
}

#[test]
fn sections_serialize_content_as_bytes() {
    let mut stream = SliceStream::new(b"### INPUT\n1\n### EXPECT\n");
    let section = SectionExtractor::new(b"### INPUT", b"### EXPECT")
        .extract(&mut stream)
        .unwrap();
    insta::assert_snapshot!(
        serde_json::to_string(&section).unwrap(),
        @r#"{"content":[49,10],"start_found":true,"end_found":true}"#
    );

    let fixture = Fixture::parse(b"### INPUT\n1\n### EXPECT\nA\n").unwrap();
    insta::assert_snapshot!(
        serde_json::to_string(&fixture).unwrap(),
        @r#"{"input":[49,10],"expect":[65,10]}"#
    );
}
