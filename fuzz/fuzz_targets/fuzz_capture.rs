#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sectscan::{
    ByteStream, Outcome, ReaderStream, SliceStream, StreamOptions, resume_copy_until_token,
    scan_capture,
};

const HEADER: usize = 8; // token pick + span + 4-byte split seed + 2-byte replay limit

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Lines that make full and partial token matches likely.
static LINE_TABLE: &[&[u8]] = &[
    b"### INPUT\n",
    b"### EXPECT\n",
    b"### EXP\n",
    b"### EXPECTED\n",
    b"END\n",
    b"END",
    b"EN\n",
    b"\n",
    b"x\n",
    b"NUM 1.00\n",
    b"#",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size < HEADER {
        return fuzzer_mutate(data, size, max_size);
    }
    if size < HEADER || seed.is_multiple_of(10) {
        with_rng(|rng| rng.fill_bytes(&mut data[..HEADER]));

        let mut prefix = HEADER;
        let target = size.clamp(HEADER + 1, max_size);
        while prefix < target {
            let line = with_rng(|rng| LINE_TABLE[rng.random_range(0..LINE_TABLE.len())]);
            let len = line.len().min(max_size - prefix);
            data[prefix..prefix + len].copy_from_slice(&line[..len]);
            prefix += len;
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Plan {
    token_line: u8,
    span: u8,
    split_seed: u32,
    replay_limit: u16,
}

/// One to three consecutive lines of `doc`, without the final line feed.
fn pick_token(doc: &[u8], line: u8, span: u8) -> &[u8] {
    let starts: Vec<usize> = std::iter::once(0)
        .chain(doc.iter().enumerate().filter(|&(_, &b)| b == b'\n').map(|(i, _)| i + 1))
        .filter(|&p| p < doc.len())
        .collect();
    if starts.is_empty() {
        return b"### EXPECT";
    }
    let first = starts[usize::from(line) % starts.len()];
    let last = (usize::from(line) % starts.len() + 1 + usize::from(span % 3)).min(starts.len());
    let end = starts.get(last).copied().unwrap_or(doc.len());
    let token = &doc[first..end];
    token.strip_suffix(b"\n").unwrap_or(token)
}

/// Eight capacities of `min` plus 0 to 15, drawn from `seed`.
fn capacities(seed: u32, min: usize) -> Vec<usize> {
    (0..8)
        .map(|i| min + ((seed >> (i * 4)) & 0xF) as usize)
        .collect()
}

type Split = (Vec<u8>, Outcome, Vec<u8>);

fn drain<S: ByteStream>(stream: &mut S) -> Vec<u8>
where
    S::Error: std::fmt::Debug,
{
    let mut rest = Vec::new();
    while let Some(byte) = stream.next_byte().unwrap() {
        rest.push(byte);
    }
    rest
}

fn capture<S: ByteStream>(stream: &mut S, token: &[u8], capacities: &[usize]) -> Split
where
    S::Error: std::fmt::Debug,
{
    let mut out = Vec::new();
    let mut line_start = true;
    for &capacity in capacities.iter().cycle() {
        let mut buf = vec![0xffu8; capacity];
        let capture = scan_capture(&mut buf, token, token.len(), line_start, stream).unwrap();
        assert_eq!(buf[capture.len], 0);
        out.extend_from_slice(&buf[..capture.len]);
        line_start = capture.line_start;
        if capture.outcome != Outcome::Truncated {
            return (out, capture.outcome, drain(stream));
        }
    }
    unreachable!("cycle never ends")
}

fn copy<S: ByteStream>(stream: &mut S, token: &[u8], capacities: &[usize]) -> Split
where
    S::Error: std::fmt::Debug,
{
    let mut out = Vec::new();
    let mut line_start = true;
    for &capacity in capacities.iter().cycle() {
        let mut buf = vec![0xffu8; capacity];
        let capture = resume_copy_until_token(&mut buf, token, line_start, stream).unwrap();
        out.extend_from_slice(&buf[..capture.len]);
        line_start = capture.line_start;
        if capture.outcome != Outcome::Truncated {
            return (out, capture.outcome, drain(stream));
        }
    }
    unreachable!("cycle never ends")
}

fn capture_consistency(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let Ok(plan) = Plan::arbitrary(&mut Unstructured::new(&data[..HEADER])) else {
        return;
    };
    let doc = &data[HEADER..];
    let token = pick_token(doc, plan.token_line, plan.span);
    if token.is_empty() || token.contains(&0) {
        return;
    }

    let single = capture(&mut SliceStream::new(doc), token, &[doc.len() + 2]);
    let chunked = capture(&mut SliceStream::new(doc), token, &capacities(plan.split_seed, 2));
    assert_eq!(single, chunked);

    let options = StreamOptions {
        replay_limit: usize::from(plan.replay_limit).max(token.len() + 1),
    };
    let mut reader = ReaderStream::with_options(doc, options);
    assert_eq!(single, capture(&mut reader, token, &capacities(plan.split_seed, 2)));

    if !token.contains(&b'\n') {
        let copied = copy(
            &mut SliceStream::new(doc),
            token,
            &capacities(plan.split_seed, token.len() + 1),
        );
        assert_eq!(single, copied);
    }
}

fuzz_target!(|data: &[u8]| capture_consistency(data));
