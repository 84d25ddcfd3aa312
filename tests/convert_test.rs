use pretty_assertions::assert_eq;
use std::io::BufReader;

use rsprop::convert::{decode, encode, LINES_PER_BYTE};

#[test]
fn test_encode_decode_round_trip() {
    let data: &[u8] = &[0x00, 0xFF, 0xA5, 0x42, 0x7F];

    let mut encoded = Vec::new();
    encode(data, &mut encoded).expect("encode");

    let text = String::from_utf8(encoded.clone()).expect("encoded output is text");
    assert_eq!(text.lines().count(), data.len() * LINES_PER_BYTE);

    let mut decoded = Vec::new();
    decode(BufReader::new(encoded.as_slice()), &mut decoded).expect("decode");
    assert_eq!(decoded, data);
}

#[test]
fn test_decode_fixed_lines() {
    // High bit first: T F T F T F T F is 0xAA.
    let input = "T\nF\nT\nF\nT\nF\nT\nF\n";
    let mut decoded = Vec::new();
    decode(BufReader::new(input.as_bytes()), &mut decoded).expect("decode");
    assert_eq!(decoded, vec![0xAA]);

    let input = "F\nF\nF\nF\nF\nF\nF\nT\n";
    let mut decoded = Vec::new();
    decode(BufReader::new(input.as_bytes()), &mut decoded).expect("decode");
    assert_eq!(decoded, vec![0x01]);
}

#[test]
fn test_decode_accepts_compound_lines() {
    // Every line is exact even though variables occur.
    let input = "p | ~p\np & ~p\nT & T\nF | F\n~F\n~T\nT -> T\nT -> F\n";
    let mut decoded = Vec::new();
    decode(BufReader::new(input.as_bytes()), &mut decoded).expect("decode");
    assert_eq!(decoded, vec![0b1010_1010]);
}

#[test]
fn test_decode_rejects_ragged_input() {
    let input = "T\nT\nT\n";
    let mut decoded = Vec::new();
    let err = decode(BufReader::new(input.as_bytes()), &mut decoded)
        .expect_err("line count must be a multiple of 8");
    assert!(err.to_string().contains("multiple of 8"));
}

#[test]
fn test_decode_rejects_blank_line() {
    let input = "T\nT\n\nT\nT\nT\nT\nT\n";
    let mut decoded = Vec::new();
    let err = decode(BufReader::new(input.as_bytes()), &mut decoded)
        .expect_err("blank lines are invalid");
    assert!(format!("{err:#}").contains("line 3"));
}

#[test]
fn test_decode_rejects_syntax_error() {
    let input = "T\nT\nT\nT\np &\nT\nT\nT\n";
    let mut decoded = Vec::new();
    let err = decode(BufReader::new(input.as_bytes()), &mut decoded)
        .expect_err("malformed expression is invalid");
    assert!(format!("{err:#}").contains("line 5"));
}

#[test]
fn test_decode_rejects_inexact_line() {
    let input = "T\nT\nT\nT\nT\nT\nT\np\n";
    let mut decoded = Vec::new();
    let err = decode(BufReader::new(input.as_bytes()), &mut decoded)
        .expect_err("an inexact expression has no bit value");
    let rendered = format!("{err:#}");
    assert!(rendered.contains("line 8"));
    assert!(rendered.contains("single value"));
}
