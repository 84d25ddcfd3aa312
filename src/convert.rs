use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use crate::generate::random_expression_with_value;
use crate::parser::parse;
use crate::TruthValue;

/// Lines of expression text per encoded byte, high bit first.
pub const LINES_PER_BYTE: usize = 8;

/// Variable and depth bounds used for every generated expression line.
const ENCODE_MAX_VARS: usize = 4;
const ENCODE_MAX_DEPTH: usize = 5;

/// Encodes a byte stream as boolean-expression text: each byte becomes
/// [`LINES_PER_BYTE`] lines, one random expression per bit, ordered from the
/// high bit to the low bit. Each expression evaluates exactly to its bit.
pub fn encode<W: Write>(data: &[u8], output: &mut W) -> Result<()> {
    for byte in data {
        for shift in (0..LINES_PER_BYTE).rev() {
            let bit = byte & (1 << shift) != 0;
            let expr =
                random_expression_with_value(ENCODE_MAX_VARS, ENCODE_MAX_DEPTH, bit.into())?;
            writeln!(output, "{expr}").context("failed to write to output")?;
        }
    }
    Ok(())
}

/// Decodes boolean-expression text produced by [`encode`] back into bytes.
///
/// Every line must parse to an expression with an exact value; every group
/// of [`LINES_PER_BYTE`] lines yields one byte. Errors name the offending
/// 1-based line number.
pub fn decode<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<()> {
    let lines: Vec<String> = input
        .lines()
        .collect::<std::io::Result<_>>()
        .context("failed to read from input")?;
    if lines.len() % LINES_PER_BYTE != 0 {
        bail!("number of input bits is not a multiple of {LINES_PER_BYTE}");
    }

    let mut byte: u8 = 0;
    for (index, line) in lines.iter().enumerate() {
        let line_num = index + 1;
        let bit = decode_line(line).with_context(|| format!("error on line {line_num}"))?;

        byte = (byte << 1) | u8::from(bit);
        if line_num % LINES_PER_BYTE == 0 {
            output
                .write_all(&[byte])
                .context("failed to write to output")?;
            byte = 0;
        }
    }
    Ok(())
}

fn decode_line(line: &str) -> Result<bool> {
    let line = line.trim();
    if line.is_empty() {
        bail!("line must not be blank");
    }
    let expr = parse(line)?.context("line holds no expression")?;
    let value = expr
        .exact_value()
        .context("expression does not evaluate to a single value")?;
    Ok(value == TruthValue::True)
}
