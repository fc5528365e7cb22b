use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use serde::Serialize;

const SAMPLE: &str = "hello";

/// How one character travels through the bit shuffle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitTrace {
    pub input: char,
    pub code: u32,
    /// Low byte, least significant bit first, as strings.
    pub bits: Vec<String>,
    pub rebuilt: u8,
    pub output: char,
}

/// Splits a character into eight bit strings, reverses them, then rebuilds
/// the byte with mirrored shifts. The two reversals cancel out.
pub fn explain_char(c: char) -> BitTrace {
    let code = c as u32;
    let mut bits: Vec<String> = (0..8).map(|i| ((code >> i) & 1).to_string()).collect();
    let lsb_first = bits.clone();
    bits.reverse();

    let mut rebuilt: u8 = 0;
    for (i, bit) in bits.iter().enumerate() {
        let bit: u8 = if bit == "1" { 1 } else { 0 };
        rebuilt |= bit << (7 - i);
    }

    BitTrace {
        input: c,
        code,
        bits: lsb_first,
        rebuilt,
        output: char::from(rebuilt),
    }
}

/// Correct for characters up to U+00FF. Anything wider keeps its low byte.
pub fn reverse_string_via_binary_shifts(text: &str) -> String {
    let mut shuffled: Vec<char> = text.chars().map(|c| explain_char(c).output).collect();
    shuffled.reverse();
    shuffled.into_iter().collect()
}

pub fn reverse_string(text: &str) -> String {
    text.chars().rev().collect()
}

pub fn reverse_string_verbose(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = chars.len();
    while i > 0 {
        i -= 1;
        result.push(chars[i]);
    }
    result
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    result.line(format!("Original:  {:?}", SAMPLE));
    result.line(format!("Expected:  {:?}", reverse_string(SAMPLE)));
    result.line(format!("Bit-wise:  {:?}", reverse_string_via_binary_shifts(SAMPLE)));

    result.line("Per character:");
    for c in SAMPLE.chars() {
        let trace = explain_char(c);
        result.line(format!(
            "  {:?} ({:3} = {:08b}) bits reversed and rebuilt -> {:08b} = {:?}",
            trace.input, trace.code, trace.code, trace.rebuilt, trace.output
        ));
    }

    let wide = "5€";
    result.line(format!(
        "Outside Latin-1: {:?} -> {:?} (expected {:?})",
        wide,
        reverse_string_via_binary_shifts(wide),
        reverse_string(wide)
    ));

    let iterations = ctx.config.bench_iterations;
    let cursed = bench::repeat(iterations, || reverse_string_via_binary_shifts(SAMPLE));
    let correct = bench::repeat(iterations, || reverse_string(SAMPLE));
    result.add_comparison(Comparison::new(
        format!("{} reversals", iterations),
        cursed,
        correct,
    ));

    result.add_message(CmdMessage::warning(
        "It only works because two mistakes cancel. Change one and every character breaks.",
    ));
    Ok(result)
}
