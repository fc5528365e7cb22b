//! Boolean logic on integers. Any `i64` is accepted and the arithmetic
//! wraps on overflow.

use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;

/// 1 only when both are 1. Any other input produces any other number.
pub fn bool_and(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

/// The `a * b` term keeps `1 OR 1` from being 2.
pub fn bool_or(a: i64, b: i64) -> i64 {
    a.wrapping_add(b).wrapping_sub(a.wrapping_mul(b))
}

pub fn bool_not(a: i64) -> i64 {
    1i64.wrapping_sub(a)
}

pub fn bool_xor(a: i64, b: i64) -> i64 {
    a.wrapping_add(b) % 2
}

pub fn and_correct(a: bool, b: bool) -> bool {
    a && b
}

pub fn or_correct(a: bool, b: bool) -> bool {
    a || b
}

pub fn not_correct(a: bool) -> bool {
    !a
}

pub fn xor_correct(a: bool, b: bool) -> bool {
    a ^ b
}

const PAIRS: [(i64, i64); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

fn table(result: &mut CmdResult, title: &str, op: &str, f: fn(i64, i64) -> i64) {
    result.line(title.to_string());
    for (a, b) in PAIRS {
        result.line(format!("  {} {} {} = {}", a, op, b, f(a, b)));
    }
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    table(&mut result, "AND (multiplication):", "AND", bool_and);
    table(&mut result, "OR (a + b - a*b):", "OR", bool_or);
    result.line("NOT (1 - a):");
    for a in [1, 0] {
        result.line(format!("  NOT {} = {}", a, bool_not(a)));
    }
    table(&mut result, "XOR ((a + b) % 2):", "XOR", bool_xor);

    let agree = PAIRS.iter().all(|&(a, b)| {
        let (x, y) = (a == 1, b == 1);
        (bool_and(a, b) == 1) == and_correct(x, y)
            && (bool_or(a, b) == 1) == or_correct(x, y)
            && (bool_xor(a, b) == 1) == xor_correct(x, y)
            && (bool_not(a) == 1) == not_correct(x)
    });
    if agree {
        result.add_message(CmdMessage::success(
            "On 0 and 1 the arithmetic matches &&, ||, ! and ^.",
        ));
    }

    result.line("Invalid inputs:");
    result.line(format!(
        "  bool_and(5, 7) = {} (expected 0 or 1)",
        bool_and(5, 7)
    ));
    result.line(format!(
        "  bool_or(3, 4) = {} (expected 0 or 1)",
        bool_or(3, 4)
    ));
    result.add_message(CmdMessage::warning(
        "Nothing stops a 5 from being passed in. A bool has exactly two values and the compiler enforces it.",
    ));
    Ok(result)
}
