//! Arithmetic on strings of ASCII digits.
//!
//! Operands are never parsed into numbers. Every digit is turned into its
//! value by subtracting `b'0'` and back by adding it, carries and borrows are
//! tracked by hand, and division is repeated subtraction.

use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

pub const DEFAULT_PRECISION: usize = 5;

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());

const EXAMPLES: [(&str, &str, &str); 4] = [
    ("12.5", "3.4", "+"),
    ("20", "7", "-"),
    ("3.2", "1.5", "*"),
    ("10", "4", "/"),
];

pub fn string_calculator(x: &str, y: &str, op: &str) -> Result<String> {
    string_calculator_with_precision(x, y, op, DEFAULT_PRECISION)
}

/// `precision` is the number of fractional digits division keeps (truncated).
pub fn string_calculator_with_precision(
    x: &str,
    y: &str,
    op: &str,
    precision: usize,
) -> Result<String> {
    let a = Operand::parse(x)?;
    let b = Operand::parse(y)?;
    match op {
        "+" => Ok(add_strings(&a, &b)),
        "-" => Ok(subtract_strings(&a, &b)),
        "*" => Ok(multiply_strings(&a, &b)),
        "/" => divide_strings(&a, &b, precision),
        other => Err(CursedError::UnsupportedOperator(other.to_string())),
    }
}

pub fn calculator_correct(x: f64, y: f64, op: &str) -> Result<f64> {
    match op {
        "+" => Ok(x + y),
        "-" => Ok(x - y),
        "*" => Ok(x * y),
        "/" if y == 0.0 => Err(CursedError::DivisionByZero),
        "/" => Ok(x / y),
        other => Err(CursedError::UnsupportedOperator(other.to_string())),
    }
}

/// An unsigned decimal split at its point.
#[derive(Debug, Clone)]
struct Operand {
    int: String,
    frac: String,
}

impl Operand {
    fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if !DECIMAL.is_match(text) {
            return Err(CursedError::InvalidNumber(text.to_string()));
        }
        let (int, frac) = text.split_once('.').unwrap_or((text, ""));
        Ok(Self {
            int: int.to_string(),
            frac: frac.to_string(),
        })
    }
}

/// Pads both operands to the same integer and fractional width and glues
/// the halves together. Returns the digit strings and the shared scale.
fn align_decimals(a: &Operand, b: &Operand) -> (String, String, usize) {
    let scale = a.frac.len().max(b.frac.len());
    let width = a.int.len().max(b.int.len());
    let widen = |op: &Operand| {
        let mut digits = "0".repeat(width - op.int.len());
        digits.push_str(&op.int);
        digits.push_str(&op.frac);
        digits.push_str(&"0".repeat(scale - op.frac.len()));
        digits
    };
    (widen(a), widen(b), scale)
}

fn digit(c: u8) -> u32 {
    (c - b'0') as u32
}

fn to_char(d: u32) -> char {
    (b'0' + d as u8) as char
}

fn add_digits(a: &str, b: &str) -> String {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut carry = 0;
    let mut res = Vec::new();
    for i in 0..a.len().max(b.len()) {
        let da = if i < a.len() { digit(a[a.len() - 1 - i]) } else { 0 };
        let db = if i < b.len() { digit(b[b.len() - 1 - i]) } else { 0 };
        let total = da + db + carry;
        carry = total / 10;
        res.push(to_char(total % 10));
    }
    if carry > 0 {
        res.push(to_char(carry));
    }
    res.iter().rev().collect()
}

/// `a - b` for digit strings with `a >= b`.
fn subtract_digits(a: &str, b: &str) -> String {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut borrow = 0;
    let mut res = Vec::new();
    for i in 0..a.len() {
        let mut da = digit(a[a.len() - 1 - i]) as i32 - borrow;
        let db = if i < b.len() { digit(b[b.len() - 1 - i]) as i32 } else { 0 };
        if da < db {
            da += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        res.push(to_char((da - db) as u32));
    }
    strip_leading_zeros(&res.iter().rev().collect::<String>())
}

/// Orders digit strings by value, ignoring leading zeros.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(s: &str) -> String {
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Puts the decimal point `scale` digits from the right and tidies up.
fn place_point(digits: &str, scale: usize) -> String {
    let mut digits = digits.to_string();
    if digits.len() <= scale {
        digits.insert_str(0, &"0".repeat(scale - digits.len() + 1));
    }
    let split = digits.len() - scale;
    normalize_decimal(&format!("{}.{}", &digits[..split], &digits[split..]))
}

/// No leading zeros before the point (one `0` kept), no trailing zeros after
/// it, no dangling point.
pub fn normalize_decimal(s: &str) -> String {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = body.split_once('.').unwrap_or((body, ""));
    let int = strip_leading_zeros(int);
    let frac = frac.trim_end_matches('0');
    let out = if frac.is_empty() {
        int
    } else {
        format!("{}.{}", int, frac)
    };
    if out == "0" {
        out
    } else {
        format!("{}{}", sign, out)
    }
}

fn add_strings(a: &Operand, b: &Operand) -> String {
    let (a, b, scale) = align_decimals(a, b);
    place_point(&add_digits(&a, &b), scale)
}

fn subtract_strings(a: &Operand, b: &Operand) -> String {
    let (a, b, scale) = align_decimals(a, b);
    match compare_digits(&a, &b) {
        Ordering::Less => format!("-{}", place_point(&subtract_digits(&b, &a), scale)),
        _ => place_point(&subtract_digits(&a, &b), scale),
    }
}

fn multiply_strings(a: &Operand, b: &Operand) -> String {
    let scale = a.frac.len() + b.frac.len();
    let a = format!("{}{}", a.int, a.frac);
    let b = format!("{}{}", b.int, b.frac);

    let mut res = "0".to_string();
    for (shift, db) in b.bytes().rev().enumerate() {
        let mut carry = 0;
        let mut row: Vec<char> = vec!['0'; shift];
        for da in a.bytes().rev() {
            let prod = digit(da) * digit(db) + carry;
            carry = prod / 10;
            row.push(to_char(prod % 10));
        }
        if carry > 0 {
            row.push(to_char(carry));
        }
        res = add_digits(&res, &row.iter().rev().collect::<String>());
    }
    place_point(&res, scale)
}

fn divide_strings(a: &Operand, b: &Operand, precision: usize) -> Result<String> {
    let (dividend, divisor, _) = align_decimals(a, b);
    let divisor = strip_leading_zeros(&divisor);
    if divisor == "0" {
        return Err(CursedError::DivisionByZero);
    }

    let dividend = format!("{}{}", dividend, "0".repeat(precision));
    let mut quotient = String::new();
    let mut remainder = "0".to_string();
    for d in dividend.chars() {
        remainder = strip_leading_zeros(&format!("{}{}", remainder, d));
        let mut count = 0;
        while compare_digits(&remainder, &divisor) != Ordering::Less {
            remainder = subtract_digits(&remainder, &divisor);
            count += 1;
        }
        quotient.push(to_char(count));
    }
    Ok(place_point(&strip_leading_zeros(&quotient), precision))
}

fn parse_f64(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| CursedError::InvalidNumber(text.to_string()))
}

/// One calculation both ways. Division by zero is reported, not raised.
pub fn evaluate(x: &str, op: &str, y: &str, precision: usize) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let cursed = match string_calculator_with_precision(x, y, op, precision) {
        Err(CursedError::DivisionByZero) => CursedError::DivisionByZero.to_string(),
        other => other?,
    };
    let reference = match calculator_correct(parse_f64(x)?, parse_f64(y)?, op) {
        Err(CursedError::DivisionByZero) => CursedError::DivisionByZero.to_string(),
        other => other?.to_string(),
    };
    result.line(format!("strings: {} {} {} = {}", x, op, y, cursed));
    result.line(format!("f64:     {} {} {} = {}", x, op, y, reference));

    if normalize_decimal(&cursed) != normalize_decimal(&reference) {
        result.add_message(CmdMessage::info(
            "The two disagree in the last digits: strings truncate, f64 rounds in binary.",
        ));
    }
    Ok(result)
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let precision = ctx.config.precision;

    for (x, y, op) in EXAMPLES {
        let cursed = string_calculator_with_precision(x, y, op, precision)?;
        let reference = calculator_correct(parse_f64(x)?, parse_f64(y)?, op)?;
        result.line(format!("{} {} {} = {}  (f64 says {})", x, op, y, cursed, reference));
    }

    match string_calculator("1", "0", "/") {
        Err(e) => result.line(format!("1 / 0 -> {}", e)),
        Ok(v) => result.line(format!("1 / 0 -> {}", v)),
    }

    let iterations = (ctx.config.bench_iterations / 10).max(1);
    let cursed = bench::repeat(iterations, || string_calculator("1234.5678", "8.9", "/"));
    let correct = bench::repeat(iterations, || calculator_correct(1234.5678, 8.9, "/"));
    result.add_comparison(Comparison::new("1234.5678 / 8.9", cursed, correct));

    result.add_message(CmdMessage::info(
        "Division is repeated subtraction, one string allocation per step.",
    ));
    result.add_message(CmdMessage::warning(
        "Four match arms over f64 do all of this in a single instruction each.",
    ));
    Ok(result)
}
