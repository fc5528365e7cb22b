//! Fibonacci by naive double recursion, next to the two ways it should be
//! written.

use crate::bench;
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use std::collections::HashMap;
use std::time::Duration;

const GIVE_UP_AFTER: Duration = Duration::from_secs(5);
const MEMO_VALUES: [u32; 4] = [35, 40, 50, 100];

/// O(2^n). Recomputes every subproblem from scratch.
pub fn fibonacci(n: u32) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

/// Same recursion, also returning how many calls it took.
pub fn fibonacci_counted(n: u32) -> (u64, u64) {
    fn go(n: u32, calls: &mut u64) -> u64 {
        *calls += 1;
        match n {
            0 => 0,
            1 => 1,
            _ => go(n - 1, calls) + go(n - 2, calls),
        }
    }
    let mut calls = 0;
    let value = go(n, &mut calls);
    (value, calls)
}

/// Largest `n` whose Fibonacci number fits in a `u128`.
pub const MAX_FIB_U128: u32 = 186;

/// Same recursion with a memo table. O(n). `None` past [`MAX_FIB_U128`].
pub fn fib_memo(n: u32) -> Option<u128> {
    fn go(n: u32, memo: &mut HashMap<u32, u128>) -> Option<u128> {
        if n <= 1 {
            return Some(n as u128);
        }
        if let Some(v) = memo.get(&n) {
            return Some(*v);
        }
        let v = go(n - 1, memo)?.checked_add(go(n - 2, memo)?)?;
        memo.insert(n, v);
        Some(v)
    }
    if n > MAX_FIB_U128 {
        return None;
    }
    go(n, &mut HashMap::new())
}

/// O(n) time, O(1) space. `None` past [`MAX_FIB_U128`].
pub fn fib_iter(n: u32) -> Option<u128> {
    let (mut a, mut b) = (0u128, Some(1u128));
    for _ in 0..n {
        let current = b?;
        b = a.checked_add(current);
        a = current;
    }
    Some(a)
}

/// `1234567` -> `1,234,567`
pub fn with_commas(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let ceiling = ctx.config.fib_ceiling;

    result.line("Naive recursion (watch it slow down):");
    for n in (5..=ceiling).step_by(5) {
        let ((value, calls), elapsed) = bench::timed(|| fibonacci_counted(n));
        result.line(format!(
            "fib({:2}) = {:>10} | calls: {:>12} | {:>10.5}s",
            n,
            with_commas(value as u128),
            with_commas(calls as u128),
            elapsed.as_secs_f64()
        ));
        if elapsed > GIVE_UP_AFTER {
            result.add_message(CmdMessage::warning(format!(
                "Taking too long, stopped after fib({}).",
                n
            )));
            break;
        }
    }

    result.line("With a memo table:");
    for n in MEMO_VALUES {
        let (value, elapsed) = bench::timed(|| fib_memo(n));
        let value = value.map_or_else(|| "overflows u128".to_string(), with_commas);
        result.line(format!(
            "fib({:3}) = {:>27} | {:>10.7}s",
            n,
            value,
            elapsed.as_secs_f64()
        ));
    }

    let probe = ceiling.min(25);
    let (_, cursed) = bench::timed(|| fibonacci(probe));
    let (_, correct) = bench::timed(|| fib_iter(probe));
    result.add_comparison(bench::Comparison::new(format!("fib({})", probe), cursed, correct));

    result.add_message(CmdMessage::info(
        "fib(n) makes about 1.6^n calls. A memo table makes it n.",
    ));
    Ok(result)
}
