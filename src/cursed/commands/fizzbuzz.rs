use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;

const DEMO_LIMIT: u32 = 30;

/// FizzBuzz as a single expression of nested conditionals.
#[rustfmt::skip]
pub fn fizzbuzz(i: u32) -> String {
    if i % 15 == 0 { "FizzBuzz".to_string() }
    else { if i % 3 == 0 { "Fizz".to_string() }
        else { if i % 5 == 0 { "Buzz".to_string() }
            else { i.to_string() } } }
}

pub fn fizzbuzz_correct(i: u32) -> String {
    match (i % 3, i % 5) {
        (0, 0) => "FizzBuzz".to_string(),
        (0, _) => "Fizz".to_string(),
        (_, 0) => "Buzz".to_string(),
        _ => i.to_string(),
    }
}

/// Words for `1..=n`.
pub fn fizzbuzz_sequence(n: u32) -> Vec<String> {
    (1..=n).map(fizzbuzz).collect()
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_output(fizzbuzz_sequence(DEMO_LIMIT));

    let agree = (1..=DEMO_LIMIT).all(|i| fizzbuzz(i) == fizzbuzz_correct(i));
    if agree {
        result.add_message(CmdMessage::success(format!(
            "Nested conditionals agree with the match for 1..={}",
            DEMO_LIMIT
        )));
    }
    result.add_message(CmdMessage::info(
        "15 has to be checked first, or FizzBuzz never shows up.",
    ));
    result.add_message(CmdMessage::warning(
        "Adding a fourth rule means re-nesting every branch. A match on (i % 3, i % 5) adds one arm.",
    ));
    Ok(result)
}
