use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use crate::unwind::{self, panic_message};
use serde::Serialize;
use thiserror::Error;

const MAX_AGE: i64 = 150;
const SAMPLE_INPUTS: [&str; 5] = ["42", "", "abc", "-3", "200"];

/// Why an age was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeError {
    #[error("Empty input!")]
    Empty,
    #[error("Not a number!")]
    NotANumber,
    #[error("Age cannot be negative!")]
    Negative,
    #[error("That's too old!")]
    TooOld,
    #[error("Age must be between 0 and 150!")]
    OutOfRange,
    #[error("Invalid age!")]
    Invalid,
}

/// Every check is a panic, every decision a caught unwind, four levels deep.
pub fn read_age_nested(text: &str) -> std::result::Result<i64, AgeError> {
    let empty = unwind::quietly(|| {
        if text.is_empty() {
            panic!("empty");
        }
    });
    if empty.is_err() {
        return Err(AgeError::Empty);
    }

    let parsed = unwind::quietly(|| {
        let age: i64 = text
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("not a number"));

        let negative = unwind::quietly(|| {
            if age < 0 {
                panic!("negative");
            }
        });
        if negative.is_err() {
            return Err(AgeError::Negative);
        }

        let too_old = unwind::quietly(|| {
            if age > MAX_AGE {
                panic!("too_old");
            }
        });
        if too_old.is_err() {
            return Err(AgeError::TooOld);
        }

        Ok(age)
    });

    parsed.unwrap_or(Err(AgeError::NotANumber))
}

/// Panics on success too, then decides what happened by reading the
/// panic message.
pub fn read_age_even_worse(text: &str) -> std::result::Result<i64, AgeError> {
    let mut user_age = None;
    let caught = unwind::quietly(|| {
        let age: i64 = text.trim().parse().unwrap_or_else(|e| panic!("{}", e));
        user_age = Some(age);
        if (0..=MAX_AGE).contains(&age) {
            panic!("success");
        } else {
            panic!("invalid_range");
        }
    });

    let Err(payload) = caught else {
        return Err(AgeError::Invalid);
    };
    match panic_message(payload.as_ref()) {
        Some("success") => user_age.ok_or(AgeError::Invalid),
        Some("invalid_range") => Err(AgeError::OutOfRange),
        _ => Err(AgeError::Invalid),
    }
}

pub fn read_age(text: &str) -> std::result::Result<i64, AgeError> {
    if text.is_empty() {
        return Err(AgeError::Empty);
    }
    let age: i64 = text.trim().parse().map_err(|_| AgeError::NotANumber)?;
    if age < 0 {
        return Err(AgeError::Negative);
    }
    if age > MAX_AGE {
        return Err(AgeError::TooOld);
    }
    Ok(age)
}

/// One line per validator for `text`.
pub fn describe_all(text: &str) -> Vec<String> {
    let validators: [(&str, fn(&str) -> std::result::Result<i64, AgeError>); 3] = [
        ("nested panics", read_age_nested),
        ("panic on success", read_age_even_worse),
        ("plain if", read_age),
    ];
    validators
        .iter()
        .map(|(label, validate)| match validate(text) {
            Ok(age) => format!("  {:<17} Next year you will be: {}", label, age + 1),
            Err(err) => format!("  {:<17} {}", label, err),
        })
        .collect()
}

/// All three validators on one input.
pub fn check(text: &str) -> CmdResult {
    let mut result = CmdResult::default();
    result.line(format!("Input {:?}:", text));
    for line in describe_all(text) {
        result.line(line);
    }
    result
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for input in SAMPLE_INPUTS {
        result.output.extend(check(input).output);
    }

    let iterations = ctx.config.bench_iterations;
    let cursed = bench::repeat(iterations, || read_age_nested("-3"));
    let correct = bench::repeat(iterations, || read_age("-3"));
    result.add_comparison(Comparison::new(
        format!("{} rejections", iterations),
        cursed,
        correct,
    ));

    result.add_message(CmdMessage::warning(
        "Unwinding is for failures nobody planned for. A negative age is an if statement.",
    ));
    Ok(result)
}
