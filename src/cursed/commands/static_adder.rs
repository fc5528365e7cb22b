use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;

/// Provider of the number two.
pub struct InputProvider;

impl InputProvider {
    pub fn execute() -> i64 {
        2
    }
}

/// Provider of the number three. A separate type, because reuse is overrated.
pub struct SecondInputProvider;

impl SecondInputProvider {
    pub fn execute() -> i64 {
        3
    }
}

/// The `+` operator wearing a type.
pub struct AddOperation;

impl AddOperation {
    pub fn execute(a: i64, b: i64) -> i64 {
        a + b
    }
}

pub struct PrintOperation;

impl PrintOperation {
    pub fn execute(value: i64) -> String {
        value.to_string()
    }
}

/// Four types, no state, one addition.
pub fn orchestrate() -> (i64, String) {
    let a = InputProvider::execute();
    let b = SecondInputProvider::execute();
    let sum = AddOperation::execute(a, b);
    (sum, PrintOperation::execute(sum))
}

pub fn add_correct() -> i64 {
    2 + 3
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let (sum, line) = orchestrate();
    result.line("InputProvider -> SecondInputProvider -> AddOperation -> PrintOperation:");
    result.line(format!("  {}", line));
    result.line("2 + 3:");
    result.line(format!("  {}", add_correct()));

    if sum == add_correct() {
        result.add_message(CmdMessage::success("Still 5."));
    }
    result.add_message(CmdMessage::info(
        "Types without state or invariants are just functions with extra steps.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn orchestration_still_makes_five() {
        assert_eq!(orchestrate(), (5, "5".to_string()));
        assert_eq!(orchestrate().0, add_correct());
    }

    #[test]
    fn run_prints_both() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert_eq!(result.output.iter().filter(|l| l.trim() == "5").count(), 2);
    }
}
