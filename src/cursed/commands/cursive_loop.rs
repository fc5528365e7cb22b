//! A `for` loop where every iteration is one recursive call deeper.

use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};

/// Half-open `start..end` walked by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl LoopRange {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }
}

/// Calls `action` for each index, recursing once per iteration.
///
/// Fails with [`CursedError::RecursionLimit`] once the recursion gets deeper
/// than `limit`. A step that never reaches `end` therefore fails instead of
/// spinning forever.
pub fn cursive_for<F>(range: LoopRange, limit: usize, action: &mut F) -> Result<()>
where
    F: FnMut(i64),
{
    cursive_step(range.start, range, 0, limit, action)
}

fn cursive_step<F>(index: i64, range: LoopRange, depth: usize, limit: usize, action: &mut F) -> Result<()>
where
    F: FnMut(i64),
{
    if index >= range.end {
        return Ok(());
    }
    if depth >= limit {
        return Err(CursedError::RecursionLimit(depth));
    }
    action(index);
    cursive_step(index.saturating_add(range.step), range, depth + 1, limit, action)
}

/// Non-positive steps produce no iterations.
pub fn native_for<F>(range: LoopRange, mut action: F)
where
    F: FnMut(i64),
{
    let step = match usize::try_from(range.step) {
        Ok(step) if step > 0 => step,
        _ => return,
    };
    for i in (range.start..range.end).step_by(step) {
        action(i);
    }
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let limit = ctx.config.recursion_limit;

    let mut lines = Vec::new();
    cursive_for(LoopRange::new(0, 5, 1), limit, &mut |i| {
        lines.push(format!("Value: {}", i))
    })?;
    let mut reference = Vec::new();
    native_for(LoopRange::new(0, 5, 1), |i| reference.push(format!("Value: {}", i)));
    result.output.extend(lines);
    if result.output == reference {
        result.add_message(CmdMessage::success("Same five values as a plain for loop."));
    }

    result.line(format!("Recursion limit: {}", limit));
    result.line("Trying to loop 2000 times...");
    let mut count = 0;
    let outcome = cursive_for(LoopRange::new(0, 2000, 1), limit, &mut |_| count += 1);
    match outcome {
        Ok(()) => result.line("Success! (the limit was raised)"),
        Err(e) => {
            result.line(format!("{} after {} iterations", e, count));
            result.line("A normal for loop would handle this just fine.");
        }
    }

    result.line("Nested loops:");
    let mut nested = Vec::new();
    cursive_for(LoopRange::new(0, 3, 1), limit, &mut |outer| {
        nested.push(format!("Outer: {}", outer));
        let inner = cursive_for(LoopRange::new(0, 2, 1), limit, &mut |inner| {
            nested.push(format!("  Inner: {}", inner))
        });
        if let Err(e) = inner {
            nested.push(format!("  Inner loop failed: {}", e));
        }
    })?;
    result.output.extend(nested);

    result.add_message(CmdMessage::info(
        "The index is a parameter here, so nesting works. With a shared global counter it does not.",
    ));
    result.add_message(CmdMessage::warning(
        "Every iteration costs a stack frame. for i in start..end costs none.",
    ));
    Ok(result)
}
