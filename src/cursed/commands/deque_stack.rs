use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};
use std::collections::VecDeque;

/// A "stack built from a queue" that uses the back of a double-ended queue
/// for both push and pop. It is a stack because a deque already is one.
#[derive(Debug, Default)]
pub struct StackUsingQueueWrongEnd<T> {
    queue: VecDeque<T>,
}

impl<T> StackUsingQueueWrongEnd<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.queue.push_back(value);
    }

    pub fn pop(&mut self) -> Result<T> {
        self.queue
            .pop_back()
            .ok_or(CursedError::Empty("pop from empty stack"))
    }

    pub fn peek(&self) -> Result<&T> {
        self.queue
            .back()
            .ok_or(CursedError::Empty("peek from empty stack"))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// A stack that keeps to queue operations: `push_back` and `pop_front`.
///
/// Each push rotates the older elements behind the new one, so the front is
/// always the top. Push is O(n), pop and peek are O(1).
#[derive(Debug, Default)]
pub struct StackUsingQueue<T> {
    queue: VecDeque<T>,
    rotations: u64,
}

impl<T> StackUsingQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            rotations: 0,
        }
    }

    pub fn push(&mut self, value: T) {
        self.queue.push_back(value);
        for _ in 1..self.queue.len() {
            if let Some(front) = self.queue.pop_front() {
                self.queue.push_back(front);
                self.rotations += 1;
            }
        }
    }

    pub fn pop(&mut self) -> Result<T> {
        self.queue
            .pop_front()
            .ok_or(CursedError::Empty("pop from empty stack"))
    }

    pub fn peek(&self) -> Result<&T> {
        self.queue
            .front()
            .ok_or(CursedError::Empty("peek from empty stack"))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Elements moved from front to back by pushes so far.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let mut wrong = StackUsingQueueWrongEnd::new();
    let mut proper = StackUsingQueue::new();
    result.line("Pushing values: 1, 2, 3");
    for v in [1, 2, 3] {
        wrong.push(v);
        proper.push(v);
    }
    result.line(format!("Peek: {} (wrong end) / {} (queue only)", wrong.peek()?, proper.peek()?));

    result.line("Popping values:");
    while let (Ok(a), Ok(b)) = (wrong.pop(), proper.pop()) {
        result.line(format!("  {} / {}", a, b));
    }
    if let Err(err) = wrong.pop() {
        result.line(format!("One more pop: {}", err));
    }
    result.line(format!(
        "Rotations the queue-only stack paid for 3 pushes: {}",
        proper.rotations()
    ));

    let n = ctx.config.bench_iterations.min(2_000);
    let (_, cursed) = bench::timed(|| {
        let mut s = StackUsingQueueWrongEnd::new();
        (0..n).for_each(|v| s.push(v));
        s.len()
    });
    let (_, correct) = bench::timed(|| {
        let mut s = StackUsingQueue::new();
        (0..n).for_each(|v| s.push(v));
        s.len()
    });
    result.add_comparison(Comparison::new(format!("{} pushes", n), cursed, correct));

    result.add_message(CmdMessage::warning(
        "The wrong-end stack is fast because it dodges the exercise. Pushing and popping at the back is a stack, not a queue.",
    ));
    result.add_message(CmdMessage::info(
        "For a real stack, use Vec with push and pop.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn both_are_lifo() {
        let mut wrong = StackUsingQueueWrongEnd::new();
        let mut proper = StackUsingQueue::new();
        for v in 1..=5 {
            wrong.push(v);
            proper.push(v);
        }
        for expected in (1..=5).rev() {
            assert_eq!(*wrong.peek().unwrap(), expected);
            assert_eq!(*proper.peek().unwrap(), expected);
            assert_eq!(wrong.pop().unwrap(), expected);
            assert_eq!(proper.pop().unwrap(), expected);
        }
        assert!(wrong.is_empty() && proper.is_empty());
    }

    #[test]
    fn empty_operations_fail() {
        let mut wrong: StackUsingQueueWrongEnd<i32> = StackUsingQueueWrongEnd::new();
        let err = wrong.pop().unwrap_err();
        assert_eq!(err.to_string(), "pop from empty stack");
        assert_eq!(wrong.peek().unwrap_err().to_string(), "peek from empty stack");

        let mut proper: StackUsingQueue<i32> = StackUsingQueue::new();
        assert!(matches!(proper.pop(), Err(CursedError::Empty(_))));
    }

    #[test]
    fn rotations_grow_quadratically() {
        let mut proper = StackUsingQueue::new();
        for v in 0..4 {
            proper.push(v);
        }
        assert_eq!(proper.rotations(), 1 + 2 + 3);
    }

    #[test]
    fn interleaved_push_pop() {
        let mut proper = StackUsingQueue::new();
        proper.push('a');
        proper.push('b');
        assert_eq!(proper.pop().unwrap(), 'b');
        proper.push('c');
        assert_eq!(proper.pop().unwrap(), 'c');
        assert_eq!(proper.pop().unwrap(), 'a');
        assert_eq!(proper.len(), 0);
    }

    #[test]
    fn run_pops_in_reverse() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output.contains(&"  3 / 3".to_string()));
        assert!(result
            .output
            .contains(&"One more pop: pop from empty stack".to_string()));
    }
}
