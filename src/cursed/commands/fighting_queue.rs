use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};

/// A queue over two stacks that move every element on every operation.
///
/// All elements rest in `home` with the front of the queue on top. Each
/// operation empties `home` into `away`, does its work, and moves
/// everything back.
#[derive(Debug, Default)]
pub struct QueueUsingTwoFightingStacks<T> {
    home: Vec<T>,
    away: Vec<T>,
    transfers: u64,
}

impl<T> QueueUsingTwoFightingStacks<T> {
    pub fn new() -> Self {
        Self {
            home: Vec::new(),
            away: Vec::new(),
            transfers: 0,
        }
    }

    fn evict(&mut self) {
        while let Some(v) = self.home.pop() {
            self.away.push(v);
            self.transfers += 1;
        }
    }

    fn return_home(&mut self, keep: usize) {
        while self.away.len() > keep {
            if let Some(v) = self.away.pop() {
                self.home.push(v);
                self.transfers += 1;
            }
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.evict();
        self.home.push(value);
        self.return_home(0);
    }

    pub fn dequeue(&mut self) -> Result<T> {
        if self.home.is_empty() {
            return Err(CursedError::Empty("dequeue from empty queue"));
        }
        self.evict();
        // the front ends up alone at the bottom of away
        self.return_home(1);
        self.away
            .pop()
            .ok_or(CursedError::Empty("dequeue from empty queue"))
    }

    pub fn peek(&mut self) -> Result<&T> {
        if self.home.is_empty() {
            return Err(CursedError::Empty("peek from empty queue"));
        }
        self.evict();
        self.return_home(0);
        self.home
            .last()
            .ok_or(CursedError::Empty("peek from empty queue"))
    }

    pub fn len(&self) -> usize {
        self.home.len()
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_empty()
    }

    /// Elements moved between the two stacks so far.
    pub fn transfers(&self) -> u64 {
        self.transfers
    }
}

/// Two stacks with fixed roles. Elements move from `inbox` to `outbox`
/// only when `outbox` runs dry, at most once each.
#[derive(Debug, Default)]
pub struct QueueUsingTwoStacks<T> {
    inbox: Vec<T>,
    outbox: Vec<T>,
    transfers: u64,
}

impl<T> QueueUsingTwoStacks<T> {
    pub fn new() -> Self {
        Self {
            inbox: Vec::new(),
            outbox: Vec::new(),
            transfers: 0,
        }
    }

    fn refill(&mut self) {
        if self.outbox.is_empty() {
            while let Some(v) = self.inbox.pop() {
                self.outbox.push(v);
                self.transfers += 1;
            }
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.inbox.push(value);
    }

    pub fn dequeue(&mut self) -> Result<T> {
        self.refill();
        self.outbox
            .pop()
            .ok_or(CursedError::Empty("dequeue from empty queue"))
    }

    pub fn peek(&mut self) -> Result<&T> {
        self.refill();
        self.outbox
            .last()
            .ok_or(CursedError::Empty("peek from empty queue"))
    }

    pub fn len(&self) -> usize {
        self.inbox.len() + self.outbox.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn transfers(&self) -> u64 {
        self.transfers
    }
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut fighting = QueueUsingTwoFightingStacks::new();

    result.line("Enqueueing: 1, 2, 3");
    for v in [1, 2, 3] {
        let before = fighting.transfers();
        fighting.enqueue(v);
        result.line(format!("  enqueue({}) cost {} moves", v, fighting.transfers() - before));
    }
    result.line(format!("Queue size: {}", fighting.len()));
    let before = fighting.transfers();
    let front = *fighting.peek()?;
    result.line(format!(
        "Peek: {} (cost {} moves)",
        front,
        fighting.transfers() - before
    ));

    result.line("Dequeuing:");
    while !fighting.is_empty() {
        let before = fighting.transfers();
        let v = fighting.dequeue()?;
        result.line(format!("  {} (cost {} moves)", v, fighting.transfers() - before));
    }

    let n = ctx.config.bench_iterations.min(1_000);
    let (cursed_moves, cursed) = bench::timed(|| {
        let mut q = QueueUsingTwoFightingStacks::new();
        (0..n).for_each(|v| q.enqueue(v));
        while q.dequeue().is_ok() {}
        q.transfers()
    });
    let (correct_moves, correct) = bench::timed(|| {
        let mut q = QueueUsingTwoStacks::new();
        (0..n).for_each(|v| q.enqueue(v));
        while q.dequeue().is_ok() {}
        q.transfers()
    });
    result.line(format!(
        "{} enqueues then {} dequeues: {} moves fighting, {} moves lazy",
        n, n, cursed_moves, correct_moves
    ));
    result.add_comparison(Comparison::new(format!("{} in, {} out", n, n), cursed, correct));

    result.add_message(CmdMessage::warning(
        "Every operation is O(n). The lazy version moves each element once.",
    ));
    result.add_message(CmdMessage::info("Outside an interview, use VecDeque."));
    Ok(result)
}
