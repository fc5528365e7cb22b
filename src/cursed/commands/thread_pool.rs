use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

const BENCH_ROUNDS: usize = 100;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed workers pulling boxed jobs off one shared channel.
pub struct ThreadPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

/// Receives the value of one submitted job.
pub struct TaskHandle<T> {
    receiver: Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the job finishes. Fails if the job panicked.
    pub fn wait(self) -> Result<T> {
        self.receiver
            .recv()
            .map_err(|_| CursedError::Pool("task dropped before producing a value".into()))
    }
}

impl ThreadPool {
    pub fn new(workers: usize) -> Self {
        let (sender, receiver) = channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..workers.max(1))
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                thread::spawn(move || loop {
                    let job = match receiver.lock() {
                        Ok(rx) => rx.recv(),
                        Err(_) => break,
                    };
                    match job {
                        // a panicking job drops its sender, which fails its handle
                        Ok(job) => {
                            let _ = panic::catch_unwind(AssertUnwindSafe(job));
                        }
                        Err(_) => {
                            tracing::trace!(worker = id, "channel closed, worker exiting");
                            break;
                        }
                    }
                })
            })
            .collect::<Vec<_>>();
        tracing::debug!(workers = workers.len(), "thread pool started");

        Self {
            sender: Some(sender),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    pub fn submit<T, F>(&self, f: F) -> Result<TaskHandle<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = channel();
        let job: Job = Box::new(move || {
            // the handle may already be gone
            let _ = tx.send(f());
        });
        self.sender
            .as_ref()
            .ok_or_else(|| CursedError::Pool("pool is shut down".into()))?
            .send(job)
            .map_err(|_| CursedError::Pool("no workers left to accept the job".into()))?;
        Ok(TaskHandle { receiver: rx })
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        tracing::debug!("thread pool joined");
    }
}

pub fn hello() -> String {
    "Hello, world".to_string()
}

/// Starts `workers` threads to return one string, then tears them down.
pub fn hello_with_thread_pool(workers: usize) -> Result<String> {
    let pool = ThreadPool::new(workers);
    pool.submit(hello)?.wait()
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let workers = ctx.config.pool_workers;

    let (pooled, pooled_time) = bench::timed(|| hello_with_thread_pool(workers));
    let (direct, direct_time) = bench::timed(hello);
    result.line(format!(
        "With a {}-worker pool: {:?} in {:.3}ms",
        workers,
        pooled?,
        pooled_time.as_secs_f64() * 1000.0
    ));
    result.line(format!(
        "Direct call:          {:?} in {:.3}ms",
        direct,
        direct_time.as_secs_f64() * 1000.0
    ));

    let (rounds, cursed) = bench::timed(|| -> Result<usize> {
        for _ in 0..BENCH_ROUNDS {
            hello_with_thread_pool(workers)?;
        }
        Ok(BENCH_ROUNDS)
    });
    let correct = bench::repeat(BENCH_ROUNDS, hello);
    result.add_comparison(Comparison::new(
        format!("{} greetings", rounds?),
        cursed,
        correct,
    ));
    result.line(format!(
        "Threads started for {} greetings: {}",
        BENCH_ROUNDS,
        BENCH_ROUNDS * workers.max(1)
    ));

    result.add_message(CmdMessage::warning(
        "Spawning and joining threads costs far more than building a string.",
    ));
    result.add_message(CmdMessage::info(
        "Reach for a pool when work is slow, parallel and plentiful. Keep it alive across tasks.",
    ));
    Ok(result)
}
