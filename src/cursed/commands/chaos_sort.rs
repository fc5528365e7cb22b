//! Sorting by random mutation.
//!
//! Each attempt picks a mutation at random and applies it, until the data
//! happens to be sorted. One of the mutations overwrites a slot with a copy of
//! another element, so the output is sorted but not always a permutation of
//! the input.

use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::config::CursedConfig;
use crate::error::{CursedError, Result};
use crate::rng::Lcg;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::thread;
use std::time::Duration;

const BAR_CELLS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Swap,
    Replace,
    Reverse,
    ShuffleSegment,
    Nothing,
}

impl Mutation {
    pub const ALL: [Mutation; 5] = [
        Mutation::Swap,
        Mutation::Replace,
        Mutation::Reverse,
        Mutation::ShuffleSegment,
        Mutation::Nothing,
    ];
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mutation::Swap => "swap",
            Mutation::Replace => "replace",
            Mutation::Reverse => "reverse",
            Mutation::ShuffleSegment => "shuffle-segment",
            Mutation::Nothing => "nothing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct ChaosOptions {
    pub max_attempts: u64,
    pub delay: Duration,
}

impl Default for ChaosOptions {
    fn default() -> Self {
        Self::from_config(&CursedConfig::default())
    }
}

impl ChaosOptions {
    pub fn from_config(config: &CursedConfig) -> Self {
        Self {
            max_attempts: config.chaos_max_attempts,
            delay: Duration::from_millis(config.chaos_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChaosOutcome {
    pub sorted: Vec<i64>,
    pub attempts: u64,
    /// How many times each original value was involved in a mutation.
    pub reflections: BTreeMap<i64, u64>,
}

pub fn is_sorted(data: &[i64]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

pub fn chaos_sort(
    mut data: Vec<i64>,
    rng: &mut Lcg,
    options: &ChaosOptions,
    mut observer: impl FnMut(f64),
) -> Result<ChaosOutcome> {
    let mut reflections: BTreeMap<i64, u64> = data.iter().map(|v| (*v, 0)).collect();
    let mut attempts = 0u64;
    let mut progress = 0.0f64;

    while !is_sorted(&data) {
        if attempts >= options.max_attempts {
            return Err(CursedError::GaveUp(attempts));
        }
        attempts += 1;

        let mutation = *rng.choose(&Mutation::ALL).unwrap_or(&Mutation::Nothing);
        tracing::trace!(attempt = attempts, %mutation, "chaos sort attempt");
        let len = data.len();

        match mutation {
            Mutation::Swap if len > 1 => {
                let i = rng.below(len);
                let j = rng.below(len);
                data.swap(i, j);
                *reflections.entry(data[i]).or_default() += 1;
                *reflections.entry(data[j]).or_default() += 1;
            }
            Mutation::Replace => {
                let i = rng.below(len);
                let old = data[i];
                data[i] = data[rng.below(len)];
                *reflections.entry(old).or_default() += 1;
            }
            Mutation::Reverse => {
                data.reverse();
                for v in &data {
                    *reflections.entry(*v).or_default() += 1;
                }
            }
            Mutation::ShuffleSegment if len > 2 => {
                let start = rng.below(len - 1);
                let end = rng.between(start + 1, len - 1);
                let segment = &mut data[start..=end];
                rng.shuffle(segment);
                for v in segment.iter() {
                    *reflections.entry(*v).or_default() += 1;
                }
            }
            _ => {}
        }

        // wildly inaccurate on purpose
        progress = (progress + rng.uniform(-0.10, 0.15)).clamp(0.0, 1.0);
        observer(progress);

        if !options.delay.is_zero() {
            thread::sleep(options.delay);
        }
    }

    Ok(ChaosOutcome {
        sorted: data,
        attempts,
        reflections,
    })
}

/// `[#########---------------------] 30%`
pub fn format_progress(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (BAR_CELLS as f64 * progress) as usize;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_CELLS - filled),
        (progress * 100.0) as u32
    )
}

pub fn sort_correct(mut data: Vec<i64>) -> Vec<i64> {
    data.sort();
    data
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let numbers = vec![3, 1, 4, 2];
    let options = ChaosOptions::from_config(ctx.config);
    let mut rng = Lcg::new(ctx.config.seed);

    let mut last_progress = 0.0;
    let (outcome, cursed_time) = bench::timed(|| {
        chaos_sort(numbers.clone(), &mut rng, &options, |p| {
            last_progress = p;
            ctx.report_progress(p);
        })
    });

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(CursedError::GaveUp(attempts)) => {
            result.add_message(CmdMessage::warning(format!(
                "Gave up after {} attempts. Try another seed or raise chaos-max-attempts.",
                attempts
            )));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    result.line(format!("Progress: {}", format_progress(last_progress)));
    result.line(format!("Sorted list: {:?}", outcome.sorted));
    result.line(format!("Attempts: {}", outcome.attempts));
    result.line("Reflections per element:");
    for (value, count) in &outcome.reflections {
        result.line(format!("  {}: {}", value, count));
    }

    let (reference, correct_time) = bench::timed(|| sort_correct(numbers.clone()));
    result.add_comparison(Comparison::new("sort [3, 1, 4, 2]", cursed_time, correct_time));

    if outcome.sorted != reference {
        result.add_message(CmdMessage::warning(format!(
            "Sorted, technically. The input was {:?}, the correct answer is {:?}.",
            numbers, reference
        )));
    }
    result.add_message(CmdMessage::info(
        "The progress bar is random noise clamped to [0, 100]. It never knew anything.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn already_sorted_takes_no_attempts() {
        let mut rng = Lcg::new(1);
        let outcome = chaos_sort(vec![1, 2, 3], &mut rng, &ChaosOptions::default(), |_| {}).unwrap();
        assert_eq!(outcome.attempts, 0);
        assert_eq!(outcome.sorted, vec![1, 2, 3]);
        assert!(outcome.reflections.values().all(|c| *c == 0));
    }

    #[test]
    fn ends_sorted_with_known_values() {
        let mut rng = Lcg::new(42);
        let input = vec![3, 1, 4, 2];
        let outcome = chaos_sort(input.clone(), &mut rng, &ChaosOptions::default(), |_| {}).unwrap();
        assert!(is_sorted(&outcome.sorted));
        assert_eq!(outcome.sorted.len(), input.len());
        assert!(outcome.sorted.iter().all(|v| input.contains(v)));
        assert!(outcome.attempts > 0);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let run_once = || {
            let mut rng = Lcg::new(7);
            chaos_sort(vec![5, 4, 3, 2, 1], &mut rng, &ChaosOptions::default(), |_| {}).unwrap()
        };
        let (a, b) = (run_once(), run_once());
        assert_eq!(a.attempts, b.attempts);
        assert_eq!(a.sorted, b.sorted);
    }

    #[test]
    fn gives_up_at_the_cap() {
        let mut rng = Lcg::new(3);
        let options = ChaosOptions {
            max_attempts: 0,
            delay: Duration::ZERO,
        };
        let err = chaos_sort(vec![2, 1], &mut rng, &options, |_| {}).unwrap_err();
        assert!(matches!(err, CursedError::GaveUp(0)));
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        let mut rng = Lcg::new(11);
        let mut seen = Vec::new();
        chaos_sort(vec![9, 8, 7, 6], &mut rng, &ChaosOptions::default(), |p| seen.push(p)).unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn progress_bar_has_thirty_cells() {
        assert_eq!(format_progress(0.0), format!("[{}] 0%", "-".repeat(30)));
        assert_eq!(format_progress(1.0), format!("[{}] 100%", "#".repeat(30)));
        let half = format_progress(0.5);
        assert!(half.starts_with(&format!("[{}{}]", "#".repeat(15), "-".repeat(15))));
        assert!(half.ends_with("50%"));
    }

    #[test]
    fn run_reports_attempts() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output.iter().any(|l| l.starts_with("Attempts: ")));
    }
}
