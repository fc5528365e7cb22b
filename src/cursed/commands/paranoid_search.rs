use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;

const LARGE_LEN: i64 = 1_000_000;
const LARGE_TARGET: i64 = 999_998;

/// Binary search, then a full linear scan to double-check it.
///
/// The first linear match overrides whatever the binary search found, so the
/// whole thing is O(n) with extra steps.
pub fn paranoid_binary_search<T: Ord>(data: &[T], target: &T) -> Option<usize> {
    let mut found = binary_search(data, target);
    for (idx, item) in data.iter().enumerate() {
        if item == target {
            found = Some(idx);
            break;
        }
    }
    found
}

pub fn binary_search<T: Ord>(data: &[T], target: &T) -> Option<usize> {
    let mut left = 0;
    let mut right = data.len();
    while left < right {
        let mid = left + (right - left) / 2;
        match data[mid].cmp(target) {
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}

pub fn linear_search<T: PartialEq>(data: &[T], target: &T) -> Option<usize> {
    data.iter().position(|item| item == target)
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let sample = [1, 3, 5, 7, 9, 11, 13, 15, 17, 19];
    let target = 13;
    match paranoid_binary_search(&sample, &target) {
        Some(idx) => {
            result.line(format!("Found {} at index: {}", target, idx));
            result.line(format!(
                "Verification (unnecessary): sample[{}] = {}",
                idx, sample[idx]
            ));
        }
        None => result.line(format!("{} not found", target)),
    }

    let large: Vec<i64> = (0..LARGE_LEN).map(|i| i * 2).collect();
    let iterations = (ctx.config.bench_iterations / 100).max(1);
    let binary = bench::repeat(iterations, || binary_search(&large, &LARGE_TARGET));
    let linear = bench::repeat(iterations, || linear_search(&large, &LARGE_TARGET));
    let paranoid = bench::repeat(iterations, || paranoid_binary_search(&large, &LARGE_TARGET));

    result.line(format!(
        "Searching {} even numbers for {}, {} times each",
        LARGE_LEN, LARGE_TARGET, iterations
    ));
    result.add_comparison(Comparison::new("paranoid vs binary", paranoid, binary));
    result.add_comparison(Comparison::new("paranoid vs linear", paranoid, linear));

    result.add_message(CmdMessage::info(
        "On sorted input the linear pass never disagrees. It only costs O(n).",
    ));
    result.add_message(CmdMessage::warning(
        "If you don't trust an algorithm, test it once. Don't re-verify it on every call.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn finds_the_same_index_as_linear_search() {
        let data: Vec<i32> = (0..500).map(|i| i * 3).collect();
        for target in [0, 3, 300, 1497] {
            assert_eq!(
                paranoid_binary_search(&data, &target),
                linear_search(&data, &target)
            );
            assert!(binary_search(&data, &target).is_some());
        }
    }

    #[test]
    fn duplicates_resolve_to_first_occurrence() {
        let data = [1, 2, 2, 2, 2, 2, 3];
        assert_eq!(paranoid_binary_search(&data, &2), Some(1));
    }

    #[test]
    fn absent_targets_are_none() {
        let data = [1, 3, 5];
        assert_eq!(paranoid_binary_search(&data, &4), None);
        assert_eq!(binary_search(&data, &0), None);
        assert_eq!(binary_search(&data, &6), None);
        assert_eq!(paranoid_binary_search::<i32>(&[], &1), None);
    }

    #[test]
    fn run_finds_thirteen() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert_eq!(result.output[0], "Found 13 at index: 6");
        assert_eq!(result.comparisons.len(), 2);
    }
}
