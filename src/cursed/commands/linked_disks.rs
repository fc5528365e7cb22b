use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use crate::store::node_files::FileNodeLinkedList;
use std::collections::LinkedList;

const NODE_DIR: &str = "linked_list";
const BENCH_NODES: i64 = 50;

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut list = FileNodeLinkedList::open(ctx.scratch.join(NODE_DIR))?;

    result.line("Appending values: 1, 2, 3");
    for v in [1, 2, 3] {
        list.append(v)?;
    }
    result.line(format!("Files in {}/:", NODE_DIR));
    for name in list.files()? {
        result.line(format!("  {}", name));
    }

    result.line(format!("Traversing (one file per node): {:?}", list.traverse()?));
    result.line("Deleting value 2");
    list.delete(2)?;
    result.line(format!("Traversing again: {:?}", list.traverse()?));
    result.line(format!("Remaining files: {}", list.files()?.join(", ")));

    let stats = list.io_stats();
    result.line(format!(
        "File operations so far: {} reads, {} writes, {} removals",
        stats.reads, stats.writes, stats.removals
    ));
    list.destroy()?;

    let mut bench_list = FileNodeLinkedList::open(ctx.scratch.join("linked_list_bench"))?;
    let (built, cursed) = bench::timed(|| -> Result<Vec<i64>> {
        for v in 0..BENCH_NODES {
            bench_list.append(v)?;
        }
        bench_list.traverse()
    });
    let from_disk = built?;
    let (from_memory, correct) = bench::timed(|| {
        let mut reference = LinkedList::new();
        for v in 0..BENCH_NODES {
            reference.push_back(v);
        }
        reference.into_iter().collect::<Vec<_>>()
    });
    bench_list.destroy()?;
    if from_disk == from_memory {
        result.add_message(CmdMessage::success(format!(
            "{} appends and a traversal agree with std::collections::LinkedList.",
            BENCH_NODES
        )));
    }
    result.add_comparison(Comparison::new(
        format!("{} appends + traverse", BENCH_NODES),
        cursed,
        correct,
    ));

    result.add_message(CmdMessage::warning(
        "The filesystem is not your RAM. A crash between rewriting a node and deleting the next one corrupts the list.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn run_deletes_the_middle_node_and_cleans_up() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output.contains(&"Traversing again: [1, 3]".to_string()));
        assert!(result
            .output
            .contains(&"Remaining files: node_1.txt, node_3.txt".to_string()));
        assert!(!env.root.join(NODE_DIR).exists());
        assert_eq!(result.comparisons.len(), 1);
    }
}
