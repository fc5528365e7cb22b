use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};
use std::cell::Cell;
use std::fmt;

/// A complete binary tree stored as one comma-separated string in level
/// order. Node `i` has children at `2i + 1` and `2i + 2`.
///
/// Every operation splits the whole string first.
#[derive(Debug, Default)]
pub struct BinaryTreeAsString {
    tree: String,
    parses: Cell<u64>,
}

impl BinaryTreeAsString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_csv(data: &str) -> Self {
        Self {
            tree: data.to_string(),
            parses: Cell::new(0),
        }
    }

    fn cells(&self) -> Vec<&str> {
        self.parses.set(self.parses.get() + 1);
        if self.tree.is_empty() {
            return Vec::new();
        }
        self.tree.split(',').collect()
    }

    fn cell_value(cell: &str) -> Result<i64> {
        cell.trim()
            .parse()
            .map_err(|_| CursedError::InvalidNumber(cell.to_string()))
    }

    pub fn insert(&mut self, value: i64) {
        let mut values: Vec<String> = self.cells().into_iter().map(str::to_string).collect();
        values.push(value.to_string());
        self.tree = values.join(",");
    }

    pub fn get_root(&self) -> Result<i64> {
        match self.cells().first() {
            Some(cell) => Self::cell_value(cell),
            None => Err(CursedError::EmptyTree),
        }
    }

    pub fn get_left(&self, index: usize) -> Result<Option<i64>> {
        self.child(child_index(index, 1))
    }

    pub fn get_right(&self, index: usize) -> Result<Option<i64>> {
        self.child(child_index(index, 2))
    }

    fn child(&self, index: Option<usize>) -> Result<Option<i64>> {
        let Some(index) = index else {
            return Ok(None);
        };
        self.cells()
            .get(index)
            .map(|cell| Self::cell_value(cell))
            .transpose()
    }

    pub fn inorder_traversal(&self) -> Result<Vec<i64>> {
        let cells = self.cells();
        let mut out = Vec::with_capacity(cells.len());
        walk_cells(&cells, 0, &mut out)?;
        Ok(out)
    }

    /// How many times the string has been split.
    pub fn parses(&self) -> u64 {
        self.parses.get()
    }
}

/// `2i + offset`, or `None` when that is past `usize::MAX`.
fn child_index(index: usize, offset: usize) -> Option<usize> {
    index.checked_mul(2)?.checked_add(offset)
}

fn walk_cells(cells: &[&str], i: usize, out: &mut Vec<i64>) -> Result<()> {
    if i >= cells.len() {
        return Ok(());
    }
    walk_cells(cells, 2 * i + 1, out)?;
    out.push(BinaryTreeAsString::cell_value(cells[i])?);
    walk_cells(cells, 2 * i + 2, out)
}

impl fmt::Display for BinaryTreeAsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

/// The same level-order layout over a `Vec<i64>`.
#[derive(Debug, Default, Clone)]
pub struct ArrayTree {
    values: Vec<i64>,
}

impl ArrayTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: i64) {
        self.values.push(value);
    }

    pub fn get_root(&self) -> Result<i64> {
        self.values.first().copied().ok_or(CursedError::EmptyTree)
    }

    pub fn get_left(&self, index: usize) -> Option<i64> {
        self.values.get(child_index(index, 1)?).copied()
    }

    pub fn get_right(&self, index: usize) -> Option<i64> {
        self.values.get(child_index(index, 2)?).copied()
    }

    pub fn inorder_traversal(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.values.len());
        self.walk(0, &mut out);
        out
    }

    fn walk(&self, i: usize, out: &mut Vec<i64>) {
        if let Some(value) = self.values.get(i) {
            self.walk(2 * i + 1, out);
            out.push(*value);
            self.walk(2 * i + 2, out);
        }
    }
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut tree = BinaryTreeAsString::new();
    let mut reference = ArrayTree::new();

    result.line("Inserting 1..=7:");
    for v in 1..=7 {
        tree.insert(v);
        reference.insert(v);
    }
    result.line(format!("  tree as a string: {:?}", tree.to_string()));
    result.line(format!("  root: {}", tree.get_root()?));
    result.line(format!(
        "  children of root: {:?} and {:?}",
        tree.get_left(0)?,
        tree.get_right(0)?
    ));
    result.line(format!("  left child of node 3: {:?}", tree.get_left(3)?));
    result.line(format!("  in-order: {:?}", tree.inorder_traversal()?));
    result.line(format!("  reference in-order: {:?}", reference.inorder_traversal()));
    result.line(format!("  string splits so far: {}", tree.parses()));

    let broken = BinaryTreeAsString::from_csv("1,two,3");
    if let Err(err) = broken.get_left(0) {
        result.line(format!("A tree holding \"1,two,3\": {}", err));
    }

    let n = ctx.config.bench_iterations.min(2_000) as i64;
    let (built, cursed) = bench::timed(|| -> Result<i64> {
        let mut t = BinaryTreeAsString::new();
        for v in 0..n {
            t.insert(v);
        }
        t.get_root()
    });
    built?;
    let (_, correct) = bench::timed(|| {
        let mut t = ArrayTree::new();
        for v in 0..n {
            t.insert(v);
        }
        t.get_root()
    });
    result.add_comparison(Comparison::new(format!("{} inserts", n), cursed, correct));

    result.add_message(CmdMessage::warning(
        "Each insert splits and re-joins the whole tree. Building it is O(n²).",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    fn seven() -> BinaryTreeAsString {
        let mut tree = BinaryTreeAsString::new();
        for v in 1..=7 {
            tree.insert(v);
        }
        tree
    }

    #[test]
    fn level_order_string() {
        let tree = seven();
        assert_eq!(tree.to_string(), "1,2,3,4,5,6,7");
        assert_eq!(tree.inorder_traversal().unwrap(), vec![4, 2, 5, 1, 6, 3, 7]);
    }

    #[test]
    fn children_by_heap_index() {
        let tree = seven();
        assert_eq!(tree.get_root().unwrap(), 1);
        assert_eq!(tree.get_left(0).unwrap(), Some(2));
        assert_eq!(tree.get_right(1).unwrap(), Some(5));
        assert_eq!(tree.get_left(3).unwrap(), None);
    }

    #[test]
    fn matches_array_tree() {
        let mut tree = BinaryTreeAsString::new();
        let mut reference = ArrayTree::new();
        for v in [8, 3, 10, 1, 6] {
            tree.insert(v);
            reference.insert(v);
        }
        assert_eq!(tree.inorder_traversal().unwrap(), reference.inorder_traversal());
        for i in 0..5 {
            assert_eq!(tree.get_left(i).unwrap(), reference.get_left(i));
            assert_eq!(tree.get_right(i).unwrap(), reference.get_right(i));
        }
    }

    #[test]
    fn huge_indexes_have_no_children() {
        let tree = seven();
        assert_eq!(tree.get_left(usize::MAX).unwrap(), None);
        assert_eq!(tree.get_right(usize::MAX / 2).unwrap(), None);

        let mut reference = ArrayTree::new();
        reference.insert(1);
        assert_eq!(reference.get_left(usize::MAX), None);
        assert_eq!(reference.get_right(usize::MAX), None);
    }

    #[test]
    fn empty_tree_has_no_root() {
        assert!(matches!(BinaryTreeAsString::new().get_root(), Err(CursedError::EmptyTree)));
        assert!(matches!(ArrayTree::new().get_root(), Err(CursedError::EmptyTree)));
        assert!(BinaryTreeAsString::new().inorder_traversal().unwrap().is_empty());
    }

    #[test]
    fn non_numeric_cells_are_rejected() {
        let tree = BinaryTreeAsString::from_csv("1,two,3");
        assert!(matches!(tree.get_left(0), Err(CursedError::InvalidNumber(_))));
        assert_eq!(tree.get_right(0).unwrap(), Some(3));
    }

    #[test]
    fn every_operation_splits_the_string() {
        let tree = seven();
        let before = tree.parses();
        tree.get_root().unwrap();
        tree.get_left(0).unwrap();
        assert_eq!(tree.parses() - before, 2);
    }

    #[test]
    fn run_shows_the_string() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result
            .output
            .contains(&"  tree as a string: \"1,2,3,4,5,6,7\"".to_string()));
        assert!(result.output.iter().any(|l| l.contains("Invalid number: two")));
    }
}
