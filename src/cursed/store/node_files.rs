use crate::error::{CursedError, Result};
use serde::Serialize;
use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const NONE_MARKER: &str = "NONE";

/// File operations performed by a [`FileNodeLinkedList`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IoStats {
    pub reads: u64,
    pub writes: u64,
    pub removals: u64,
}

/// A singly linked list where every node is its own file.
///
/// Each `node_<n>.txt` holds two lines, `value=<int>` and
/// `next=<file name|NONE>`. The head pointer is a file name kept in memory.
/// Appending walks the files to the tail, traversal opens every file, and
/// deleting rewrites the predecessor before removing the node's file.
#[derive(Debug)]
pub struct FileNodeLinkedList {
    dir: PathBuf,
    head: Option<String>,
    next_seq: u64,
    reads: Cell<u64>,
    writes: u64,
    removals: u64,
}

impl FileNodeLinkedList {
    /// Creates `dir` if needed. Sequence numbers continue after any node
    /// files already there, so they are never overwritten.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let last_seq = node_files(&dir)?
            .iter()
            .filter_map(|name| sequence_of(name))
            .max()
            .unwrap_or(0);
        Ok(Self {
            dir,
            head: None,
            next_seq: last_seq + 1,
            reads: Cell::new(0),
            writes: 0,
            removals: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }

    pub fn io_stats(&self) -> IoStats {
        IoStats {
            reads: self.reads.get(),
            writes: self.writes,
            removals: self.removals,
        }
    }

    pub fn append(&mut self, value: i64) -> Result<()> {
        let filename = format!("node_{}.txt", self.next_seq);
        self.next_seq += 1;

        let Some(head) = self.head.clone() else {
            self.write_node(&filename, value, None)?;
            self.head = Some(filename);
            return Ok(());
        };

        let mut current = head;
        let mut visited = HashSet::new();
        loop {
            self.visit(&mut visited, &current)?;
            let (_, next) = self.read_node(&current)?;
            match next {
                Some(next) => current = next,
                None => break,
            }
        }

        self.write_node(&filename, value, None)?;
        let (tail_value, _) = self.read_node(&current)?;
        self.write_node(&current, tail_value, Some(&filename))?;
        tracing::debug!(node = %filename, tail = %current, "appended node file");
        Ok(())
    }

    /// Values from head to tail, one file read each.
    pub fn traverse(&self) -> Result<Vec<i64>> {
        let mut values = Vec::new();
        let mut current = self.head.clone();
        let mut visited = HashSet::new();
        while let Some(name) = current {
            self.visit(&mut visited, &name)?;
            let (value, next) = self.read_node(&name)?;
            values.push(value);
            current = next;
        }
        Ok(values)
    }

    /// Unlinks the first node holding `value` and deletes its file.
    pub fn delete(&mut self, value: i64) -> Result<()> {
        let mut prev: Option<String> = None;
        let mut current = self.head.clone();
        let mut visited = HashSet::new();

        while let Some(name) = current {
            self.visit(&mut visited, &name)?;
            let (node_value, next) = self.read_node(&name)?;
            if node_value == value {
                match &prev {
                    None => self.head = next,
                    Some(prev) => {
                        let (prev_value, _) = self.read_node(prev)?;
                        self.write_node(prev, prev_value, next.as_deref())?;
                    }
                }
                fs::remove_file(self.dir.join(&name))?;
                self.removals += 1;
                tracing::debug!(node = %name, "deleted node file");
                return Ok(());
            }
            prev = Some(name);
            current = next;
        }
        Err(CursedError::ValueNotFound(value))
    }

    /// Node file names in the directory, in creation order.
    pub fn files(&self) -> Result<Vec<String>> {
        node_files(&self.dir)
    }

    /// Removes the directory and every node file in it.
    pub fn destroy(self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Fails if a walk reaches the same node file twice.
    fn visit(&self, visited: &mut HashSet<String>, name: &str) -> Result<()> {
        if !visited.insert(name.to_string()) {
            return Err(CursedError::CorruptNode {
                file: self.dir.join(name),
                reason: "next pointers form a cycle".to_string(),
            });
        }
        Ok(())
    }

    fn write_node(&mut self, filename: &str, value: i64, next: Option<&str>) -> Result<()> {
        let content = format!("value={}\nnext={}\n", value, next.unwrap_or(NONE_MARKER));
        fs::write(self.dir.join(filename), content)?;
        self.writes += 1;
        Ok(())
    }

    fn read_node(&self, filename: &str) -> Result<(i64, Option<String>)> {
        let path = self.dir.join(filename);
        let content = fs::read_to_string(&path)?;
        self.reads.set(self.reads.get() + 1);

        let corrupt = |reason: &str| CursedError::CorruptNode {
            file: path.clone(),
            reason: reason.to_string(),
        };
        let mut lines = content.lines();
        let value = lines
            .next()
            .and_then(|l| l.strip_prefix("value="))
            .ok_or_else(|| corrupt("missing value line"))?;
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| corrupt("value is not an integer"))?;
        let next = lines
            .next()
            .and_then(|l| l.strip_prefix("next="))
            .ok_or_else(|| corrupt("missing next line"))?
            .trim();

        let next = if next == NONE_MARKER {
            None
        } else if sequence_of(next).is_none() {
            return Err(corrupt("next is not a node file name"));
        } else if next == filename {
            return Err(corrupt("node points at itself"));
        } else {
            Some(next.to_string())
        };
        Ok((value, next))
    }
}

fn sequence_of(filename: &str) -> Option<u64> {
    filename
        .strip_prefix("node_")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}

fn node_files(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if sequence_of(&name).is_some() {
            names.push(name);
        }
    }
    names.sort_by_key(|name| sequence_of(name));
    Ok(names)
}
