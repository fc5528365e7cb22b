//! A "hash map" that never hashes.
//!
//! [`LinkedHashMap`] is a singly linked list of key/value nodes. Every lookup,
//! insert and removal walks the list from the head, so all operations are
//! O(n). The probe counter records how many key comparisons that cost.

use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use std::cell::Cell;
use std::collections::HashMap;

const DEMO_KEYS: usize = 1000;

struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

pub struct LinkedHashMap<K, V> {
    head: Option<Box<Node<K, V>>>,
    len: usize,
    probes: Cell<u64>,
}

impl<K: PartialEq, V> Default for LinkedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V> LinkedHashMap<K, V> {
    pub fn new() -> Self {
        Self {
            head: None,
            len: 0,
            probes: Cell::new(0),
        }
    }

    fn probe(&self, a: &K, b: &K) -> bool {
        self.probes.set(self.probes.get() + 1);
        a == b
    }

    /// Updates the value in place, or appends a node at the tail.
    pub fn put(&mut self, key: K, value: V) {
        let probes = &self.probes;
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            probes.set(probes.get() + 1);
            if node.key == key {
                node.value = value;
                return;
            }
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node {
            key,
            value,
            next: None,
        }));
        self.len += 1;
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.nodes()
            .find(|node| self.probe(&node.key, key))
            .map(|node| &node.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks the node holding `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let probes = &self.probes;
        let mut cursor = &mut self.head;
        loop {
            match cursor {
                None => return None,
                Some(node) => {
                    probes.set(probes.get() + 1);
                    if node.key == *key {
                        break;
                    }
                }
            }
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
        let node = cursor.take()?;
        let Node { value, next, .. } = *node;
        *cursor = next;
        self.len -= 1;
        Some(value)
    }

    pub fn keys(&self) -> Vec<&K> {
        self.nodes().map(|node| &node.key).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.nodes().map(|node| &node.value).collect()
    }

    /// Pairs in insertion order.
    pub fn items(&self) -> Vec<(&K, &V)> {
        self.nodes().map(|node| (&node.key, &node.value)).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Key comparisons performed so far.
    pub fn probes(&self) -> u64 {
        self.probes.get()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node<K, V>> {
        std::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
    }
}

impl<K, V> Drop for LinkedHashMap<K, V> {
    // unlink iteratively so long lists don't blow the stack
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let keys: Vec<String> = (0..DEMO_KEYS).map(|i| format!("key{}", i)).collect();

    let mut cursed = LinkedHashMap::new();
    let cursed_time = bench::repeat(1, || {
        for (i, k) in keys.iter().enumerate() {
            cursed.put(k.clone(), i);
        }
        keys.iter().filter(|k| cursed.get(k).is_some()).count()
    });

    let mut correct = HashMap::new();
    let correct_time = bench::repeat(1, || {
        for (i, k) in keys.iter().enumerate() {
            correct.insert(k.clone(), i);
        }
        keys.iter().filter(|k| correct.contains_key(*k)).count()
    });

    result.line(format!(
        "{} puts + {} gets on the linked list: {} key comparisons",
        DEMO_KEYS,
        DEMO_KEYS,
        cursed.probes()
    ));
    result.line(format!(
        "HashMap did the same with one hash per operation ({} entries)",
        correct.len()
    ));
    let first: Vec<String> = cursed
        .items()
        .into_iter()
        .take(3)
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    result.line(format!("First entries, in insertion order: {}", first.join(", ")));

    result.add_comparison(Comparison::new(
        format!("{} puts + {} gets", DEMO_KEYS, DEMO_KEYS),
        cursed_time,
        correct_time,
    ));
    result.add_message(CmdMessage::warning(
        "Calling it a hash map does not make lookups O(1). Every call walks the whole chain.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn behaves_like_a_map() {
        let mut map = LinkedHashMap::new();
        assert!(map.is_empty());
        map.put("a", 1);
        map.put("b", 2);
        map.put("a", 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a"), Some(&3));
        assert_eq!(map.get(&"b"), Some(&2));
        assert_eq!(map.get(&"z"), None);
        assert!(map.contains(&"b"));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut map = LinkedHashMap::new();
        for (k, v) in [("x", 1), ("y", 2), ("z", 3)] {
            map.put(k, v);
        }
        assert_eq!(map.keys(), vec![&"x", &"y", &"z"]);
        assert_eq!(map.values(), vec![&1, &2, &3]);
        assert_eq!(map.items()[1], (&"y", &2));
    }

    #[test]
    fn removes_head_middle_and_tail() {
        let mut map = LinkedHashMap::new();
        for i in 0..5 {
            map.put(i, i * 10);
        }
        assert_eq!(map.remove(&0), Some(0));
        assert_eq!(map.remove(&2), Some(20));
        assert_eq!(map.remove(&4), Some(40));
        assert_eq!(map.remove(&9), None);
        assert_eq!(map.keys(), vec![&1, &3]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn agrees_with_hashmap_on_a_mixed_sequence() {
        let mut cursed = LinkedHashMap::new();
        let mut correct = HashMap::new();
        for i in 0..200u32 {
            let key = i % 37;
            match i % 3 {
                0 | 1 => {
                    cursed.put(key, i);
                    correct.insert(key, i);
                }
                _ => {
                    assert_eq!(cursed.remove(&key), correct.remove(&key));
                }
            }
            assert_eq!(cursed.len(), correct.len());
        }
        for key in 0..37 {
            assert_eq!(cursed.get(&key), correct.get(&key));
        }
    }

    #[test]
    fn lookups_scan_linearly() {
        let mut map = LinkedHashMap::new();
        for i in 0..10 {
            map.put(i, ());
        }
        let before = map.probes();
        map.get(&9);
        assert_eq!(map.probes() - before, 10);
    }

    #[test]
    fn long_lists_drop_without_overflow() {
        let mut map = LinkedHashMap::new();
        let mut cursor = 0;
        // append directly to avoid the quadratic put
        let mut tail = &mut map.head;
        while cursor < 200_000 {
            *tail = Some(Box::new(Node {
                key: cursor,
                value: (),
                next: None,
            }));
            if let Some(node) = tail {
                tail = &mut node.next;
            }
            cursor += 1;
        }
        drop(map);
    }

    #[test]
    fn run_counts_probes() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output[0].contains("key comparisons"));
        assert_eq!(result.comparisons.len(), 1);
    }
}
