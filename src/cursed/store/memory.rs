use super::KeyValueStore;
use crate::error::Result;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore<V> {
    entries: BTreeMap<String, V>,
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V: Clone> KeyValueStore<V> for InMemoryStore<V> {
    fn insert(&mut self, key: &str, value: V) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<V>> {
        Ok(self.entries.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn all(&self) -> Result<BTreeMap<String, V>> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.entries.len())
    }
}
