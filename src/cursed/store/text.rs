use super::KeyValueStore;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

pub const SINGLETON_FILENAME: &str = "singleton.txt";

/// A "singleton" that is really a text file.
///
/// Nothing stops you from opening as many as you like. They are separate
/// objects that happen to share `singleton.txt`, and every `set` reads the
/// whole file, changes one line, and writes the whole file back.
///
/// Lines are split on the first `=`, so a key containing `=` comes back
/// truncated with the rest glued onto its value.
#[derive(Debug)]
pub struct FileSingleton {
    path: PathBuf,
}

impl FileSingleton {
    /// Creates an empty `singleton.txt` in `dir` if there isn't one yet.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let singleton = Self {
            path: dir.join(SINGLETON_FILENAME),
        };
        if !singleton.path.exists() {
            singleton.write_file(&[])?;
        }
        Ok(singleton)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores the value's `Display` form. Whatever type it had is gone.
    pub fn set(&self, key: &str, value: impl Display) -> Result<()> {
        let mut data = self.read_file()?;
        let value = value.to_string();
        match data.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => data.push((key.to_string(), value)),
        }
        self.write_file(&data)
    }

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_file()?
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v))
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut data = self.read_file()?;
        let before = data.len();
        data.retain(|(k, _)| k != key);
        if data.len() == before {
            return Ok(false);
        }
        self.write_file(&data)?;
        Ok(true)
    }

    pub fn reset(&self) -> Result<()> {
        self.write_file(&[])
    }

    /// Deletes `singleton.txt` itself.
    pub fn remove_file(self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Pairs in file order. Lines without `=` are skipped silently.
    fn read_file(&self) -> Result<Vec<(String, String)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut data: Vec<(String, String)> = Vec::new();
        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            match data.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value.to_string(),
                None => data.push((key.to_string(), value.to_string())),
            }
        }
        Ok(data)
    }

    fn write_file(&self, data: &[(String, String)]) -> Result<()> {
        let mut content = String::new();
        for (key, value) in data {
            content.push_str(key);
            content.push('=');
            content.push_str(value);
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        tracing::debug!(file = %self.path.display(), entries = data.len(), "rewrote singleton file");
        Ok(())
    }
}

impl KeyValueStore<String> for FileSingleton {
    fn insert(&mut self, key: &str, value: String) -> Result<()> {
        self.set(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        self.remove(key)
    }

    fn all(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.read_file()?.into_iter().collect())
    }

    fn clear(&mut self) -> Result<()> {
        self.reset()
    }
}
