use super::KeyValueStore;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub const DATABASE_FILENAME: &str = "database.pkl";

/// A map serialized in its entirety to `database.pkl`.
///
/// Reads decode the whole file to return one value; mutations decode the
/// whole file, change one entry and encode the whole file again. Cost grows
/// with the number of records, not with the size of the change.
#[derive(Debug)]
pub struct PickleDatabase<V> {
    path: PathBuf,
    bytes_written: Cell<u64>,
    bytes_read: Cell<u64>,
    _marker: PhantomData<V>,
}

impl<V: Serialize + DeserializeOwned> PickleDatabase<V> {
    /// Writes an empty database if `database.pkl` doesn't exist yet.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let db = Self {
            path: dir.join(DATABASE_FILENAME),
            bytes_written: Cell::new(0),
            bytes_read: Cell::new(0),
            _marker: PhantomData,
        };
        if !db.path.exists() {
            db.write_database(&BTreeMap::new())?;
        }
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total bytes encoded to disk since this handle was opened.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.get()
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.get()
    }

    /// Current size of the database file.
    pub fn file_size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    pub fn remove_file(self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn read_database(&self) -> Result<BTreeMap<String, V>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)?;
        self.bytes_read.set(self.bytes_read.get() + bytes.len() as u64);
        let data = bincode::deserialize(&bytes)?;
        Ok(data)
    }

    fn write_database(&self, data: &BTreeMap<String, V>) -> Result<()> {
        let bytes = bincode::serialize(data)?;
        fs::write(&self.path, &bytes)?;
        self.bytes_written
            .set(self.bytes_written.get() + bytes.len() as u64);
        tracing::debug!(
            file = %self.path.display(),
            records = data.len(),
            bytes = bytes.len(),
            "re-encoded database"
        );
        Ok(())
    }
}

impl<V: Serialize + DeserializeOwned> KeyValueStore<V> for PickleDatabase<V> {
    fn insert(&mut self, key: &str, value: V) -> Result<()> {
        let mut data = self.read_database()?;
        data.insert(key.to_string(), value);
        self.write_database(&data)
    }

    fn get(&self, key: &str) -> Result<Option<V>> {
        Ok(self.read_database()?.remove(key))
    }

    /// Rewrites the file only when the key was present.
    fn delete(&mut self, key: &str) -> Result<bool> {
        let mut data = self.read_database()?;
        if data.remove(key).is_none() {
            return Ok(false);
        }
        self.write_database(&data)?;
        Ok(true)
    }

    fn all(&self) -> Result<BTreeMap<String, V>> {
        self.read_database()
    }

    fn clear(&mut self) -> Result<()> {
        self.write_database(&BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CursedError;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let mut db: PickleDatabase<String> = PickleDatabase::open(dir.path()).unwrap();
        db.insert("k", "v".into()).unwrap();

        let reopened: PickleDatabase<String> = PickleDatabase::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn keeps_value_types() {
        let dir = tempfile::tempdir().unwrap();
        let mut db: PickleDatabase<(u32, f64, bool)> = PickleDatabase::open(dir.path()).unwrap();
        db.insert("row", (42, 3.5, true)).unwrap();
        assert_eq!(db.get("row").unwrap(), Some((42, 3.5, true)));
    }

    #[test]
    fn behaves_like_the_in_memory_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut db: PickleDatabase<u32> = PickleDatabase::open(dir.path()).unwrap();
        let mut mem = InMemoryStore::new();

        for i in 0..20u32 {
            let key = format!("key_{}", i % 7);
            if i % 4 == 3 {
                assert_eq!(db.delete(&key).unwrap(), mem.delete(&key).unwrap());
            } else {
                db.insert(&key, i).unwrap();
                mem.insert(&key, i).unwrap();
            }
        }
        assert_eq!(db.all().unwrap(), mem.all().unwrap());
    }

    #[test]
    fn every_insert_rewrites_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut db: PickleDatabase<String> = PickleDatabase::open(dir.path()).unwrap();
        for i in 0..50 {
            db.insert(&format!("key_{}", i), "x".repeat(100)).unwrap();
        }
        let size = db.file_size().unwrap();
        let before = db.bytes_written();
        db.insert("one_more", "y".into()).unwrap();
        let written = db.bytes_written() - before;
        assert!(written > size, "wrote {} for a file of {}", written, size);
    }

    #[test]
    fn deleting_a_missing_key_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut db: PickleDatabase<String> = PickleDatabase::open(dir.path()).unwrap();
        let before = db.bytes_written();
        assert!(!db.delete("ghost").unwrap());
        assert_eq!(db.bytes_written(), before);
    }

    #[test]
    fn garbage_file_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let db: PickleDatabase<String> = PickleDatabase::open(dir.path()).unwrap();
        fs::write(db.path(), [0xffu8; 9]).unwrap();
        assert!(matches!(db.get("k"), Err(CursedError::Encoding(_))));
    }
}
