use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use crate::store::memory::InMemoryStore;
use crate::store::pickle::PickleDatabase;
use crate::store::KeyValueStore;

const SIZES: [usize; 3] = [100, 500, 1000];
const PAYLOAD_RECORDS: usize = 1000;
const PAYLOAD_BYTES: usize = 100;

fn populate<S: KeyValueStore<String>>(store: &mut S, size: usize) -> Result<()> {
    store.clear()?;
    for idx in 0..size {
        store.insert(&format!("key_{}", idx), format!("value_{}", idx))?;
    }
    Ok(())
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut db: PickleDatabase<String> = PickleDatabase::open(ctx.scratch)?;
    let mut memory: InMemoryStore<String> = InMemoryStore::new();

    result.line("1. One insert into a growing database:");
    for size in SIZES {
        populate(&mut db, size)?;
        populate(&mut memory, size)?;

        let (inserted, cursed) = bench::timed(|| db.insert("new_key", "new_value".to_string()));
        inserted?;
        let (_, correct) = bench::timed(|| memory.insert("new_key", "new_value".to_string()));
        result.line(format!(
            "   {:4} records: single insert {:8.3}ms",
            size,
            cursed.as_secs_f64() * 1000.0
        ));
        result.add_comparison(Comparison::new(
            format!("insert into {} records", size),
            cursed,
            correct,
        ));
    }

    result.line(format!(
        "2. {} records of {} bytes each:",
        PAYLOAD_RECORDS, PAYLOAD_BYTES
    ));
    db.clear()?;
    for idx in 0..PAYLOAD_RECORDS {
        db.insert(&format!("key_{}", idx), "x".repeat(PAYLOAD_BYTES))?;
    }
    let size = db.file_size()?;
    let read_before = db.bytes_read();
    let written_before = db.bytes_written();
    db.get("key_0")?;
    let read_for_get = db.bytes_read() - read_before;
    db.insert("key_extra", "y".to_string())?;
    let written_for_insert = db.bytes_written() - written_before;

    result.line(format!("   database file: {:.1} KB", size as f64 / 1024.0));
    result.line(format!(
        "   get() one key reads {:.1} KB",
        read_for_get as f64 / 1024.0
    ));
    result.line(format!(
        "   insert() one key writes {:.1} KB",
        written_for_insert as f64 / 1024.0
    ));

    db.remove_file()?;

    result.add_message(CmdMessage::warning(
        "Two processes doing read-modify-write on one file lose each other's updates.",
    ));
    result.add_message(CmdMessage::info(
        "Keep the map in memory, or use an embedded database with indexes and transactions.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::pickle::DATABASE_FILENAME;
    use crate::test_utils::TestEnv;

    #[test]
    fn run_reports_sizes_and_cleans_up() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert_eq!(result.comparisons.len(), 3);
        assert!(result.output.iter().any(|l| l.contains("insert() one key writes")));
        assert!(!env.root.join(DATABASE_FILENAME).exists());
    }

    #[test]
    fn populate_fills_any_store() {
        let mut memory = InMemoryStore::new();
        populate(&mut memory, 10).unwrap();
        assert_eq!(memory.len().unwrap(), 10);
        assert_eq!(memory.get("key_3").unwrap().as_deref(), Some("value_3"));
    }
}
