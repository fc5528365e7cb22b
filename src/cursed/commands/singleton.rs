use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use crate::store::text::FileSingleton;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

const SET_COUNT: usize = 100;

/// A process-wide registry that actually is a singleton. Every call returns
/// the same object.
pub fn shared_registry() -> &'static Mutex<HashMap<String, String>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

#[allow(clippy::approx_constant)]
pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    result.line("1. Creating two \"singletons\":");
    let s1 = FileSingleton::open(ctx.scratch)?;
    let s2 = FileSingleton::open(ctx.scratch)?;
    result.line(format!("   s1 is s2: {}", std::ptr::eq(&s1, &s2)));
    s1.set("shared", "yes")?;
    result.line(format!(
        "   s1.set(\"shared\", \"yes\"), then s2.get(\"shared\") = {:?}",
        s2.get_value("shared")?
    ));
    let real_a = shared_registry();
    let real_b = shared_registry();
    result.line(format!(
        "   shared_registry() is shared_registry(): {}",
        std::ptr::eq(real_a, real_b)
    ));

    result.line(format!("2. {} sets, file vs HashMap:", SET_COUNT));
    s1.reset()?;
    let (file_result, file_time) = bench::timed(|| -> Result<()> {
        for i in 0..SET_COUNT {
            s1.set(&format!("key_{}", i), i)?;
        }
        Ok(())
    });
    file_result?;
    let mut memory = HashMap::new();
    let (_, memory_time) = bench::timed(|| {
        for i in 0..SET_COUNT {
            memory.insert(format!("key_{}", i), i);
        }
    });
    result.add_comparison(Comparison::new(
        format!("{} sets", SET_COUNT),
        file_time,
        memory_time,
    ));
    result.line(format!(
        "   {} set() calls = {} full file rewrites",
        SET_COUNT, SET_COUNT
    ));

    result.line("3. Type information lost:");
    s1.reset()?;
    s1.set("number", 42)?;
    s1.set("float", 3.14)?;
    s1.set("bool", true)?;
    for (label, key) in [("int 42", "number"), ("float 3.14", "float"), ("bool true", "bool")] {
        let got = s1.get_value(key)?.unwrap_or_default();
        result.line(format!("   Stored {}, got {:?} (a String)", label, got));
    }

    s2.reset()?;
    s1.remove_file()?;
    drop(s2);

    result.add_message(CmdMessage::warning(
        "Two objects sharing a file is not a singleton. It is a race condition with extra disk I/O.",
    ));
    result.add_message(CmdMessage::info(
        "A OnceLock<Mutex<HashMap>> gives one shared, typed, in-memory instance.",
    ));
    Ok(result)
}
