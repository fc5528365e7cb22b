//! Catching panics on purpose.
//!
//! Two demos use panics the way some code uses exceptions. The default panic
//! hook would print every one of them to stderr, so while a caught panic is
//! expected the hook is swapped for a silent one.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

static HOOK_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Runs `f`, catching any panic without printing it.
///
/// Calls may nest. Only the outermost one swaps the hook.
pub fn quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    let depth = DEPTH.with(Cell::get);
    if depth > 0 {
        DEPTH.with(|d| d.set(depth + 1));
        let result = panic::catch_unwind(AssertUnwindSafe(f));
        DEPTH.with(|d| d.set(depth));
        return result;
    }

    let _guard = HOOK_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    DEPTH.with(|d| d.set(1));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    DEPTH.with(|d| d.set(0));
    panic::set_hook(previous);
    result
}

/// The message a panic was raised with, if it was a string.
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
