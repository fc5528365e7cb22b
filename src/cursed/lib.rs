//! # Cursed Architecture
//!
//! Cursed is a **gallery of anti-patterns**: 23 everyday programming tasks,
//! each solved in a deliberately terrible way and placed next to the correct
//! solution, with timings and a short note on what went wrong.
//!
//! Like any library with a CLI client, the gallery is layered so that none of
//! the demos knows it is being shown in a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, handles terminal I/O  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves demo names, owns per-run scratch directories    │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per demo: cursed version, correct version,    │
//! │    and a `run` harness that compares them                   │
//! │  - Collects output lines instead of printing                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait: text file, bincode file, memory     │
//! │  - One-file-per-node linked list                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! The only files the core touches are the ones the persistence demos are
//! about, and those live in a scratch directory that is removed after the run.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: each demo module tests that its cursed version agrees with
//!    the correct one where it should, and fails where it is supposed to.
//! 2. **API**: dispatch, name resolution and scratch cleanup.
//! 3. **CLI** (`tests/`): argument parsing and rendered output, end to end.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: The demos, plus the catalog and config commands
//! - [`store`]: Storage abstraction and the file-backed stores
//! - [`model`]: The [`model::Demo`] catalog
//! - [`config`]: Configuration management
//! - [`bench`]: Wall-clock timing for in-demo comparisons
//! - [`unwind`]: Silent panic catching
//! - [`rng`]: Seeded random source
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod bench;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod rng;
pub mod store;
pub mod unwind;

#[cfg(test)]
pub mod test_utils;
