//! One module per demo.
//!
//! Every module carries the cursed implementation, its reference counterpart,
//! and a `run` harness that exercises both and collects what a terminal would
//! have printed into a [`CmdResult`].

use crate::bench::Comparison;
use crate::config::CursedConfig;
use crate::error::Result;
use crate::model::Demo;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub mod arithmetic_bool;
pub mod bit_reverse;
pub mod calculator;
pub mod catalog;
pub mod chaos_sort;
pub mod csv_tree;
pub mod config;
pub mod cursive_loop;
pub mod deque_stack;
pub mod emoji;
pub mod exceptional;
pub mod fibonacci;
pub mod fighting_queue;
pub mod fizzbuzz;
pub mod hello_world;
pub mod linked_disks;
pub mod linked_hashmap;
pub mod null_checks;
pub mod paranoid_search;
pub mod pickle_db;
pub mod regex_json;
pub mod rest_api;
pub mod singleton;
pub mod static_adder;
pub mod thread_pool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub demo: Option<Demo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listed_demos: Vec<Demo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CursedConfig>,
    pub output: Vec<String>,
    pub comparisons: Vec<Comparison>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn for_demo(demo: Demo) -> Self {
        Self {
            demo: Some(demo),
            ..Self::default()
        }
    }

    /// Appends one line of demo output.
    pub fn line(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_comparison(&mut self, comparison: Comparison) {
        self.comparisons.push(comparison);
    }

    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = output;
        self
    }

    pub fn with_messages(mut self, messages: Vec<CmdMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_listed_demos(mut self, demos: Vec<Demo>) -> Self {
        self.listed_demos = demos;
        self
    }

    pub fn with_config(mut self, config: CursedConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Where cursed keeps its config and the per-run scratch directories.
#[derive(Debug, Clone)]
pub struct CursedPaths {
    pub work_dir: PathBuf,
}

impl CursedPaths {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Creates a fresh `run-<uuid>` directory under the work dir.
    pub fn scratch(&self) -> Result<ScratchDir> {
        let path = self
            .work_dir
            .join(format!("run-{}", uuid::Uuid::new_v4().simple()));
        fs::create_dir_all(&path)?;
        tracing::debug!(path = %path.display(), "created scratch dir");
        Ok(ScratchDir { path })
    }
}

/// A scratch directory that is deleted when dropped, even if the demo failed.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not remove scratch dir");
        }
    }
}

/// What a demo may use while it runs.
#[derive(Clone, Copy)]
pub struct DemoContext<'a> {
    pub config: &'a CursedConfig,
    /// Directory the file-backed demos write into. Removed after the run.
    pub scratch: &'a Path,
    /// Receives fake progress values in `[0, 1]`.
    pub progress: Option<&'a dyn Fn(f64)>,
}

impl<'a> DemoContext<'a> {
    pub fn new(config: &'a CursedConfig, scratch: &'a Path) -> Self {
        Self {
            config,
            scratch,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn Fn(f64)) -> Self {
        self.progress = Some(progress);
        self
    }

    pub(crate) fn report_progress(&self, value: f64) {
        if let Some(progress) = self.progress {
            progress(value);
        }
    }
}

pub fn run_demo(demo: Demo, ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = match demo {
        Demo::FizzBuzz => fizzbuzz::run(ctx),
        Demo::Calculator => calculator::run(ctx),
        Demo::ChaosSort => chaos_sort::run(ctx),
        Demo::LinkedHashmap => linked_hashmap::run(ctx),
        Demo::ArithmeticBool => arithmetic_bool::run(ctx),
        Demo::CursiveLoop => cursive_loop::run(ctx),
        Demo::RegexJson => regex_json::run(ctx),
        Demo::ParanoidSearch => paranoid_search::run(ctx),
        Demo::Fibonacci => fibonacci::run(ctx),
        Demo::HelloWorld => hello_world::run(ctx),
        Demo::FileSingleton => singleton::run(ctx),
        Demo::PickleDb => pickle_db::run(ctx),
        Demo::RestApi => rest_api::run(ctx),
        Demo::ExceptionalFlow => exceptional::run(ctx),
        Demo::EmojiNames => emoji::run(ctx),
        Demo::NullChecks => null_checks::run(ctx),
        Demo::BitReverse => bit_reverse::run(ctx),
        Demo::ThreadPool => thread_pool::run(ctx),
        Demo::StaticAdder => static_adder::run(ctx),
        Demo::DequeStack => deque_stack::run(ctx),
        Demo::FightingQueue => fighting_queue::run(ctx),
        Demo::CsvTree => csv_tree::run(ctx),
        Demo::LinkedDisks => linked_disks::run(ctx),
    }?;
    result.demo = Some(demo);
    Ok(result)
}
