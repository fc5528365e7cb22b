//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every client of
//! the gallery (the CLI, the benches, tests) goes through [`CursedApi`].
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the right demo module or ad-hoc entry point
//! - **Normalizes inputs** (demo names, day numbers and `dayNN` become [`Demo`])
//! - **Owns scratch directories**: every demo run gets a fresh `run-<uuid>`
//!   directory that is removed when the run ends, success or not
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Demo logic**: That belongs in `commands/*.rs`
//! - **Presentation**: No stdout, no colors, no tables
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and input normalization. What each demo prints
//! is tested in its own module.

use crate::commands::{self, CursedPaths, DemoContext};
use crate::config::CursedConfig;
use crate::error::Result;
use crate::model::Demo;
use std::str::FromStr;

/// The main API facade for the gallery.
pub struct CursedApi {
    paths: CursedPaths,
    config: CursedConfig,
}

impl CursedApi {
    pub fn new(paths: CursedPaths, config: CursedConfig) -> Self {
        Self { paths, config }
    }

    /// Builds the facade with the config stored in the work dir.
    pub fn load(paths: CursedPaths) -> Result<Self> {
        let config = CursedConfig::load(&paths.work_dir)?;
        Ok(Self::new(paths, config))
    }

    pub fn list_demos(&self) -> CmdResult {
        commands::catalog::run()
    }

    /// Runs the named demos in the order given. Every name is resolved before
    /// the first demo starts, so a typo fails fast.
    pub fn run_demos<I: AsRef<str>>(
        &self,
        names: &[I],
        progress: Option<&dyn Fn(f64)>,
    ) -> Result<Vec<CmdResult>> {
        let demos = parse_demos(names)?;
        demos
            .into_iter()
            .map(|demo| self.run_demo(demo, progress))
            .collect()
    }

    /// Runs all demos in day order.
    pub fn run_all(&self, progress: Option<&dyn Fn(f64)>) -> Result<Vec<CmdResult>> {
        Demo::ALL
            .iter()
            .map(|demo| self.run_demo(*demo, progress))
            .collect()
    }

    pub fn run_demo(&self, demo: Demo, progress: Option<&dyn Fn(f64)>) -> Result<CmdResult> {
        let scratch = self.paths.scratch()?;
        let mut ctx = DemoContext::new(&self.config, scratch.path());
        if let Some(progress) = progress {
            ctx = ctx.with_progress(progress);
        }
        tracing::info!(demo = %demo, day = demo.day(), "running demo");
        commands::run_demo(demo, &ctx)
    }

    pub fn calculate(&self, x: &str, op: &str, y: &str) -> Result<CmdResult> {
        commands::calculator::evaluate(x, op, y, self.config.precision)
    }

    pub fn parse_json(&self, text: &str) -> CmdResult {
        commands::regex_json::compare(text)
    }

    pub fn check_age(&self, text: &str) -> CmdResult {
        commands::exceptional::check(text)
    }

    pub fn api_requests<B: AsRef<str>>(&self, bodies: &[B]) -> CmdResult {
        commands::rest_api::replay(bodies)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &CursedPaths {
        &self.paths
    }

    pub fn settings(&self) -> &CursedConfig {
        &self.config
    }
}

fn parse_demos<I: AsRef<str>>(names: &[I]) -> Result<Vec<Demo>> {
    names.iter().map(|n| Demo::from_str(n.as_ref())).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CursedError;
    use crate::test_utils::TestEnv;
    use std::cell::Cell;

    fn api(env: &TestEnv) -> CursedApi {
        CursedApi::new(CursedPaths::new(&env.root), env.config.clone())
    }

    fn leftover_runs(env: &TestEnv) -> usize {
        std::fs::read_dir(&env.root)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("run-"))
            .count()
    }

    #[test]
    fn run_demos_resolves_every_name_form() {
        let env = TestEnv::new();
        let results = api(&env)
            .run_demos(&["fizzbuzz", "10", "day05"], None)
            .unwrap();
        let demos: Vec<_> = results.iter().map(|r| r.demo).collect();
        assert_eq!(
            demos,
            vec![
                Some(Demo::FizzBuzz),
                Some(Demo::HelloWorld),
                Some(Demo::ArithmeticBool)
            ]
        );
    }

    #[test]
    fn unknown_name_fails_before_anything_runs() {
        let env = TestEnv::new();
        let err = api(&env)
            .run_demos(&["pickle-db", "quicksort"], None)
            .unwrap_err();
        assert!(matches!(err, CursedError::UnknownDemo(name) if name == "quicksort"));
        assert_eq!(leftover_runs(&env), 0);
    }

    #[test]
    fn disk_demos_leave_no_scratch_behind() {
        let env = TestEnv::new();
        let api = api(&env);
        for demo in Demo::ALL.iter().filter(|d| d.touches_disk()) {
            api.run_demo(*demo, None).unwrap();
        }
        assert_eq!(leftover_runs(&env), 0);
    }

    #[test]
    fn progress_is_forwarded_to_chaos_sort() {
        let env = TestEnv::new();
        let calls = Cell::new(0usize);
        let observer = |_: f64| calls.set(calls.get() + 1);
        api(&env)
            .run_demo(Demo::ChaosSort, Some(&observer))
            .unwrap();
        assert!(calls.get() > 0);
    }

    #[test]
    fn ad_hoc_entry_points_dispatch() {
        let env = TestEnv::new();
        let api = api(&env);
        assert_eq!(api.calculate("2", "+", "3").unwrap().output.len(), 2);
        assert!(api.parse_json("[1, 2]").output[0].starts_with("Our parser:"));
        assert_eq!(api.check_age("42").output.len(), 4);
        let replay = api.api_requests(&[r#"{"action": "list"}"#]);
        assert!(replay.output[1].contains("-> 200"));
    }

    #[test]
    fn config_goes_through_the_work_dir() {
        let env = TestEnv::new();
        let api = api(&env);
        api.config(ConfigAction::Set("seed".into(), "7".into()))
            .unwrap();
        let reloaded = CursedApi::load(CursedPaths::new(&env.root)).unwrap();
        assert_eq!(reloaded.settings().seed, 7);
    }

    #[test]
    fn list_demos_covers_the_gallery() {
        let env = TestEnv::new();
        assert_eq!(api(&env).list_demos().listed_demos.len(), Demo::ALL.len());
    }
}
