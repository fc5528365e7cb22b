use crate::commands::DemoContext;
use crate::config::CursedConfig;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub config: CursedConfig,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        // keep demo runs short under test
        let config = CursedConfig {
            fib_ceiling: 20,
            bench_iterations: 200,
            pool_workers: 3,
            ..CursedConfig::default()
        };
        Self {
            _temp_dir: temp_dir,
            config,
            root,
        }
    }

    pub fn ctx(&self) -> DemoContext<'_> {
        DemoContext::new(&self.config, &self.root)
    }
}
