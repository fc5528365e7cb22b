use crate::error::{CursedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Tunables for the demos, stored in `<work_dir>/config.json`.
///
/// Every field falls back to its default when missing from the file, so an
/// empty object is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CursedConfig {
    /// Seed for the chaos sort random source
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Artificial pause between chaos sort attempts, in milliseconds
    #[serde(default)]
    pub chaos_delay_ms: u64,

    /// Attempts after which chaos sort gives up
    #[serde(default = "default_chaos_max_attempts")]
    pub chaos_max_attempts: u64,

    /// Fractional digits kept by string division
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Maximum depth of the recursive loop
    #[serde(default = "default_recursion_limit")]
    pub recursion_limit: usize,

    /// Workers spun up to return one string
    #[serde(default = "default_pool_workers")]
    pub pool_workers: usize,

    /// Largest n handed to the naive fibonacci
    #[serde(default = "default_fib_ceiling")]
    pub fib_ceiling: u32,

    /// Iterations of the timing loops
    #[serde(default = "default_bench_iterations")]
    pub bench_iterations: usize,
}

fn default_seed() -> u64 {
    42
}

fn default_chaos_max_attempts() -> u64 {
    100_000
}

fn default_precision() -> usize {
    5
}

fn default_recursion_limit() -> usize {
    1000
}

fn default_pool_workers() -> usize {
    10
}

fn default_fib_ceiling() -> u32 {
    30
}

fn default_bench_iterations() -> usize {
    10_000
}

impl Default for CursedConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            chaos_delay_ms: 0,
            chaos_max_attempts: default_chaos_max_attempts(),
            precision: default_precision(),
            recursion_limit: default_recursion_limit(),
            pool_workers: default_pool_workers(),
            fib_ceiling: default_fib_ceiling(),
            bench_iterations: default_bench_iterations(),
        }
    }
}

impl CursedConfig {
    pub const KEYS: [&'static str; 8] = [
        "seed",
        "chaos-delay-ms",
        "chaos-max-attempts",
        "precision",
        "recursion-limit",
        "pool-workers",
        "fib-ceiling",
        "bench-iterations",
    ];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CursedConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "seed" => self.seed.to_string(),
            "chaos-delay-ms" => self.chaos_delay_ms.to_string(),
            "chaos-max-attempts" => self.chaos_max_attempts.to_string(),
            "precision" => self.precision.to_string(),
            "recursion-limit" => self.recursion_limit.to_string(),
            "pool-workers" => self.pool_workers.to_string(),
            "fib-ceiling" => self.fib_ceiling.to_string(),
            "bench-iterations" => self.bench_iterations.to_string(),
            other => return Err(CursedError::Config(format!("Unknown config key: {}", other))),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "seed" => self.seed = parse_value(key, value)?,
            "chaos-delay-ms" => self.chaos_delay_ms = parse_value(key, value)?,
            "chaos-max-attempts" => self.chaos_max_attempts = parse_positive(key, value)?,
            "precision" => self.precision = parse_value(key, value)?,
            "recursion-limit" => self.recursion_limit = parse_positive(key, value)?,
            "pool-workers" => self.pool_workers = parse_positive(key, value)?,
            "fib-ceiling" => {
                let ceiling: u32 = parse_value(key, value)?;
                if ceiling > 45 {
                    return Err(CursedError::Config(
                        "fib-ceiling above 45 would take minutes; pick something smaller".into(),
                    ));
                }
                self.fib_ceiling = ceiling;
            }
            "bench-iterations" => self.bench_iterations = parse_positive(key, value)?,
            other => return Err(CursedError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|k| self.get(k).ok().map(|v| (*k, v)))
            .collect()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CursedError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn parse_positive<T: std::str::FromStr + Default + PartialEq>(key: &str, value: &str) -> Result<T> {
    let parsed: T = parse_value(key, value)?;
    if parsed == T::default() {
        return Err(CursedError::Config(format!("{} must be greater than zero", key)));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CursedConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.precision, 5);
        assert_eq!(config.pool_workers, 10);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CursedConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, CursedConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = CursedConfig::default();
        config.set("precision", "8").unwrap();
        config.set("chaos-delay-ms", "3").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = CursedConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.precision, 8);
        assert_eq!(loaded.chaos_delay_ms, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), r#"{"seed": 7}"#).unwrap();

        let loaded = CursedConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.recursion_limit, 1000);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CursedConfig::default();
        assert!(config.set("pool-workers", "0").is_err());
        assert!(config.set("pool-workers", "many").is_err());
        assert!(config.set("fib-ceiling", "60").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_entries_cover_every_key() {
        let config = CursedConfig::default();
        let keys: Vec<_> = config.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, CursedConfig::KEYS.to_vec());
    }
}
