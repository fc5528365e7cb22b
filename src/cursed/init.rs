use crate::api::CursedApi;
use crate::commands::CursedPaths;
use crate::error::Result;
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::PathBuf;

pub const HOME_ENV: &str = "CURSED_HOME";

/// Picks the work directory: the explicit flag, then `$CURSED_HOME`, then the
/// platform cache dir, then the system temp dir.
pub fn resolve_work_dir(flag: Option<PathBuf>, env_home: Option<OsString>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(home) = env_home.filter(|h| !h.is_empty()) {
        return PathBuf::from(home);
    }
    ProjectDirs::from("com", "cursed", "cursed")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("cursed"))
}

pub fn initialize(work_dir: Option<PathBuf>) -> Result<CursedApi> {
    let work_dir = resolve_work_dir(work_dir, std::env::var_os(HOME_ENV));
    tracing::debug!(work_dir = %work_dir.display(), "resolved work dir");
    CursedApi::load(CursedPaths::new(work_dir))
}
