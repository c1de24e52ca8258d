use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Get the default prefix directory
#[tracing::instrument(skip(runtime))]
pub fn default_prefix<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    if runtime.is_privileged() {
        Ok(system_prefix())
    } else {
        let home_dir = runtime
            .home_dir()
            .context("Could not find home directory")?;
        Ok(home_dir.join(".srcpm"))
    }
}

#[cfg(target_os = "macos")]
fn system_prefix() -> PathBuf {
    PathBuf::from("/opt/srcpm")
}

#[cfg(target_os = "windows")]
fn system_prefix() -> PathBuf {
    PathBuf::from(r"C:\ProgramData\srcpm")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_prefix() -> PathBuf {
    PathBuf::from("/usr/local/srcpm")
}
