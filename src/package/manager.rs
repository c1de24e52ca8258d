//! Package manager backend.
//!
//! Source builds record the files they installed into the prefix in a receipt,
//! `<receipts_dir>/<name>.json`. A package is installed as far as the package
//! manager is concerned while its receipt exists, independent of the inventory.

use anyhow::{Context, Result};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::name::is_contained;

/// Install receipt written when a package is installed
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Receipt {
    #[serde(default)]
    pub name: String,
    /// Installed files, relative to the prefix
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Receipt {
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse receipt {:?}", path))
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PackageManager {
    fn is_installed(&self, name: &str) -> bool;

    /// Remove the package's installed files. Returns false on any failure.
    fn uninstall(&self, name: &str) -> bool;
}

/// Receipt-backed package manager for source builds.
pub struct SourcePackageManager<'a, R: Runtime> {
    runtime: &'a R,
    prefix: PathBuf,
    receipts_dir: PathBuf,
}

impl<'a, R: Runtime> SourcePackageManager<'a, R> {
    pub fn new(runtime: &'a R, prefix: PathBuf, receipts_dir: PathBuf) -> Self {
        Self {
            runtime,
            prefix,
            receipts_dir,
        }
    }

    /// Returns: `<receipts_dir>/<name>.json`
    pub fn receipt_path(&self, name: &str) -> PathBuf {
        self.receipts_dir.join(format!("{}.json", name))
    }

    fn remove_installed_files(&self, receipt: &Receipt) -> bool {
        let mut ok = true;
        for file in &receipt.files {
            if !is_contained(file) {
                warn!("Refusing to remove {:?}: not inside the prefix", file);
                ok = false;
                continue;
            }
            let path = self.prefix.join(file);
            if !self.runtime.exists(&path) {
                debug!("Already gone: {:?}", path);
                continue;
            }
            if let Err(e) = self.runtime.remove_file(&path) {
                warn!("Failed to remove {:?}: {:#}", path, e);
                ok = false;
            }
        }
        ok
    }
}

impl<R: Runtime> PackageManager for SourcePackageManager<'_, R> {
    fn is_installed(&self, name: &str) -> bool {
        self.runtime.exists(&self.receipt_path(name))
    }

    #[tracing::instrument(skip(self))]
    fn uninstall(&self, name: &str) -> bool {
        let receipt_path = self.receipt_path(name);
        let receipt = match Receipt::load(self.runtime, &receipt_path) {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Cannot read install receipt for {}: {:#}", name, e);
                return false;
            }
        };

        debug!("Removing {} installed file(s) of {}", receipt.files.len(), name);
        if !self.remove_installed_files(&receipt) {
            // Keep the receipt so the leftovers stay discoverable
            return false;
        }

        match self.runtime.remove_file(&receipt_path) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to remove receipt {:?}: {:#}", receipt_path, e);
                false
            }
        }
    }
}
