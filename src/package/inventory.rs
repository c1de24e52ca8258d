//! Persisted record of the packages installed into a prefix.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Per-package inventory record.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InventoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// On-disk shape of `inventory.json`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InventoryData {
    #[serde(default)]
    pub packages: BTreeMap<String, InventoryEntry>,
}

/// Read/remove/persist access to the inventory.
///
/// The removal sweep only ever shrinks the inventory, so there is no insert.
#[cfg_attr(test, mockall::automock)]
pub trait InventoryStore {
    /// Names of all packages currently recorded as installed.
    fn list_installed(&self) -> BTreeSet<String>;

    /// Drop a package from the in-memory inventory.
    /// Returns false if it was not recorded.
    fn remove(&mut self, name: &str) -> bool;

    /// Persist the in-memory inventory synchronously.
    fn save(&self) -> Result<()>;
}

/// File-backed inventory stored as pretty-printed JSON.
pub struct Inventory<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
    data: InventoryData,
}

impl<'a, R: Runtime> Inventory<'a, R> {
    /// Load the inventory at `path`. A missing file is an empty inventory.
    #[tracing::instrument(skip(runtime))]
    pub fn load(runtime: &'a R, path: &Path) -> Result<Self> {
        let data = if runtime.exists(path) {
            let content = runtime.read_to_string(path)?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse inventory {:?}", path))?
        } else {
            debug!("No inventory at {:?}, starting empty", path);
            InventoryData::default()
        };

        Ok(Self {
            runtime,
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn entries(&self) -> &BTreeMap<String, InventoryEntry> {
        &self.data.packages
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<R: Runtime> InventoryStore for Inventory<'_, R> {
    fn list_installed(&self) -> BTreeSet<String> {
        self.data.packages.keys().cloned().collect()
    }

    fn remove(&mut self, name: &str) -> bool {
        self.data.packages.remove(name).is_some()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !self.runtime.exists(parent)
        {
            self.runtime.create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        let temp_path = self.temp_path();
        self.runtime
            .write(&temp_path, content.as_bytes())
            .with_context(|| format!("Failed to write inventory to {:?}", temp_path))?;
        self.runtime
            .rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to save inventory to {:?}", self.path))
    }
}
