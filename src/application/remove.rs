//! Remove action - uninstalls a resolved package list from the prefix.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::package::{InventoryStore, PackageManager, check_package_name};
use crate::runtime::Runtime;

/// Outcome of a removal sweep
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RemovalReport {
    /// Packages whose source directory and inventory entry were removed
    pub removed: Vec<String>,
    /// Packages the package manager failed to uninstall (still removed from the inventory)
    pub uninstall_failures: Vec<String>,
}

/// Remove action - validates, then removes packages one by one.
///
/// There is no rollback: each package is fully processed and the inventory
/// persisted before the next one is touched.
pub struct RemoveAction<'a, R: Runtime, M: PackageManager, I: InventoryStore> {
    runtime: &'a R,
    package_manager: &'a M,
    inventory: &'a mut I,
    src_dir: PathBuf,
}

impl<'a, R: Runtime, M: PackageManager, I: InventoryStore> RemoveAction<'a, R, M, I> {
    pub fn new(
        runtime: &'a R,
        package_manager: &'a M,
        inventory: &'a mut I,
        src_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runtime,
            package_manager,
            inventory,
            src_dir: src_dir.into(),
        }
    }

    /// Get the source directory for a package.
    ///
    /// Returns: `<src_dir>/<name>`
    pub fn package_src_dir(&self, name: &str) -> PathBuf {
        self.src_dir.join(name)
    }

    /// Fail unless every package has a plain name and is installed according
    /// to the package manager.
    pub fn validate(&self, packages: &[String]) -> Result<()> {
        for pkg in packages {
            check_package_name(pkg)?;
        }

        let missing: Vec<&str> = packages
            .iter()
            .filter(|pkg| !self.package_manager.is_installed(pkg))
            .map(|pkg| pkg.as_str())
            .collect();

        for pkg in &missing {
            error!("Package {} is not installed", pkg);
        }

        if !missing.is_empty() {
            anyhow::bail!(
                "Package(s) not installed: {}. Aborting.",
                missing.join(", ")
            );
        }

        Ok(())
    }

    /// Validate the whole list, then remove each package in order.
    pub fn execute(&mut self, packages: &[String]) -> Result<RemovalReport> {
        self.validate(packages)?;

        let mut report = RemovalReport::default();
        for pkg in packages {
            if !self.remove_package(pkg)? {
                report.uninstall_failures.push(pkg.clone());
            }
            report.removed.push(pkg.clone());
        }

        Ok(report)
    }

    /// Uninstall, delete sources, drop the inventory entry and persist.
    ///
    /// Returns whether the package manager uninstall succeeded. Failing to
    /// delete the source directory or to save the inventory is an error.
    pub fn remove_package(&mut self, name: &str) -> Result<bool> {
        info!("Removing package {}", name);

        debug!("Uninstalling {}", name);
        let uninstalled = self.package_manager.uninstall(name);
        if !uninstalled {
            warn!("Could not uninstall {} from prefix", name);
        }

        let pkg_src_dir = self.package_src_dir(name);
        self.remove_src_dir(name, &pkg_src_dir)?;

        debug!("Removing {} from inventory", name);
        if !self.inventory.remove(name) {
            debug!("{} was not recorded in the inventory", name);
        }
        self.inventory
            .save()
            .with_context(|| format!("Failed to update inventory after removing {}", name))?;

        Ok(uninstalled)
    }

    fn remove_src_dir(&self, name: &str, dir: &Path) -> Result<()> {
        debug!("Removing directory {:?}", dir);
        self.runtime
            .remove_dir_all(dir)
            .with_context(|| format!("Failed to remove source directory of {}: {:?}", name, dir))
    }
}
