use anyhow::Result;
use log::debug;

use crate::package::{Inventory, PackageManager, SourcePackageManager};
use crate::runtime::Runtime;

use super::config::Config;

/// List the packages recorded in the inventory
#[tracing::instrument(skip(runtime, config))]
pub fn list<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    debug!("Listing packages from {:?}", config.inventory_path);

    let inventory = Inventory::load(&runtime, &config.inventory_path)?;
    if inventory.entries().is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    let package_manager =
        SourcePackageManager::new(&runtime, config.prefix.clone(), config.receipts_dir.clone());

    for (name, entry) in inventory.entries() {
        let version = entry.version.as_deref().unwrap_or("(unknown)");
        if package_manager.is_installed(name) {
            println!("{} {}", name, version);
        } else {
            // Left behind by an interrupted or partially failed removal
            println!("{} {} (not installed)", name, version);
        }
    }

    Ok(())
}
