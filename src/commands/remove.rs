use anyhow::Result;
use log::{debug, warn};

use crate::application::{ClosureResolver, RemoveAction};
use crate::package::{
    Inventory, InventoryStore, RecipeIndex, SourcePackageManager, check_package_name,
};
use crate::runtime::Runtime;

use super::config::Config;

/// Remove packages, along with every installed package depending on them
/// unless `no_deps` is set.
#[tracing::instrument(skip(runtime, config))]
pub fn remove<R: Runtime>(
    runtime: R,
    packages: &[String],
    no_deps: bool,
    config: Config,
) -> Result<()> {
    if packages.is_empty() {
        anyhow::bail!("No packages specified.");
    }
    for name in packages {
        check_package_name(name)?;
    }
    debug!("Using prefix: {:?}", config.prefix);

    let recipes = RecipeIndex::new(&runtime, config.recipes_dir.clone());
    let package_manager =
        SourcePackageManager::new(&runtime, config.prefix.clone(), config.receipts_dir.clone());
    let mut inventory = Inventory::load(&runtime, &config.inventory_path)?;

    if no_deps {
        warn!("Not removing dependents. This may leave the prefix in an unusable state.");
    }
    let closure =
        ClosureResolver::new(&recipes).resolve(packages, &inventory.list_installed(), !no_deps)?;

    let mut action = RemoveAction::new(&runtime, &package_manager, &mut inventory, &config.src_dir);
    action.validate(&closure)?;
    show_removal_plan(packages, &closure, &config);
    let report = action.execute(&closure)?;

    for name in &report.removed {
        println!("Removed package {}", name);
    }
    if !report.uninstall_failures.is_empty() {
        println!(
            "Warning: could not uninstall {} from the prefix; installed files may remain.",
            report.uninstall_failures.join(", ")
        );
    }

    Ok(())
}

fn show_removal_plan(requested: &[String], closure: &[String], config: &Config) {
    println!();
    println!("=== Removal Plan ===");
    println!();

    println!("Packages to remove:");
    for name in closure {
        if requested.contains(name) {
            println!("  [DEL] {}", name);
        } else {
            println!("  [DEL] {} (depends on a removed package)", name);
        }
    }
    println!();

    println!("Directories to remove:");
    for name in closure {
        println!("  [DEL] {}", config.src_dir.join(name).display());
    }
    println!();
}
