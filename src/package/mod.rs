//! Package management module
//!
//! Collaborators consulted and mutated by the removal sweep: the inventory of
//! installed packages, the recipe index and the package manager backend.

mod inventory;
mod manager;
mod name;
mod recipe;

pub use inventory::{Inventory, InventoryData, InventoryEntry, InventoryStore};
pub use manager::{PackageManager, Receipt, SourcePackageManager};
pub use name::check_package_name;
pub use recipe::{DependencyLookup, Recipe, RecipeIndex};

#[cfg(test)]
pub use inventory::MockInventoryStore;
#[cfg(test)]
pub use manager::MockPackageManager;
#[cfg(test)]
pub use recipe::MockDependencyLookup;
