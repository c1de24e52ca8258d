//! Application layer - Use cases that coordinate the package collaborators.
//!
//! This layer contains the removal rules and orchestrates the flow of data
//! between the CLI layer and the inventory, recipes and package manager.

mod remove;
mod resolve;

pub use remove::{RemovalReport, RemoveAction};
pub use resolve::ClosureResolver;
