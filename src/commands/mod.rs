//! Command entry points invoked by the CLI.

pub mod config;
mod list;
mod paths;
mod remove;

pub use config::Config;
pub use list::list;
pub use paths::default_prefix;
pub use remove::remove;
