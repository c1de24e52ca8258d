//! Package name and receipt path checks.
//!
//! Package names become a single directory under the sources root and a
//! single file under the receipts directory, so they must not carry any
//! separator, root or parent component.

use anyhow::Result;
use std::path::{Component, Path};

/// Fail unless `name` is exactly one plain path component.
pub fn check_package_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => anyhow::bail!("Invalid package name: {:?}", name),
    }
}

/// Whether `path` stays below the directory it is joined onto.
pub fn is_contained(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}
