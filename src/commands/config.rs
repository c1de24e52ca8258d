//! Resolved locations of everything the commands read and write.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::paths::default_prefix;

/// Name of the tool's state directory inside the prefix
const STATE_DIR: &str = ".srcpm";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Prefix root
    pub prefix: PathBuf,
    /// Package source checkouts, one subdirectory per package
    pub src_dir: PathBuf,
    pub recipes_dir: PathBuf,
    pub inventory_path: PathBuf,
    /// Install receipts of the package manager backend
    pub receipts_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration from command-line values, falling back to
    /// the default prefix for the current user.
    pub fn load<R: Runtime>(
        runtime: &R,
        prefix: Option<PathBuf>,
        recipes_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let prefix = match prefix {
            Some(path) => path,
            None => default_prefix(runtime)?,
        };
        debug!("Using prefix: {:?}", prefix);

        let mut config = Self::for_prefix(&prefix);
        if let Some(recipes_dir) = recipes_dir {
            config.recipes_dir = recipes_dir;
        }
        Ok(config)
    }

    /// Layout with every location derived from `prefix`.
    pub fn for_prefix(prefix: &Path) -> Self {
        let state_dir = prefix.join(STATE_DIR);
        Self {
            prefix: prefix.to_path_buf(),
            src_dir: prefix.join("src"),
            recipes_dir: state_dir.join("recipes"),
            inventory_path: state_dir.join("inventory.json"),
            receipts_dir: state_dir.join("receipts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{configure_mock_runtime_basics, test_home, test_prefix};

    #[test]
    fn test_for_prefix_layout() {
        let prefix = test_prefix();
        let config = Config::for_prefix(&prefix);

        assert_eq!(config.prefix, prefix);
        assert_eq!(config.src_dir, prefix.join("src"));
        assert_eq!(config.recipes_dir, prefix.join(".srcpm").join("recipes"));
        assert_eq!(
            config.inventory_path,
            prefix.join(".srcpm").join("inventory.json")
        );
        assert_eq!(config.receipts_dir, prefix.join(".srcpm").join("receipts"));
    }

    #[test]
    fn test_load_explicit_prefix_skips_defaults() {
        // No expectations: an explicit prefix never consults the runtime
        let runtime = MockRuntime::new();

        let config = Config::load(&runtime, Some(PathBuf::from("/opt/sdr")), None).unwrap();
        assert_eq!(config, Config::for_prefix(Path::new("/opt/sdr")));
    }

    #[test]
    fn test_load_default_prefix() {
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_basics(&mut runtime);

        let config = Config::load(&runtime, None, None).unwrap();
        assert_eq!(config.prefix, test_home().join(".srcpm"));
        assert_eq!(config.src_dir, test_home().join(".srcpm").join("src"));
    }

    #[test]
    fn test_load_recipes_override() {
        let runtime = MockRuntime::new();

        let config = Config::load(
            &runtime,
            Some(PathBuf::from("/opt/sdr")),
            Some(PathBuf::from("/srv/recipes")),
        )
        .unwrap();
        assert_eq!(config.recipes_dir, PathBuf::from("/srv/recipes"));
        assert_eq!(config.src_dir, PathBuf::from("/opt/sdr/src"));
    }
}
