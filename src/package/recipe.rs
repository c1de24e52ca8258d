//! Recipe lookup.
//!
//! Only the declared dependency list of a recipe matters for removal; the rest
//! of the recipe is carried along so the files stay readable.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Locally stored recipe metadata
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub depends: Option<Vec<String>>,
}

impl Recipe {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let recipe: Recipe = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse recipe {:?}", path))?;
        Ok(recipe)
    }
}

/// Source of "what does this package depend on" answers.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyLookup {
    /// Declared dependencies of `name`. Unknown packages have none.
    fn dependencies(&self, name: &str) -> Result<Vec<String>>;
}

/// Directory of `<name>.json` recipe files.
pub struct RecipeIndex<'a, R: Runtime> {
    runtime: &'a R,
    recipes_dir: PathBuf,
}

impl<'a, R: Runtime> RecipeIndex<'a, R> {
    pub fn new(runtime: &'a R, recipes_dir: PathBuf) -> Self {
        Self {
            runtime,
            recipes_dir,
        }
    }

    /// Returns: `<recipes_dir>/<name>.json`
    pub fn recipe_path(&self, name: &str) -> PathBuf {
        self.recipes_dir.join(format!("{}.json", name))
    }

    /// Load a recipe, `None` if there is no recipe for `name`.
    pub fn get(&self, name: &str) -> Result<Option<Recipe>> {
        let path = self.recipe_path(name);
        if !self.runtime.exists(&path) {
            return Ok(None);
        }
        Recipe::load(self.runtime, &path).map(Some)
    }
}

impl<R: Runtime> DependencyLookup for RecipeIndex<'_, R> {
    fn dependencies(&self, name: &str) -> Result<Vec<String>> {
        match self.get(name)? {
            Some(recipe) => Ok(recipe.depends.unwrap_or_default()),
            None => {
                debug!("No recipe for {}, assuming no dependencies", name);
                Ok(vec![])
            }
        }
    }
}
