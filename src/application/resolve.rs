//! Dependency closure for removal.
//!
//! Removing a package must also remove every installed package that depends on
//! it, directly or transitively. The closure is computed as a fixed point over
//! the reverse "depends on" relation.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;
use log::{debug, trace};

use crate::package::DependencyLookup;

/// Expands a removal request with the installed packages that depend on it.
pub struct ClosureResolver<'a, D: DependencyLookup> {
    recipes: &'a D,
}

impl<'a, D: DependencyLookup> ClosureResolver<'a, D> {
    pub fn new(recipes: &'a D) -> Self {
        Self { recipes }
    }

    /// Resolve the ordered set of packages to remove.
    ///
    /// With `honor_deps` false the request is returned as given (minus
    /// duplicates), which may leave dependents of removed packages behind.
    ///
    /// The result lists the requested packages first, in request order,
    /// followed by the dependents found in each round in `installed` order.
    pub fn resolve(
        &self,
        requested: &[String],
        installed: &BTreeSet<String>,
        honor_deps: bool,
    ) -> Result<Vec<String>> {
        let mut members: HashSet<&str> = HashSet::new();
        let mut ordered: Vec<String> = Vec::new();
        for name in requested {
            if members.insert(name.as_str()) {
                ordered.push(name.clone());
            }
        }

        if !honor_deps {
            debug!("Dependency closure disabled, removing only {:?}", ordered);
            return Ok(ordered);
        }

        debug!("Resolving dependency list for clean removal");

        let mut deps_cache: HashMap<&str, Vec<String>> = HashMap::new();
        let mut frontier: HashSet<String> = ordered.iter().cloned().collect();

        while !frontier.is_empty() {
            let mut newly_found: Vec<&str> = Vec::new();

            for candidate in installed.iter().filter(|p| !members.contains(p.as_str())) {
                trace!("Checking if {} depends on {:?}", candidate, frontier);

                if !deps_cache.contains_key(candidate.as_str()) {
                    let deps = self.recipes.dependencies(candidate)?;
                    deps_cache.insert(candidate.as_str(), deps);
                }
                let depends_on_frontier = deps_cache[candidate.as_str()]
                    .iter()
                    .any(|dep| frontier.contains(dep));

                if depends_on_frontier {
                    debug!("{} depends on a package being removed", candidate);
                    newly_found.push(candidate.as_str());
                }
            }

            frontier.clear();
            for name in newly_found {
                members.insert(name);
                ordered.push(name.to_string());
                frontier.insert(name.to_string());
            }
        }

        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::MockDependencyLookup;
    use mockall::predicate::eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn installed(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Lookup backed by a static table; unknown packages have no dependencies.
    fn lookup(table: &'static [(&'static str, &'static [&'static str])]) -> MockDependencyLookup {
        let mut recipes = MockDependencyLookup::new();
        recipes.expect_dependencies().returning(move |name| {
            Ok(table
                .iter()
                .find(|(pkg, _)| *pkg == name)
                .map(|(_, deps)| names(deps))
                .unwrap_or_default())
        });
        recipes
    }

    #[test]
    fn test_direct_dependent_is_included() {
        let recipes = lookup(&[("C", &["A"])]);
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["A"]), &installed(&["A", "B", "C"]), true)
            .unwrap();

        assert_eq!(result, names(&["A", "C"]));
    }

    #[test]
    fn test_no_deps_returns_request_unchanged() {
        let mut recipes = MockDependencyLookup::new();
        recipes.expect_dependencies().never();
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["A"]), &installed(&["A", "B"]), false)
            .unwrap();

        assert_eq!(result, names(&["A"]));
    }

    #[test]
    fn test_transitive_dependents_are_included() {
        // D -> C -> B -> A
        let recipes = lookup(&[("B", &["A"]), ("C", &["B"]), ("D", &["C"])]);
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["A"]), &installed(&["A", "B", "C", "D", "E"]), true)
            .unwrap();

        assert_eq!(result, names(&["A", "B", "C", "D"]));
    }

    #[test]
    fn test_closure_is_idempotent() {
        let recipes = lookup(&[
            ("gnuradio", &["volk", "boost"]),
            ("gr-osmosdr", &["gnuradio", "uhd"]),
            ("gr-iqbal", &["gnuradio"]),
            ("uhd", &["boost"]),
        ]);
        let resolver = ClosureResolver::new(&recipes);
        let all = installed(&["boost", "gnuradio", "gr-iqbal", "gr-osmosdr", "uhd", "volk"]);

        let first = resolver.resolve(&names(&["volk"]), &all, true).unwrap();
        let second = resolver.resolve(&first, &all, true).unwrap();

        assert_eq!(first, names(&["volk", "gnuradio", "gr-iqbal", "gr-osmosdr"]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_requested_duplicates_are_collapsed() {
        let recipes = lookup(&[("B", &["A"])]);
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["A", "A", "B"]), &installed(&["A", "B"]), true)
            .unwrap();

        assert_eq!(result, names(&["A", "B"]));
    }

    #[test]
    fn test_dependency_cycle_terminates() {
        let recipes = lookup(&[("A", &["B"]), ("B", &["A"]), ("C", &["B"])]);
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["A"]), &installed(&["A", "B", "C"]), true)
            .unwrap();

        assert_eq!(result, names(&["A", "B", "C"]));
    }

    #[test]
    fn test_requested_package_not_in_inventory_is_kept() {
        let recipes = lookup(&[("B", &["ghost"])]);
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["ghost"]), &installed(&["B"]), true)
            .unwrap();

        assert_eq!(result, names(&["ghost", "B"]));
    }

    #[test]
    fn test_each_recipe_is_loaded_once() {
        // B -> A, C -> B: C is a candidate in two rounds
        let mut recipes = MockDependencyLookup::new();
        recipes
            .expect_dependencies()
            .with(eq("B"))
            .times(1)
            .returning(|_| Ok(names(&["A"])));
        recipes
            .expect_dependencies()
            .with(eq("C"))
            .times(1)
            .returning(|_| Ok(names(&["B"])));
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver
            .resolve(&names(&["A"]), &installed(&["A", "B", "C"]), true)
            .unwrap();

        assert_eq!(result, names(&["A", "B", "C"]));
    }

    #[test]
    fn test_recipe_error_propagates() {
        let mut recipes = MockDependencyLookup::new();
        recipes
            .expect_dependencies()
            .returning(|name| Err(anyhow::anyhow!("Failed to parse recipe {}", name)));
        let resolver = ClosureResolver::new(&recipes);

        let result = resolver.resolve(&names(&["A"]), &installed(&["A", "B"]), true);
        assert!(result.is_err());
    }
}
