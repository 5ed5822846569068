//! The parsed package index

use crate::Package;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Mapping from package name to package, immutable once built
///
/// Keys always equal the stored package's `name`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    packages: BTreeMap<String, Arc<Package>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package under its own name, replacing any previous entry
    pub fn insert(&mut self, package: Package) {
        self.packages
            .insert(package.name.clone(), Arc::new(package));
    }

    /// Look up a package by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Package>> {
        self.packages.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Packages tagged with `category`, in name order
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Arc<Package>> {
        self.packages
            .values()
            .filter(move |package| package.in_category(category))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Package>> {
        self.packages.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<Package> for Catalog {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for package in iter {
            catalog.insert(package);
        }
        catalog
    }
}
