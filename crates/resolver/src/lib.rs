#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Dependency resolution for cyget
//!
//! Turns requested package names and `@category` references into a
//! duplicate-free, transitively closed set of catalog packages.

mod resolver;

pub use resolver::Resolver;

use cyget_types::{Package, VersionSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One requested token, with an optional version spec override
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    /// Package name, or `@` followed by a category name
    pub name: String,
    /// Spec to fetch; the resolver default applies when absent
    pub spec: Option<String>,
}

impl Request {
    /// Request a name using the default spec
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: None,
        }
    }

    /// Request a name pinned to `spec`
    pub fn with_spec(name: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: Some(spec.into()),
        }
    }

    /// Category named by an `@category` token
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.name.strip_prefix('@')
    }
}

/// A package selected for download together with the spec to fetch
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub package: Arc<Package>,
    /// Requested spec name; may be absent from the package, see [`Self::version_spec`]
    pub spec: String,
}

impl ResolvedPackage {
    /// The selected spec, falling back to "current"
    #[must_use]
    pub fn version_spec(&self) -> Option<&VersionSpec> {
        self.package.spec(&self.spec)
    }
}

/// Resolution output keyed by package name
pub type ResolvedSet = BTreeMap<String, ResolvedPackage>;
