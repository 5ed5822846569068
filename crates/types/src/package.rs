//! Package-related type definitions

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Spec every fully parsed package carries
pub const CURRENT_SPEC: &str = "current";

/// Bookkeeping package whose absence on the mirror means the catalog is stale
pub const UPDATE_INFO_DIR: &str = "_update-info-dir";

/// A single downloadable file declared by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    /// Path relative to the mirror root (and to the target directory)
    pub path: String,
    /// Declared size in bytes
    pub size: u64,
    /// Declared content digest, lowercase hex
    pub hash: String,
}

impl Artifact {
    /// Create an artifact, normalizing the digest to lowercase
    pub fn new(path: impl Into<String>, size: u64, hash: impl AsRef<str>) -> Self {
        Self {
            path: path.into(),
            size,
            hash: hash.as_ref().to_ascii_lowercase(),
        }
    }

    /// Final path component, used in progress messages
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes, {})", self.path, self.size, self.hash)
    }
}

/// A named version channel of a package ("current", "test", "prev", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSpec {
    pub name: String,
    pub version: Option<String>,
    /// Installable binary artifact; absent for source-only or stub specs
    pub binary: Option<Artifact>,
    pub source: Option<Artifact>,
}

impl VersionSpec {
    /// Create an empty spec with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            binary: None,
            source: None,
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub categories: BTreeSet<String>,
    /// Names of required packages (never `@category` references)
    pub requires: BTreeSet<String>,
    pub specs: BTreeMap<String, VersionSpec>,
}

impl Package {
    /// Create a package holding only an empty "current" spec
    pub fn new(name: impl Into<String>) -> Self {
        let mut specs = BTreeMap::new();
        specs.insert(CURRENT_SPEC.to_string(), VersionSpec::new(CURRENT_SPEC));
        Self {
            name: name.into(),
            short_description: None,
            long_description: None,
            categories: BTreeSet::new(),
            requires: BTreeSet::new(),
            specs,
        }
    }

    /// Select `preferred`, falling back to the "current" spec
    #[must_use]
    pub fn spec(&self, preferred: &str) -> Option<&VersionSpec> {
        self.specs
            .get(preferred)
            .or_else(|| self.specs.get(CURRENT_SPEC))
    }

    /// Whether the package is tagged with `category`
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}
