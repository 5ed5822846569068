use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog acquisition and parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    /// Fresh catalog is being fetched from the mirror
    Refreshing { url: String, path: PathBuf },

    /// Catalog parsed from disk
    Loaded { path: PathBuf, packages: usize },
}
