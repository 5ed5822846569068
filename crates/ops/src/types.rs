//! Request types for the operations layer

use cyget_resolver::Request;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CatalogSource {
    /// Use `<target_dir>/setup.ini`, downloading it first if absent
    #[default]
    Cached,
    /// Always download a fresh copy into `<target_dir>/setup.ini`
    Refresh,
    /// Read this file and never touch the mirror for it
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a `--setupinfo` argument; `*` asks for a fresh download
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Self::Cached,
            Some("*") => Self::Refresh,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

/// Everything one `get` run needs
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub packages: Vec<Request>,
    pub catalog: CatalogSource,
    /// List would-be artifact paths instead of downloading
    pub no_download: bool,
}
