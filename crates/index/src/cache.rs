//! The catalog copy kept in the target directory

use crate::parse_catalog;
use cyget_errors::{CatalogError, Error};
use cyget_types::Catalog;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Catalog file manager
#[derive(Clone, Debug)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    /// Manage the catalog file at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the catalog
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] if the file cannot be read,
    /// or a parse error if its contents are malformed.
    pub async fn load(&self) -> Result<Catalog, Error> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Unavailable {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        parse_catalog(&text)
    }

    /// Where a fresh download is written before [`Self::promote`]
    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        self.path.with_extension("ini.tmp")
    }

    /// Atomically replace the catalog file with the staged download
    ///
    /// # Errors
    ///
    /// Returns an error if the staged file cannot be renamed into place.
    pub async fn promote(&self) -> Result<(), Error> {
        let staging = self.staging_path();
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| Error::io_with_path(&e, &self.path))?;
        tracing::debug!(path = %self.path.display(), "catalog replaced");
        Ok(())
    }

    /// Check if the catalog file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }
}
