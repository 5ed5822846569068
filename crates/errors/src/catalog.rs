//! Catalog (setup.ini) error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum CatalogError {
    #[error("malformed catalog at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("catalog unavailable at {path}: {message}")]
    Unavailable { path: String, message: String },

    #[error("catalog is stale: a listed bookkeeping package is gone from the mirror")]
    Stale,
}

impl UserFacingError for CatalogError {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Self::Stale => Cow::Borrowed(
                "setup.ini file has expired, use '-s*' switch or update this file.",
            ),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Malformed { .. } => Some("Re-download the catalog with `-s '*'`."),
            Self::Unavailable { .. } => {
                Some("Check the --setupinfo path or fetch a fresh catalog with `-s '*'`.")
            }
            Self::Stale => Some("Refresh the catalog with `-s '*'` and run again."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Malformed { .. } => "catalog.malformed",
            Self::Unavailable { .. } => "catalog.unavailable",
            Self::Stale => "catalog.stale",
        })
    }
}
