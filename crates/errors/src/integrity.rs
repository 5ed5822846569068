//! Artifact integrity error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum IntegrityError {
    #[error("verify package {package} failed: {path}")]
    VerificationFailed { package: String, path: String },
}

impl UserFacingError for IntegrityError {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Self::VerificationFailed { package, path } => {
                Cow::Owned(format!("Verify package {package} failed : \n{path}"))
            }
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("The mirror served a file that does not match the catalog; try another mirror.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some("integrity.verification_failed")
    }
}
