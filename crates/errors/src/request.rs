//! Errors in what the caller asked for

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RequestError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("invalid response file '{path}', {message}")]
    InvalidResponseFile { path: String, message: String },
}

impl UserFacingError for RequestError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArguments(_) => Some("Run `cyget --help` for usage."),
            Self::InvalidResponseFile { .. } => Some(
                "Expected <packages><package name=\"...\" spec=\"...\"/></packages>.",
            ),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidArguments(_) => "request.invalid_arguments",
            Self::InvalidResponseFile { .. } => "request.invalid_response_file",
        })
    }
}

