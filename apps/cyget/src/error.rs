//! CLI error handling and exit codes

use std::fmt;

use cyget_errors::{CatalogError, Error, RequestError, UserFacingError};

/// How a run ended, as reported to the parent process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCondition {
    Ok = 0,
    InvalidArguments = 1,
    CatalogUnavailable = 2,
    VerificationFailed = 3,
    CatalogStale = 4,
    TransferError = 5,
    InvalidResponseFile = 6,
    UserCancelled = 130,
}

impl ExitCondition {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Operations error
    Ops(Error),
    /// Invalid command arguments
    InvalidArguments(String),
}

impl CliError {
    /// Map the failure onto the process exit condition
    pub fn exit_condition(&self) -> ExitCondition {
        match self {
            CliError::InvalidArguments(_) => ExitCondition::InvalidArguments,
            CliError::Ops(err) => match err {
                Error::Catalog(CatalogError::Stale) => ExitCondition::CatalogStale,
                Error::Catalog(_) => ExitCondition::CatalogUnavailable,
                Error::Integrity(_) => ExitCondition::VerificationFailed,
                Error::Request(RequestError::InvalidResponseFile { .. }) => {
                    ExitCondition::InvalidResponseFile
                }
                Error::Request(_) | Error::Config(_) => ExitCondition::InvalidArguments,
                Error::Cancelled => ExitCondition::UserCancelled,
                Error::Network(_) | Error::Io { .. } | Error::Internal(_) => {
                    ExitCondition::TransferError
                }
            },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CliError::Ops(Error::Cancelled))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<Error> for CliError {
    fn from(e: Error) -> Self {
        CliError::Ops(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyget_errors::{IntegrityError, NetworkError};

    #[test]
    fn test_exit_conditions() {
        let stale: CliError = Error::from(CatalogError::Stale).into();
        assert_eq!(stale.exit_condition().code(), 4);

        let verify: CliError = Error::from(IntegrityError::VerificationFailed {
            package: "foo".into(),
            path: "packages/foo.tar.xz".into(),
        })
        .into();
        assert_eq!(verify.exit_condition(), ExitCondition::VerificationFailed);

        let http: CliError = Error::from(NetworkError::HttpError {
            status: 500,
            url: "http://mirror/x".into(),
        })
        .into();
        assert_eq!(http.exit_condition().code(), 5);

        let cancelled: CliError = Error::Cancelled.into();
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.exit_condition().code(), 130);

        assert_eq!(
            CliError::InvalidArguments("x".into()).exit_condition().code(),
            1
        );

        let empty: CliError = Error::from(RequestError::InvalidArguments("no packages".into())).into();
        assert_eq!(empty.exit_condition(), ExitCondition::InvalidArguments);
    }
}
