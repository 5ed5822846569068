#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for cyget
//!
//! This crate handles all HTTP operations: streaming catalog and artifact
//! downloads from the mirror into the target directory.

mod client;
mod fetch;

pub use client::{NetClient, NetConfig};
pub use fetch::Fetcher;

use cyget_errors::{Error, NetworkError};
use url::Url;

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or invalid according to RFC 3986.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
}

/// Resolve a catalog-relative path against the mirror root
///
/// The mirror is treated as a directory whether or not it ends in `/`.
///
/// # Errors
///
/// Returns an error if the mirror is not a valid base URL.
pub fn mirror_url(mirror: &str, relative: &str) -> Result<Url, Error> {
    let mut base = parse_url(mirror)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(relative.trim_start_matches('/'))
        .map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
}
