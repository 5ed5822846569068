#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content digests and artifact verification for cyget
//!
//! Catalog entries declare a hex digest without naming the algorithm; the
//! algorithm is inferred from the digest length. Files are always hashed
//! by streaming fixed-size chunks, never by loading them whole.

mod verifier;

pub use verifier::{ArtifactVerifier, ContentHasher, StreamingHasher};

use cyget_errors::Error;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Size of chunks for streaming hash computation
const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Digest algorithms a catalog may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Infer the algorithm from a hex digest's length
    ///
    /// Returns `None` for lengths no supported algorithm produces.
    #[must_use]
    pub fn detect(hex_digest: &str) -> Option<Self> {
        match hex_digest.len() {
            32 => Some(Self::Md5),
            64 => Some(Self::Sha256),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    fn hasher(self) -> DigestState {
        match self {
            Self::Md5 => DigestState::Md5(Md5::new()),
            Self::Sha256 => DigestState::Sha256(Sha256::new()),
            Self::Sha512 => DigestState::Sha512(Sha512::new()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        })
    }
}

enum DigestState {
    Md5(Md5),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl DigestState {
    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

/// Lowercase hex digest of an in-memory buffer
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    let mut state = algorithm.hasher();
    state.update(data);
    state.finalize_hex()
}

/// Lowercase hex digest of a file, read in 64KB chunks
///
/// # Errors
/// Returns an error if the file cannot be opened or a read fails.
pub async fn hash_file(algorithm: HashAlgorithm, path: &Path) -> Result<String, Error> {
    let mut file = File::open(path)
        .await
        .map_err(|e| Error::io_with_path(&e, path))?;

    let mut state = algorithm.hasher();
    let mut buffer = vec![0; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .map_err(|e| Error::io_with_path(&e, path))?;
        if n == 0 {
            break;
        }
        state.update(&buffer[..n]);
    }

    Ok(state.finalize_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_length() {
        assert_eq!(HashAlgorithm::detect(&"a".repeat(32)), Some(HashAlgorithm::Md5));
        assert_eq!(HashAlgorithm::detect(&"a".repeat(64)), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::detect(&"a".repeat(128)), Some(HashAlgorithm::Sha512));
        assert_eq!(HashAlgorithm::detect("abc"), None);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            hash_bytes(HashAlgorithm::Md5, b"abc"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            hash_bytes(HashAlgorithm::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_bytes(HashAlgorithm::Sha512, b"abc").len(), 128);
    }
}
