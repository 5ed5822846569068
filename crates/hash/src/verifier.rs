//! Local file checks against a declared size and digest

use crate::HashAlgorithm;
use cyget_errors::Error;
use cyget_types::Artifact;
use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;

/// The expensive half of verification, separated so callers can observe it
pub trait ContentHasher: Send + Sync {
    /// Hex digest of the file at `path`
    fn hash_file(
        &self,
        algorithm: HashAlgorithm,
        path: &Path,
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// Chunked on-disk hashing
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingHasher;

impl ContentHasher for StreamingHasher {
    async fn hash_file(&self, algorithm: HashAlgorithm, path: &Path) -> Result<String, Error> {
        crate::hash_file(algorithm, path).await
    }
}

/// Checks a local file against an [`Artifact`]
///
/// Never mutates the file. Reports success only when both the size and
/// the digest match.
#[derive(Debug, Clone, Default)]
pub struct ArtifactVerifier<H = StreamingHasher> {
    hasher: H,
}

impl ArtifactVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: ContentHasher> ArtifactVerifier<H> {
    /// Use a custom hasher
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    /// Access the underlying hasher
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Whether `local_path` holds exactly the declared artifact
    ///
    /// A missing file or a size mismatch returns `false` without reading
    /// any content. An undetectable digest algorithm never verifies.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be inspected or read.
    pub async fn verify(&self, artifact: &Artifact, local_path: &Path) -> Result<bool, Error> {
        let metadata = match tokio::fs::metadata(local_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(Error::io_with_path(&e, local_path)),
        };

        if !metadata.is_file() || metadata.len() != artifact.size {
            tracing::debug!(
                path = %local_path.display(),
                expected = artifact.size,
                actual = metadata.len(),
                "size mismatch"
            );
            return Ok(false);
        }

        let Some(algorithm) = HashAlgorithm::detect(&artifact.hash) else {
            tracing::warn!(hash = %artifact.hash, "unrecognized digest length");
            return Ok(false);
        };

        let actual = self.hasher.hash_file(algorithm, local_path).await?;
        Ok(actual.eq_ignore_ascii_case(&artifact.hash))
    }
}
