//! Streaming artifact transfer

use crate::client::NetClient;
use cyget_errors::{Error, NetworkError};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::{self as tokio_fs, File};
use tokio::io::AsyncWriteExt;

/// Removes a half-written destination unless the transfer completed
///
/// Also runs when the owning task is aborted mid-transfer.
struct PartialFileGuard {
    path: PathBuf,
    committed: bool,
}

impl PartialFileGuard {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.committed {
            // Best-effort cleanup - ignore errors
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Downloads a single URL to a local path
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: NetClient,
}

impl Fetcher {
    #[must_use]
    pub fn new(client: NetClient) -> Self {
        Self { client }
    }

    /// Stream `url` into `dest`, creating parent directories
    ///
    /// Returns the number of bytes written. A non-success status leaves no
    /// file behind; so does any failure after the body started streaming.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::HttpError`] for a non-success status, or a
    /// transport or I/O error.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, Error> {
        let response = self.client.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io_with_path(&e, parent))?;
        }

        let guard = PartialFileGuard::new(dest);
        let mut file = File::create(dest)
            .await
            .map_err(|e| Error::io_with_path(&e, dest))?;

        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io_with_path(&e, dest))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| Error::io_with_path(&e, dest))?;
        drop(file);

        guard.commit();
        tracing::debug!(%url, path = %dest.display(), bytes = written, "transfer complete");
        Ok(written)
    }
}
