//! Per-package fetch-if-needed-then-verify job

use crate::pool::{PoolOutcome, WorkerPool};
use cyget_errors::{CatalogError, Error, IntegrityError};
use cyget_events::{AppEvent, DownloadEvent, EventEmitter, EventSender};
use cyget_hash::{ArtifactVerifier, ContentHasher, StreamingHasher};
use cyget_net::{mirror_url, Fetcher};
use cyget_resolver::{ResolvedPackage, ResolvedSet};
use cyget_types::{Package, UPDATE_INFO_DIR};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Where a catalog-relative artifact path lands under `target_dir`
#[must_use]
pub fn local_path(target_dir: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(target_dir.to_path_buf(), |path, part| path.join(part))
}

/// One package to bring into the target directory
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub package: Arc<Package>,
    pub spec: String,
}

impl From<&ResolvedPackage> for DownloadJob {
    fn from(resolved: &ResolvedPackage) -> Self {
        Self {
            package: Arc::clone(&resolved.package),
            spec: resolved.spec.clone(),
        }
    }
}

/// Downloads and verifies binary artifacts under a target directory
#[derive(Debug)]
pub struct ArtifactDownloader<H = StreamingHasher> {
    fetcher: Fetcher,
    verifier: ArtifactVerifier<H>,
    mirror: String,
    target_dir: PathBuf,
    tx: Option<EventSender>,
}

impl ArtifactDownloader {
    /// Downloader with the streaming verifier
    pub fn new(fetcher: Fetcher, mirror: impl Into<String>, target_dir: impl Into<PathBuf>) -> Self {
        Self::with_verifier(fetcher, ArtifactVerifier::new(), mirror, target_dir)
    }
}

impl<H> EventEmitter for ArtifactDownloader<H> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl<H: ContentHasher + 'static> ArtifactDownloader<H> {
    pub fn with_verifier(
        fetcher: Fetcher,
        verifier: ArtifactVerifier<H>,
        mirror: impl Into<String>,
        target_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            verifier,
            mirror: mirror.into(),
            target_dir: target_dir.into(),
            tx: None,
        }
    }

    /// Report job transitions on `tx`
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Local path of a catalog-relative artifact path
    #[must_use]
    pub fn local_path(&self, relative: &str) -> PathBuf {
        local_path(&self.target_dir, relative)
    }

    /// Bring one package's binary artifact into the target directory
    ///
    /// Returns `None` when the selected spec declares no binary. A local
    /// file that already verifies is reused without touching the network;
    /// one that does not is deleted before the fetch.
    ///
    /// # Errors
    ///
    /// Returns an integrity error if the fetched file does not verify,
    /// [`CatalogError::Stale`] for a 404 on the bookkeeping package, or
    /// the transfer error.
    pub async fn download_and_verify(&self, job: &DownloadJob) -> Result<Option<PathBuf>, Error> {
        let package = &job.package;
        let Some(artifact) = package.spec(&job.spec).and_then(|spec| spec.binary.as_ref()) else {
            self.emit(AppEvent::Download(DownloadEvent::NoBinary {
                package: package.name.clone(),
                spec: job.spec.clone(),
            }));
            return Ok(None);
        };

        let dest = self.local_path(&artifact.path);

        if self.verifier.verify(artifact, &dest).await? {
            self.emit(AppEvent::Download(DownloadEvent::CacheHit {
                package: package.name.clone(),
                file_name: artifact.file_name().to_string(),
                path: dest.clone(),
            }));
            return Ok(Some(dest));
        }

        match tokio::fs::remove_file(&dest).await {
            Ok(()) => self.emit_warning(format!(
                "\"{}\" failed verification, downloading it again",
                artifact.file_name()
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io_with_path(&e, &dest)),
        }

        let url = mirror_url(&self.mirror, &artifact.path)?.to_string();
        self.emit(AppEvent::Download(DownloadEvent::Started {
            package: package.name.clone(),
            url: url.clone(),
            file_name: artifact.file_name().to_string(),
        }));

        if let Err(err) = self.fetcher.fetch(&url, &dest).await {
            if package.name == UPDATE_INFO_DIR && err.is_http_status(404) {
                return Err(CatalogError::Stale.into());
            }
            self.emit(AppEvent::Download(DownloadEvent::Failed {
                package: package.name.clone(),
                url,
                error: err.to_string(),
            }));
            return Err(err);
        }

        if !self.verifier.verify(artifact, &dest).await? {
            // Best-effort; a leftover file fails the next cache check anyway
            let _ = tokio::fs::remove_file(&dest).await;
            self.emit(AppEvent::Download(DownloadEvent::VerifyFailed {
                package: package.name.clone(),
                path: dest.clone(),
            }));
            return Err(IntegrityError::VerificationFailed {
                package: package.name.clone(),
                path: dest.display().to_string(),
            }
            .into());
        }

        self.emit(AppEvent::Download(DownloadEvent::Completed {
            package: package.name.clone(),
            path: dest.clone(),
            size: artifact.size,
        }));
        Ok(Some(dest))
    }

    /// Run one job per resolved package on `pool`
    ///
    /// Completed paths are returned sorted.
    pub async fn download_all(
        self: &Arc<Self>,
        resolved: &ResolvedSet,
        pool: &WorkerPool,
        cancel: &CancellationToken,
    ) -> PoolOutcome<PathBuf> {
        let jobs: Vec<DownloadJob> = resolved.values().map(DownloadJob::from).collect();
        let downloader = Arc::clone(self);

        let mut outcome = pool
            .run(
                jobs,
                move |job: DownloadJob| {
                    let downloader = Arc::clone(&downloader);
                    async move { downloader.download_and_verify(&job).await }
                },
                cancel,
            )
            .await;

        outcome.completed.sort();
        outcome
    }
}
