#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Concurrent artifact acquisition for cyget
//!
//! A resolved package set becomes one [`DownloadJob`] per package. A
//! bounded [`WorkerPool`] drives the jobs through an [`ArtifactDownloader`],
//! which reuses verified local copies, fetches what is missing and checks
//! every transfer against the catalog.

mod downloader;
mod pool;

pub use downloader::{local_path, ArtifactDownloader, DownloadJob};
pub use pool::{PoolOutcome, WorkerPool, DEFAULT_WIDTH};
