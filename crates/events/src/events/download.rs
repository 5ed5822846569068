use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Download-specific events, one per job transition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    /// Artifact transfer started
    Started {
        package: String,
        url: String,
        file_name: String,
    },

    /// Local file already matches the declared size and hash
    CacheHit {
        package: String,
        file_name: String,
        path: PathBuf,
    },

    /// Selected spec declares no binary artifact; nothing to fetch
    NoBinary { package: String, spec: String },

    /// Artifact fetched and verified
    Completed {
        package: String,
        path: PathBuf,
        size: u64,
    },

    /// Local file did not match the catalog
    VerifyFailed { package: String, path: PathBuf },

    /// Transfer failed
    Failed {
        package: String,
        url: String,
        error: String,
    },
}
