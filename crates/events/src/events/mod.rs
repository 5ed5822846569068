use serde::{Deserialize, Serialize};

use crate::EventLevel;

pub mod catalog;
pub mod download;
pub mod general;
pub mod resolver;

pub use catalog::*;
pub use download::*;
pub use general::*;
pub use resolver::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Catalog fetch and parse
    Catalog(CatalogEvent),

    /// Dependency resolution
    Resolver(ResolverEvent),

    /// Per-artifact download and verification
    Download(DownloadEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for logging)
    #[must_use]
    pub fn domain(&self) -> &'static str {
        match self {
            Self::General(_) => "general",
            Self::Catalog(_) => "catalog",
            Self::Resolver(_) => "resolver",
            Self::Download(_) => "download",
        }
    }

    /// Severity of this event
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Resolver(ResolverEvent::UnknownReference { .. }) => EventLevel::Debug,
            Self::General(GeneralEvent::Warning { .. }) => EventLevel::Warn,
            Self::General(GeneralEvent::OperationCompleted { success: false, .. })
            | Self::Download(DownloadEvent::VerifyFailed { .. } | DownloadEvent::Failed { .. }) => {
                EventLevel::Error
            }
            _ => EventLevel::Info,
        }
    }
}
