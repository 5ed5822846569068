//! Structured logging integration for events
//!
//! Every event is mirrored into tracing with structured fields, so a
//! `--debug` JSON log carries the full run history.

use cyget_events::{AppEvent, CatalogEvent, DownloadEvent, GeneralEvent, ResolverEvent};
use tracing::{debug, error, info, warn};

/// Log an `AppEvent` at its level with per-domain fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let domain = event.domain();
    match event {
        AppEvent::General(general) => match general {
            GeneralEvent::Warning { message, context } => {
                warn!(domain, context = ?context, "{message}");
            }
            GeneralEvent::DebugLog { message, context } => {
                debug!(domain, context = ?context, "{message}");
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(domain, operation = %operation, "Operation started");
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                if *success {
                    info!(domain, operation = %operation, success, "Operation completed");
                } else {
                    error!(domain, operation = %operation, success, "Operation failed");
                }
            }
        },

        AppEvent::Catalog(catalog) => match catalog {
            CatalogEvent::Refreshing { url, path } => {
                info!(domain, url = %url, path = %path.display(), "Refreshing catalog");
            }
            CatalogEvent::Loaded { path, packages } => {
                info!(domain, path = %path.display(), packages, "Catalog loaded");
            }
        },

        AppEvent::Resolver(resolver) => match resolver {
            ResolverEvent::Started { requested } => {
                info!(domain, requested, "Resolution started");
            }
            ResolverEvent::UnknownReference { token } => {
                debug!(domain, token = %token, "Unknown package or category ignored");
            }
            ResolverEvent::Completed { packages } => {
                info!(domain, packages, "Resolution completed");
            }
        },

        AppEvent::Download(download) => match download {
            DownloadEvent::Started {
                package,
                url,
                file_name,
            } => {
                info!(domain, package = %package, url = %url, file = %file_name, "Download started");
            }
            DownloadEvent::CacheHit {
                package,
                file_name,
                path,
            } => {
                info!(
                    domain,
                    package = %package,
                    file = %file_name,
                    path = %path.display(),
                    "Cached artifact verified"
                );
            }
            DownloadEvent::NoBinary { package, spec } => {
                info!(domain, package = %package, spec = %spec, "No binary artifact");
            }
            DownloadEvent::Completed {
                package,
                path,
                size,
            } => {
                info!(domain, package = %package, path = %path.display(), size, "Download completed");
            }
            DownloadEvent::VerifyFailed { package, path } => {
                error!(domain, package = %package, path = %path.display(), "Verification failed");
            }
            DownloadEvent::Failed {
                package,
                url,
                error,
            } => {
                error!(domain, package = %package, url = %url, error = %error, "Download failed");
            }
        },
    }
}
