//! Resolve-then-download pipeline

use crate::{load_catalog, GetRequest, OpsCtx};
use cyget_acquire::{local_path, ArtifactDownloader, WorkerPool};
use cyget_errors::Error;
use cyget_events::EventEmitter;
use cyget_index::Catalog;
use cyget_net::Fetcher;
use cyget_resolver::{Request, ResolvedSet, Resolver};
use std::path::PathBuf;
use std::sync::Arc;

/// Resolve `requests` against `catalog` with the configured default spec
#[must_use]
pub fn resolve(ctx: &OpsCtx, catalog: &Catalog, requests: &[Request]) -> ResolvedSet {
    Resolver::new(catalog, ctx.config.general.version_spec.clone()).resolve(requests, ctx)
}

/// Would-be local paths of every binary artifact in `resolved`, sorted
#[must_use]
pub fn plan_paths(ctx: &OpsCtx, resolved: &ResolvedSet) -> Vec<PathBuf> {
    let target_dir = ctx.config.target_dir();
    let mut paths: Vec<PathBuf> = resolved
        .values()
        .filter_map(|package| package.version_spec()?.binary.as_ref())
        .map(|artifact| local_path(&target_dir, &artifact.path))
        .collect();
    paths.sort();
    paths
}

/// Download and verify every package in `resolved`
///
/// # Errors
///
/// Returns the first fatal job error, or `Cancelled` when interrupted.
pub async fn fetch_packages(ctx: &OpsCtx, resolved: &ResolvedSet) -> Result<Vec<PathBuf>, Error> {
    let downloader = Arc::new(
        ArtifactDownloader::new(
            Fetcher::new(ctx.net.clone()),
            ctx.config.network.mirror.clone(),
            ctx.config.target_dir(),
        )
        .with_event_sender(ctx.tx.clone()),
    );
    let pool =
        WorkerPool::new(ctx.config.general.parallel_downloads).with_abort(ctx.abort.clone());

    ctx.emit_operation_started("download");
    let outcome = downloader.download_all(resolved, &pool, &ctx.cancel).await;
    ctx.emit_operation_completed("download", outcome.failure.is_none());

    outcome.into_result()
}

/// Full run: load the catalog, resolve, then fetch or list
///
/// # Errors
///
/// Returns catalog, transfer and verification errors, or `Cancelled` if
/// interrupted while the catalog was loading or by a forced abort.
pub async fn get(ctx: &OpsCtx, request: &GetRequest) -> Result<Vec<PathBuf>, Error> {
    tracing::debug!(
        requested = request.packages.len(),
        no_download = request.no_download,
        "starting get"
    );
    let catalog = ctx
        .abort
        .run_until_cancelled(load_catalog(ctx, &request.catalog))
        .await
        .ok_or(Error::Cancelled)??;
    if ctx.cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let resolved = resolve(ctx, &catalog, &request.packages);

    if request.no_download {
        return Ok(plan_paths(ctx, &resolved));
    }
    fetch_packages(ctx, &resolved).await
}
