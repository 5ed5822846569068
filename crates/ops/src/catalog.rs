//! Catalog acquisition

use crate::{CatalogSource, OpsCtx};
use cyget_config::constants::CATALOG_FILE_NAME;
use cyget_errors::{CatalogError, Error};
use cyget_events::{AppEvent, CatalogEvent, EventEmitter};
use cyget_index::{Catalog, CatalogCache};
use cyget_net::{mirror_url, Fetcher};

/// Load the catalog named by `source`
///
/// # Errors
///
/// Returns [`CatalogError::Unavailable`] if the file cannot be read or
/// downloaded, or a parse error for a malformed catalog.
pub async fn load_catalog(ctx: &OpsCtx, source: &CatalogSource) -> Result<Catalog, Error> {
    let cache = match source {
        CatalogSource::File(path) => CatalogCache::new(path),
        CatalogSource::Refresh => {
            let cache = CatalogCache::new(ctx.config.catalog_path());
            refresh(ctx, &cache).await?;
            cache
        }
        CatalogSource::Cached => {
            let cache = CatalogCache::new(ctx.config.catalog_path());
            if !cache.exists().await {
                refresh(ctx, &cache).await?;
            }
            cache
        }
    };

    let catalog = cache.load().await?;
    ctx.emit(AppEvent::Catalog(CatalogEvent::Loaded {
        path: cache.path().to_path_buf(),
        packages: catalog.len(),
    }));
    Ok(catalog)
}

async fn refresh(ctx: &OpsCtx, cache: &CatalogCache) -> Result<(), Error> {
    let url = mirror_url(&ctx.config.network.mirror, CATALOG_FILE_NAME)?.to_string();
    ctx.emit(AppEvent::Catalog(CatalogEvent::Refreshing {
        url: url.clone(),
        path: cache.path().to_path_buf(),
    }));

    // A failed transfer leaves the current catalog untouched
    Fetcher::new(ctx.net.clone())
        .fetch(&url, &cache.staging_path())
        .await
        .map_err(|e| CatalogError::Unavailable {
            path: url.clone(),
            message: e.to_string(),
        })?;

    cache.promote().await
}
