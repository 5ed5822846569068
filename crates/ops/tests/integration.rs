//! Integration tests for ops crate

#[cfg(test)]
mod tests {
    use cyget_config::Config;
    use cyget_errors::{CatalogError, Error};
    use cyget_events::channel;
    use cyget_hash::{hash_bytes, HashAlgorithm};
    use cyget_ops::*;
    use cyget_resolver::Request;
    use httpmock::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;
    use tokio_util::sync::CancellationToken;

    const FOO: &[u8] = b"foo payload";
    const BAR: &[u8] = b"bar payload";

    fn setup_ini() -> String {
        let entry = |name: &str, requires: &str, content: &[u8]| {
            format!(
                "@ {name}\nrequires: {requires}\nversion: 1-1\n\
                 install: x86_64/release/{name}/{name}-1-1.tar.xz {} {}\n\n",
                content.len(),
                hash_bytes(HashAlgorithm::Md5, content)
            )
        };
        format!(
            "release: cygwin\narch: x86_64\n\n{}{}",
            entry("foo", "bar", FOO),
            entry("bar", "", BAR)
        )
    }

    fn context(mirror: String, target: &Path) -> OpsCtx {
        let (tx, _rx) = channel();
        let mut config = Config::default();
        config.network.mirror = mirror;
        config.network.retries = 0;
        config.paths.target_dir = Some(target.to_path_buf());

        OpsContextBuilder::new()
            .with_config(config)
            .with_event_sender(tx)
            .build()
            .unwrap()
    }

    fn request(names: &[&str], catalog: CatalogSource, no_download: bool) -> GetRequest {
        GetRequest {
            packages: names.iter().map(|n| Request::new(*n)).collect(),
            catalog,
            no_download,
        }
    }

    #[tokio::test]
    async fn test_builder_requires_event_sender() {
        assert!(OpsContextBuilder::new().build().is_err());
    }

    #[test]
    fn test_catalog_source_from_arg() {
        assert_eq!(CatalogSource::from_arg(None), CatalogSource::Cached);
        assert_eq!(CatalogSource::from_arg(Some("*")), CatalogSource::Refresh);
        assert_eq!(
            CatalogSource::from_arg(Some("local.ini")),
            CatalogSource::File(PathBuf::from("local.ini"))
        );
    }

    #[tokio::test]
    async fn test_missing_catalog_is_downloaded_once() {
        let server = MockServer::start();
        let ini = server.mock(|when, then| {
            when.method(GET).path("/cygwin/setup.ini");
            then.status(200).body(setup_ini());
        });

        let temp = tempdir().unwrap();
        let ctx = context(server.url("/cygwin"), temp.path());

        let catalog = load_catalog(&ctx, &CatalogSource::Cached).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(temp.path().join("setup.ini").exists());

        load_catalog(&ctx, &CatalogSource::Cached).await.unwrap();
        assert_eq!(ini.hits(), 1);

        load_catalog(&ctx, &CatalogSource::Refresh).await.unwrap();
        assert_eq!(ini.hits(), 2);
    }

    #[tokio::test]
    async fn test_explicit_catalog_file_missing() {
        let temp = tempdir().unwrap();
        let ctx = context("http://127.0.0.1:9/cygwin".into(), temp.path());

        let err = load_catalog(&ctx, &CatalogSource::File(temp.path().join("nope.ini")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_mirror_is_catalog_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cygwin/setup.ini");
            then.status(500);
        });

        let temp = tempdir().unwrap();
        let ctx = context(server.url("/cygwin"), temp.path());
        let err = load_catalog(&ctx, &CatalogSource::Refresh).await.unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_existing_catalog() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cygwin/setup.ini");
            then.status(404);
        });

        let temp = tempdir().unwrap();
        let ini = temp.path().join("setup.ini");
        tokio::fs::write(&ini, setup_ini()).await.unwrap();
        let ctx = context(server.url("/cygwin"), temp.path());

        assert!(load_catalog(&ctx, &CatalogSource::Refresh).await.is_err());

        assert_eq!(tokio::fs::read_to_string(&ini).await.unwrap(), setup_ini());
        assert!(!temp.path().join("setup.ini.tmp").exists());
        let catalog = load_catalog(&ctx, &CatalogSource::Cached).await.unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_no_download_lists_paths() {
        let server = MockServer::start();
        let artifacts = server.mock(|when, then| {
            when.method(GET).path_contains("/x86_64/");
            then.status(200).body(FOO);
        });

        let temp = tempdir().unwrap();
        let ini = temp.path().join("local.ini");
        tokio::fs::write(&ini, setup_ini()).await.unwrap();
        let ctx = context(server.url("/cygwin"), temp.path());

        let paths = get(&ctx, &request(&["foo"], CatalogSource::File(ini), true))
            .await
            .unwrap();

        assert_eq!(
            paths,
            vec![
                temp.path().join("x86_64/release/bar/bar-1-1.tar.xz"),
                temp.path().join("x86_64/release/foo/foo-1-1.tar.xz"),
            ]
        );
        assert_eq!(artifacts.hits(), 0);
    }

    #[tokio::test]
    async fn test_get_downloads_closure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cygwin/setup.ini");
            then.status(200).body(setup_ini());
        });
        server.mock(|when, then| {
            when.method(GET).path("/cygwin/x86_64/release/foo/foo-1-1.tar.xz");
            then.status(200).body(FOO);
        });
        server.mock(|when, then| {
            when.method(GET).path("/cygwin/x86_64/release/bar/bar-1-1.tar.xz");
            then.status(200).body(BAR);
        });

        let temp = tempdir().unwrap();
        let ctx = context(server.url("/cygwin"), temp.path());

        let paths = get(&ctx, &request(&["foo", "unknown"], CatalogSource::Cached, false))
            .await
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(tokio::fs::read(&paths[0]).await.unwrap(), BAR);
        assert_eq!(tokio::fs::read(&paths[1]).await.unwrap(), FOO);
    }

    #[tokio::test]
    async fn test_forced_abort_downloads_nothing() {
        let server = MockServer::start();
        let artifacts = server.mock(|when, then| {
            when.method(GET).path_contains("/x86_64/");
            then.status(200).body(FOO);
        });

        let temp = tempdir().unwrap();
        let ini = temp.path().join("local.ini");
        tokio::fs::write(&ini, setup_ini()).await.unwrap();

        let (tx, _rx) = channel();
        let mut config = Config::default();
        config.network.mirror = server.url("/cygwin");
        config.paths.target_dir = Some(temp.path().to_path_buf());
        let abort = CancellationToken::new();
        abort.cancel();
        let ctx = OpsContextBuilder::new()
            .with_config(config)
            .with_event_sender(tx)
            .with_abort(abort)
            .build()
            .unwrap();

        let err = get(&ctx, &request(&["foo"], CatalogSource::File(ini), false))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert_eq!(artifacts.hits(), 0);
        assert!(!temp.path().join("x86_64").exists());
    }
}
