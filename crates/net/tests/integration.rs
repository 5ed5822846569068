//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use cyget_errors::{Error, NetworkError};
    use cyget_net::*;
    use httpmock::prelude::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> NetClient {
        NetClient::new(NetConfig {
            retry_count: 0,
            retry_delay: Duration::from_millis(10),
            ..NetConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_creates_parent_dirs() {
        let server = MockServer::start();
        let content = b"test file content";
        let mock = server.mock(|when, then| {
            when.method(GET).path("/x86_64/release/foo/foo-1.0.tar.xz");
            then.status(200).body(content);
        });

        let temp = tempdir().unwrap();
        let dest = temp.path().join("x86_64/release/foo/foo-1.0.tar.xz");
        let fetcher = Fetcher::new(client());

        let written = fetcher
            .fetch(&server.url("/x86_64/release/foo/foo-1.0.tar.xz"), &dest)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(written, content.len() as u64);
        assert_eq!(tokio::fs::read(&dest).await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_http_error_leaves_no_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.tar.xz");
            then.status(404);
        });

        let temp = tempdir().unwrap();
        let dest = temp.path().join("missing.tar.xz");
        let url = server.url("/missing.tar.xz");

        let err = Fetcher::new(client()).fetch(&url, &dest).await.unwrap_err();

        assert!(err.is_http_status(404));
        match err {
            Error::Network(NetworkError::HttpError { url: failed, .. }) => assert_eq!(failed, url),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let temp = tempdir().unwrap();
        // Port 9 (discard) is not served in the test environment
        let err = Fetcher::new(client())
            .fetch("http://127.0.0.1:9/a.tar.xz", &temp.path().join("a.tar.xz"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }

    /// Serve one response that promises 1000 body bytes but sends 100,
    /// then closes the connection or keeps it open without sending more
    async fn short_body_server(hold_open: bool) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n")
                .await
                .unwrap();
            socket.write_all(&[b'x'; 100]).await.unwrap();
            socket.flush().await.unwrap();
            if hold_open {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        });

        format!("http://{addr}/x86_64/release/foo/foo-1.0.tar.xz")
    }

    #[tokio::test]
    async fn test_truncated_body_leaves_no_file() {
        let url = short_body_server(false).await;
        let temp = tempdir().unwrap();
        let dest = temp.path().join("x86_64/release/foo/foo-1.0.tar.xz");

        let err = Fetcher::new(client()).fetch(&url, &dest).await.unwrap_err();

        assert!(matches!(err, Error::Network(NetworkError::DownloadFailed(_))));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_aborted_transfer_leaves_no_file() {
        let url = short_body_server(true).await;
        let temp = tempdir().unwrap();
        let dest = temp.path().join("foo-1.0.tar.xz");

        let task = {
            let dest = dest.clone();
            tokio::spawn(async move { Fetcher::new(client()).fetch(&url, &dest).await })
        };

        // Wait until the transfer has started writing
        for _ in 0..500 {
            if dest.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(dest.exists());

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert!(!dest.exists());
    }
}
