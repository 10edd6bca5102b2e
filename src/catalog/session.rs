use serde_json::Value;

use super::error::RequestError;

/// Minimal async transport used by the catalog fetcher.
///
/// Every call is a single attempt: no retries, no timeout beyond the client's own.
#[async_trait::async_trait]
pub trait CatalogSession: Send + Sync {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, RequestError>;
}

/// `reqwest::Client` plus the account credentials, sent as HTTP basic auth.
#[derive(Clone)]
pub struct AuthenticatedClient {
    client: reqwest::Client,
    api_key: String,
    api_secret: String,
}

impl AuthenticatedClient {
    pub fn new(client: reqwest::Client, api_key: String, api_secret: String) -> Self {
        Self {
            client,
            api_key,
            api_secret,
        }
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl CatalogSession for AuthenticatedClient {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, RequestError> {
        tracing::debug!(url, ?query, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await
            .map_err(|source| RequestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| RequestError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

/// In-memory stand-in for the media API, keyed by URL (query ignored).
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;

    pub(crate) type RequestLog = Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>;

    #[derive(Default)]
    pub(crate) struct FakeSession {
        routes: HashMap<String, Result<Value, u16>>,
        log: RequestLog,
    }

    impl FakeSession {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(mut self, url: &str, body: Value) -> Self {
            self.routes.insert(url.to_string(), Ok(body));
            self
        }

        pub(crate) fn fail(mut self, url: &str, status: u16) -> Self {
            self.routes.insert(url.to_string(), Err(status));
            self
        }

        pub(crate) fn log(&self) -> RequestLog {
            Arc::clone(&self.log)
        }
    }

    #[async_trait::async_trait]
    impl CatalogSession for FakeSession {
        async fn get_json(
            &self,
            url: &str,
            query: &[(&str, &str)],
        ) -> Result<Value, RequestError> {
            self.log.lock().unwrap().push((
                url.to_string(),
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));
            match self.routes.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(RequestError::Status {
                    status: *status,
                    url: url.to_string(),
                }),
                None => Err(RequestError::Status {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on a local port; the handle yields the raw request head.
    async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/demo/folders", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let (url, server) = serve_once(
            "HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = AuthenticatedClient::new(reqwest::Client::new(), "key".into(), "secret".into());

        let err = client
            .get_json(&url, &[("max_results", "5")])
            .await
            .unwrap_err();
        assert!(
            matches!(err, RequestError::Status { status: 401, .. }),
            "{err}"
        );

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /demo/folders?max_results=5 "), "{request}");
        // base64("key:secret")
        assert!(
            request.contains("authorization: basic a2v5onnly3jlda=="),
            "{request}"
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 9\r\nconnection: close\r\n\r\nnot json!",
        )
        .await;
        let client = AuthenticatedClient::new(reqwest::Client::new(), "k".into(), "s".into());

        let err = client.get_json(&url, &[]).await.unwrap_err();
        assert!(matches!(err, RequestError::Decode { .. }), "{err}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_json_body_is_returned() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 15\r\nconnection: close\r\n\r\n{\"folders\": []}",
        )
        .await;
        let client = AuthenticatedClient::new(reqwest::Client::new(), "k".into(), "s".into());

        let value = client.get_json(&url, &[]).await.unwrap();
        assert_eq!(value, serde_json::json!({ "folders": [] }));
        server.await.unwrap();
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client =
            AuthenticatedClient::new(reqwest::Client::new(), "key".into(), "hunter2".into());
        let out = format!("{:?}", client);
        assert!(out.contains("key"));
        assert!(!out.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = AuthenticatedClient::new(reqwest::Client::new(), "k".into(), "s".into());
        let err = client
            .get_json("http://127.0.0.1:1/demo/folders", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Http { .. }), "{err}");
    }
}
