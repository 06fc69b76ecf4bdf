use async_trait::async_trait;
use log::trace;
use reqwest::Client;
use url::Url;

use crate::{error::FetchError, feature::Page, fetch::PageSource};

/// Page source talking to the BAG API over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// `base` with `limit` and `offset` appended to whatever query it already has.
pub fn page_url(base: &Url, limit: usize, offset: usize) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string())
        .append_pair("offset", &offset.to_string());
    url
}

#[async_trait(?Send)]
impl PageSource for HttpPageSource {
    async fn fetch_page(
        &self,
        base: &Url,
        limit: usize,
        offset: usize,
    ) -> Result<Page, FetchError> {
        let url = page_url(base, limit, offset);
        trace!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.into(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    fn source() -> HttpPageSource {
        HttpPageSource::with_client(Client::builder().no_proxy().build().unwrap())
    }

    /// Answers a single request with `status` and `body`; the handle yields
    /// the request line it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_owned()
        });
        let base = Url::parse(&format!(
            "http://{addr}/collections/panden/items?woonplaats=Delft"
        ))
        .unwrap();
        (base, server)
    }

    #[test]
    fn appends_pagination() {
        let base = Url::parse("http://bag.test/collections/panden/items?woonplaats=Delft").unwrap();
        assert_eq!(
            page_url(&base, 50, 100).as_str(),
            "http://bag.test/collections/panden/items?woonplaats=Delft&limit=50&offset=100"
        );

        let bare = Url::parse("http://bag.test/collections/panden/items").unwrap();
        assert_eq!(
            page_url(&bare, 100, 0).query(),
            Some("limit=100&offset=0")
        );
    }

    #[test]
    fn status_error_reads_like_the_api() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            url: "http://bag.test".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 Not Found");
    }

    #[tokio::test]
    async fn reads_a_page() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","id":"pand-1","geometry":null,"properties":{}}],"total_count":75}"#,
        )
        .await;

        let page = source().fetch_page(&base, 50, 100).await.unwrap();
        assert_eq!(page.total_count, Some(75));
        assert_eq!(page.features.len(), 1);
        assert_eq!(page.features[0].id().as_deref(), Some("pand-1"));

        assert_eq!(
            server.await.unwrap(),
            "GET /collections/panden/items?woonplaats=Delft&limit=50&offset=100 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn unsuccessful_status() {
        let (base, server) = serve_once("503 Service Unavailable", "{}").await;

        let err = source().fetch_page(&base, 50, 0).await.unwrap_err();
        let FetchError::Status { status, url } = err else {
            panic!("expected a status error, got {err:?}");
        };
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(url.ends_with("woonplaats=Delft&limit=50&offset=0"), "{url}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body() {
        let (base, server) = serve_once("200 OK", "<html>not json</html>").await;

        let err = source().fetch_page(&base, 50, 0).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn nobody_listening() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = Url::parse(&format!("http://{addr}/collections/panden/items")).unwrap();

        let err = source().fetch_page(&base, 50, 0).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "{err:?}");
    }
}
