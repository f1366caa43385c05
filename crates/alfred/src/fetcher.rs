use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// How long a single remote image download may take
pub const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Some image hosts refuse requests that don't look like they come from a browser
pub const BROWSER_HEADERS: [(&str, &str); 7] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    ),
    ("Accept", "image/webp,image/apng,image/*,*/*;q=0.8"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("DNT", "1"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl FetchedImage {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Retrieves raw image bytes from a url
///
/// Any HTTP status is returned as a value; only transport failures are errors.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<FetchedImage>;
}

pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<FetchedImage> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?.to_vec();
        tracing::debug!("fetched {} bytes from {} with status {}", bytes.len(), url, status);

        Ok(FetchedImage { status, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_sends_headers() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cat.png"))
            .and(header("DNT", "1"))
            .and(header_exists("Accept-Language"))
            .and(header_exists("User-Agent"))
            .and(header("Upgrade-Insecure-Requests", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpImageFetcher::new()?;
        let image = fetcher
            .get(
                &format!("{}/cat.png", mock_server.uri()),
                &BROWSER_HEADERS,
                IMAGE_FETCH_TIMEOUT,
            )
            .await?;

        assert!(image.is_ok());
        assert_eq!(image.bytes, b"png-bytes");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_returns_error_status_as_value() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let fetcher = HttpImageFetcher::new()?;
        let image = fetcher
            .get(&mock_server.uri(), &BROWSER_HEADERS, IMAGE_FETCH_TIMEOUT)
            .await?;

        assert_eq!(image.status, 403);
        assert!(!image.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_times_out() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let fetcher = HttpImageFetcher::new()?;
        let result = fetcher
            .get(&mock_server.uri(), &[], Duration::from_millis(50))
            .await;

        assert!(result.is_err());
        Ok(())
    }
}
