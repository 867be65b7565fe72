use std::time::Duration;

use feed_core::Page;
use feed_logging::feed_debug;
use futures_util::StreamExt;
use url::Url;

use crate::decode::decode_page;
use crate::{ApiKey, FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com/";

const TRENDING_PATH: &str = "v1/gifs/trending";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Fetches one page of the trending feed.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, api_key: &ApiKey, limit: u32, offset: u64)
        -> Result<Page, FetchError>;
}

/// Resolve the trending endpoint against `base`, keeping any path prefix.
pub fn trending_endpoint(base: &str) -> Result<Url, FetchError> {
    let mut base =
        Url::parse(base).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(TRENDING_PATH)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let endpoint = trending_endpoint(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    fn page_url(&self, api_key: &ApiKey, limit: u32, offset: u64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("api_key", api_key.expose())
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch_page(
        &self,
        api_key: &ApiKey,
        limit: u32,
        offset: u64,
    ) -> Result<Page, FetchError> {
        feed_debug!("fetching trending page limit={} offset={}", limit, offset);
        let response = self
            .client
            .get(self.page_url(api_key, limit, offset))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let page = decode_page(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        feed_debug!(
            "trending page offset={} returned {} items ({} bytes)",
            offset,
            page.len(),
            bytes.len()
        );
        Ok(page)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
