use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::payload::{decode_collection, decode_record, DecodeError};
use crate::{ApiEndpoints, ComicPayload, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 32 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
        }
    }
}

/// How the detail view obtains its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLookup {
    /// Re-fetch the whole collection; the caller resolves the id locally.
    #[default]
    FullCollection,
    /// Ask `GET /api/comics/{id}`; 404 means "no such comic".
    RecordEndpoint,
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_collection(&self) -> Result<Vec<ComicPayload>, FetchError>;

    /// Records to resolve `id` against. May hold the whole collection, one
    /// record, or nothing.
    async fn fetch_detail(&self, id: &str) -> Result<Vec<ComicPayload>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    endpoints: ApiEndpoints,
    settings: FetchSettings,
    lookup: DetailLookup,
}

impl ReqwestFetcher {
    pub fn new(endpoints: ApiEndpoints, settings: FetchSettings, lookup: DetailLookup) -> Self {
        Self {
            endpoints,
            settings,
            lookup,
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    /// GET `url` and return the body. `Ok(None)` for 404 when `missing_ok`.
    async fn get_body(&self, url: &str, missing_ok: bool) -> Result<Option<Vec<u8>>, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        engine_debug!("GET {}", parsed);
        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if missing_ok && status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(Some(bytes))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_collection(&self) -> Result<Vec<ComicPayload>, FetchError> {
        let url = self.endpoints.collection_url();
        let bytes = self.get_body(&url, false).await?.unwrap_or_default();
        let comics = decode_collection(&bytes).map_err(map_decode_error)?;
        engine_info!("Fetched {} comics from {}", comics.len(), url);
        Ok(comics)
    }

    async fn fetch_detail(&self, id: &str) -> Result<Vec<ComicPayload>, FetchError> {
        match self.lookup {
            DetailLookup::FullCollection => self.fetch_collection().await,
            DetailLookup::RecordEndpoint => {
                let url = self.endpoints.record_url(id);
                match self.get_body(&url, true).await? {
                    Some(bytes) => decode_record(&bytes).map_err(map_decode_error),
                    None => {
                        engine_info!("No comic {} at {}", id, url);
                        Ok(Vec::new())
                    }
                }
            }
        }
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

fn map_decode_error(err: DecodeError) -> FetchError {
    FetchError::new(FailureKind::Decode, err.to_string())
}
