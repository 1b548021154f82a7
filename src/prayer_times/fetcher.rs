use std::time::Duration;

use log::debug;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use thiserror::Error;

use crate::models::PrayerMap;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server answered HTTP {status}")]
    Http { status: u16 },
    #[error("response is not a prayer time map: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reads the prayer time map from a single endpoint. Never retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    endpoint: Url,
}

impl Fetcher {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().user_agent(concat!("azan-clock/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, endpoint))
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn fetch_times(&self) -> Result<PrayerMap, FetchError> {
        debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let times: PrayerMap = serde_json::from_slice(&body)?;
        debug!("Received {} prayer times from {}", times.len(), self.endpoint);
        Ok(times)
    }
}
