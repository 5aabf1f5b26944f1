use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, error};

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not load web page {url}: received status code {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Anything that can turn a URL into page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            error!(
                "Could not load web page {}. Received status code {}",
                url,
                status.as_u16()
            );
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(transport)?;
        debug!(url, chars = text.chars().count(), "fetched page");
        Ok(text)
    }
}

/// In-memory fetcher that serves canned pages and records every request.
#[cfg(test)]
#[derive(Default)]
pub struct StaticFetcher {
    pages: std::collections::HashMap<String, String>,
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.insert(url.into(), text.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// The listing fixture at [`FIXTURE_LISTING_URL`], with every product
    /// link answered by the avocado detail page.
    pub fn from_fixtures() -> Self {
        let listing = std::fs::read_to_string("tests/fixtures/listing.html").unwrap();
        let detail = std::fs::read_to_string("tests/fixtures/avocado.html").unwrap();
        let tiles = crate::parser::listing::extract_tiles(&listing, None).unwrap();
        tiles.iter().fold(
            Self::new().with_page(FIXTURE_LISTING_URL, listing.clone()),
            |f, tile| f.with_page(tile.url.clone(), detail.clone()),
        )
    }
}

#[cfg(test)]
pub const FIXTURE_LISTING_URL: &str =
    "http://hiring-tests.s3-website-eu-west-1.amazonaws.com/2015_Developer_Scrape/5_products.html";

#[cfg(test)]
#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

// ── Tests ──
