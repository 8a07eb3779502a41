//! Client for the podcast catalog API that podgen renders pages from.

mod error;
pub mod models;
mod settings;

pub use error::CatalogError;
pub use settings::CatalogClientSettings;

use crate::models::CatalogEpisode;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Retrieves raw episode records from the podcast catalog.
///
/// The page builder only depends on this trait, so tests can swap in a stub
/// provider instead of a live catalog.
#[async_trait]
pub trait EpisodeProvider {
    /// Fetch the raw episode record identified by `slug`.
    async fn fetch_episode(&self, slug: &str) -> Result<CatalogEpisode, CatalogError>;
}

/// A catalog API client for podgen.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new [CatalogClient] from the given settings.
    pub fn new(settings: CatalogClientSettings) -> Result<Self, CatalogError> {
        let CatalogClientSettings { base_url, timeout } = settings;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        let http = Client::builder()
            .user_agent(concat!("podgen/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(CatalogClient { http, base_url })
    }

    fn episode_url(&self, slug: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("podgen validated the base URL on construction, but it cannot be a base.")
            .pop_if_empty()
            .push("episodes")
            .push(slug);
        url
    }
}

#[async_trait]
impl EpisodeProvider for CatalogClient {
    async fn fetch_episode(&self, slug: &str) -> Result<CatalogEpisode, CatalogError> {
        let url = self.episode_url(slug);
        debug!(url = %url, "Requesting an episode record from the catalog.");
        let response = self.http.get(url).send().await?;
        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound {
                slug: String::from(slug),
            }),
            status => Err(CatalogError::Status { status }),
        }
    }
}
