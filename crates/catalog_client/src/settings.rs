use anyhow::{Context, Result};
use podgen_common::environment::{
    get_env_var,
    variables::{CATALOG_TIMEOUT_SECONDS, CATALOG_URL},
};
use std::time::Duration;
use tracing::info;
use url::Url;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings to configure a [CatalogClient](crate::CatalogClient).
#[derive(Debug, Clone)]
pub struct CatalogClientSettings {
    pub base_url: Url,
    pub timeout: Duration,
}

impl CatalogClientSettings {
    /// Create a [CatalogClientSettings] by retrieving the values from the environment
    /// variables available to podgen. The timeout falls back to 30 seconds when the
    /// variable isn't set.
    pub fn from_environment() -> Result<Self> {
        Ok(CatalogClientSettings {
            base_url: get_base_url()?,
            timeout: get_timeout()?,
        })
    }
}

fn get_base_url() -> Result<Url> {
    let raw = get_env_var(CATALOG_URL)
        .with_context(|| "Could not retrieve the catalog URL from the environment.")?;
    info!(catalog_url = %raw, "Found catalog URL.");
    Url::parse(&raw).with_context(|| "Parsing of catalog URL failed.")
}

fn get_timeout() -> Result<Duration> {
    let seconds = match get_env_var(CATALOG_TIMEOUT_SECONDS) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Failed to parse \"{}\" as a number of seconds.", raw))?,
        Err(_) => DEFAULT_TIMEOUT_SECONDS,
    };
    Ok(Duration::from_secs(seconds))
}
