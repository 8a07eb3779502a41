use reqwest::StatusCode;
use thiserror::Error;

/// Failures that can occur while reading from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a usable response (connection refused, timeout, etc.).
    #[error("catalog request failed")]
    Transport(#[from] reqwest::Error),

    /// The catalog has no episode stored under the requested slug.
    #[error("no episode found for slug \"{slug}\"")]
    NotFound { slug: String },

    /// The catalog answered with a non-success status other than 404.
    #[error("catalog responded with status {status}")]
    Status { status: StatusCode },

    /// The catalog answered 2xx but the body did not match the documented record shape.
    #[error("could not deserialize the catalog response body")]
    Payload(#[from] serde_json::Error),

    /// The configured base URL cannot have path segments appended to it.
    #[error("catalog base URL \"{url}\" cannot be used as a base")]
    InvalidBaseUrl { url: String },
}
