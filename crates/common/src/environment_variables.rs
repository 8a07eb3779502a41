//! The list of environment variables used throughout the application.

// Catalog API environment variables
pub const CATALOG_URL: &str = "PODGEN_CATALOG_URL";
pub const CATALOG_TIMEOUT_SECONDS: &str = "PODGEN_CATALOG_TIMEOUT_SECONDS";

// Web server environment variables
pub const WEB_PORT: &str = "PODGEN_WEB_PORT";

// Miscellaneous
pub const LOG_FILTER: &str = "PODGEN_LOG_FILTER";
