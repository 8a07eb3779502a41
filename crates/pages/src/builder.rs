//! Turns a raw catalog record into a display-ready episode page.

use crate::models::EpisodeViewModel;
use crate::sanitize::sanitize_description;
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime};
use podgen_catalog_client::{CatalogError, EpisodeProvider};
use podgen_common::time::format_duration;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// How long a built page stays fresh before the platform revalidates it.
pub const REVALIDATE_SECONDS: u64 = 60 * 60 * 24;

/// Timestamp shapes the catalog has been seen to publish besides RFC 3339.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A built episode page together with the window the platform may serve it
/// for before rebuilding.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodePage {
    pub episode: EpisodeViewModel,
    pub revalidate_after: Duration,
}

/// Errors encountered while building an episode page.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("could not fetch the episode record from the catalog")]
    Fetch(#[from] CatalogError),
    #[error("episode carries an unparseable publication date \"{value}\"")]
    MalformedDate {
        value: String,
        source: chrono::ParseError,
    },
    #[error("episode carries an unparseable duration \"{value}\"")]
    MalformedDuration {
        value: String,
        source: ParseIntError,
    },
    #[error("could not serialize the built page")]
    Serialize(#[from] serde_json::Error),
}

/// Fetch the raw record for `slug` and shape it into an [EpisodePage].
///
/// The builder holds no state and caches nothing; deciding how long the
/// result lives is the artifact store's job. Builds for different slugs are
/// independent and may run concurrently.
pub async fn build_episode_page<T: EpisodeProvider>(
    provider: &T,
    slug: &str,
) -> Result<EpisodePage, BuildError> {
    let record = provider.fetch_episode(slug).await?;
    debug!(slug = %slug, "Shaping the raw episode record into a view model.");
    let duration = parse_duration_seconds(&record.file.duration)?;
    let episode = EpisodeViewModel {
        id: record.id,
        title: record.title,
        members: record.members,
        thumbnail: record.thumbnail,
        published_at: format_published_at(&record.published_at)?,
        duration,
        duration_as_string: format_duration(duration),
        description: sanitize_description(&record.description),
        url: record.file.url,
    };
    Ok(EpisodePage {
        episode,
        revalidate_after: Duration::from_secs(REVALIDATE_SECONDS),
    })
}

/// Render the raw timestamp as the fixed Brazilian-Portuguese display date,
/// e.g. "15 mar 21". The wall-clock date is kept as written; the offset is
/// not normalized away first.
fn format_published_at(raw: &str) -> Result<String, BuildError> {
    let date = parse_published_at(raw).map_err(|source| BuildError::MalformedDate {
        value: String::from(raw),
        source,
    })?;
    Ok(date.format_localized("%-d %b %y", Locale::pt_BR).to_string())
}

fn parse_published_at(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Ok(parsed.date_naive()),
        Err(rfc3339_error) => NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|parsed| parsed.date())
            .ok_or(rfc3339_error),
    }
}

fn parse_duration_seconds(raw: &str) -> Result<u64, BuildError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|source| BuildError::MalformedDuration {
            value: String::from(raw),
            source,
        })
}
