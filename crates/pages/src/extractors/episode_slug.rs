use crate::page_api_error::PageApiError;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest};
use futures_util::future::{err, ok, Ready};
use tracing::error;

const MAX_SLUG_LENGTH: usize = 200;

/// The episode identifier from the request path, validated before any
/// catalog traffic happens.
pub struct EpisodeSlug {
    pub slug: String,
}

fn is_valid_slug(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= MAX_SLUG_LENGTH
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

impl FromRequest for EpisodeSlug {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let slug = match req.match_info().get("slug") {
            Some(s) => s,
            None => {
                error!("The episode slug extractor was called on a route without a slug segment.");
                return err(PageApiError::internal_server_error().into());
            }
        };
        // A malformed identifier is indistinguishable from a page that
        // doesn't exist.
        if !is_valid_slug(slug) {
            return err(PageApiError::not_found().into());
        }

        ok(EpisodeSlug {
            slug: String::from(slug),
        })
    }
}
