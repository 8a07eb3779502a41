//! Configuration and handling of episode page requests.

use crate::builder::{build_episode_page, BuildError};
use crate::extractors::episode_slug::EpisodeSlug;
use crate::page_api_error::PageApiError;
use crate::policy::{GenerationPolicy, PathManifest};
use actix_web::http::header;
use actix_web::{web, Error, HttpResponse};
use podgen_catalog_client::{CatalogError, EpisodeProvider};
use podgen_store::models::PageArtifact;
use podgen_store::{ArtifactStore, Lookup};
use std::sync::Arc;
use tracing::{debug, error, warn};
use tracing_actix_web::RootSpan;

pub mod builder;
pub mod contracts;
pub mod models;
pub mod player;
pub mod policy;

mod extractors;
mod page_api_error;
mod page_root_span;
mod sanitize;

pub use page_root_span::PageRootSpan;

const CACHE_OUTCOME_HEADER: &str = "x-podgen-cache";

/// Configure the episode page endpoints.
pub fn pages_config<T: EpisodeProvider + Send + Sync + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/episodes")
            .service(web::resource("/{slug}").route(web::get().to(serve_episode::<T>))),
    );
}

/// Build the page for `slug` and cache the result, returning the stored
/// artifact.
pub async fn build_and_store<T: EpisodeProvider>(
    provider: &T,
    store: &ArtifactStore,
    slug: &str,
) -> Result<Arc<PageArtifact>, BuildError> {
    let page = build_episode_page(provider, slug).await?;
    let body = serde_json::to_string(&page.episode)?;
    Ok(store.store(slug, body, page.revalidate_after).await)
}

async fn serve_episode<T: EpisodeProvider + Send + Sync + 'static>(
    root_span: RootSpan,
    episode_slug: EpisodeSlug,
    manifest: web::Data<PathManifest>,
    store: web::Data<ArtifactStore>,
    provider: web::Data<T>,
) -> Result<HttpResponse, Error> {
    let EpisodeSlug { slug } = episode_slug;
    root_span.record("episode_slug", &slug.as_str());

    match store.lookup(&slug).await {
        Lookup::Fresh(artifact) => {
            record_outcome(&root_span, "HIT", &artifact);
            Ok(artifact_response(&artifact, "HIT"))
        }
        Lookup::Stale(artifact) => {
            record_outcome(&root_span, "STALE", &artifact);
            spawn_rebuild(&slug, store.clone(), provider.clone());
            Ok(artifact_response(&artifact, "STALE"))
        }
        Lookup::Missing => {
            root_span.record("cache_outcome", &"MISS");
            match manifest.fallback {
                GenerationPolicy::Prebuilt => {
                    debug!(slug = %slug, "Page is outside the pre-rendered set.");
                    Err(PageApiError::not_found().into())
                }
                GenerationPolicy::OnDemandBlocking => {
                    blocking_build(&slug, &root_span, store.get_ref(), provider.get_ref()).await
                }
                GenerationPolicy::OnDemandClientRendered => {
                    spawn_rebuild(&slug, store.clone(), provider.clone());
                    Ok(not_ready_response())
                }
            }
        }
    }
}

/// The on-demand blocking path: the response waits for the build. Concurrent
/// first requests for one page coalesce into a single catalog fetch.
async fn blocking_build<T: EpisodeProvider>(
    slug: &str,
    root_span: &RootSpan,
    store: &ArtifactStore,
    provider: &T,
) -> Result<HttpResponse, Error> {
    let lock = store.build_lock(slug).await;
    let response = {
        let _guard = lock.lock().await;
        // Another request may have finished the build while this one waited.
        if let Lookup::Fresh(artifact) | Lookup::Stale(artifact) = store.lookup(slug).await {
            record_outcome(root_span, "HIT", &artifact);
            Ok(artifact_response(&artifact, "HIT"))
        } else {
            debug!(slug = %slug, "No artifact exists for this page; building it now.");
            match build_and_store(provider, store, slug).await {
                Ok(artifact) => {
                    record_outcome(root_span, "MISS", &artifact);
                    Ok(artifact_response(&artifact, "MISS"))
                }
                Err(e) => Err(map_build_error(slug, e)),
            }
        }
    };
    drop(lock);
    store.discard_build_lock(slug).await;
    response
}

/// Rebuild `slug` off the request path unless a rebuild is already running.
fn spawn_rebuild<T: EpisodeProvider + Send + Sync + 'static>(
    slug: &str,
    store: web::Data<ArtifactStore>,
    provider: web::Data<T>,
) {
    let ticket = match store.try_begin_rebuild(slug) {
        Some(t) => t,
        None => return,
    };
    let slug = String::from(slug);
    actix_web::rt::spawn(async move {
        // Hold the ticket for the whole rebuild; dropping it frees the slot.
        let _ticket = ticket;
        debug!(slug = %slug, "Rebuilding the episode page in the background.");
        if let Err(e) = build_and_store(provider.get_ref(), store.get_ref(), &slug).await {
            // The previous artifact stays servable and a later request
            // triggers the next attempt.
            warn!(
                slug = %slug,
                error = ?e,
                "Background rebuild of the episode page failed."
            );
        }
    });
}

fn map_build_error(slug: &str, e: BuildError) -> Error {
    match e {
        BuildError::Fetch(CatalogError::NotFound { .. }) => {
            debug!(slug = %slug, "The catalog has no episode for this page.");
            PageApiError::not_found().into()
        }
        e => {
            error!(slug = %slug, error = ?e, "Failed to build the episode page.");
            PageApiError::internal_server_error().into()
        }
    }
}

fn artifact_response(artifact: &PageArtifact, outcome: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((header::CACHE_CONTROL, cache_control_value(artifact)))
        .insert_header((CACHE_OUTCOME_HEADER, outcome))
        .body(artifact.body.clone())
}

fn cache_control_value(artifact: &PageArtifact) -> String {
    format!(
        "s-maxage={}, stale-while-revalidate",
        artifact.revalidate_after.as_secs()
    )
}

fn not_ready_response() -> HttpResponse {
    HttpResponse::Accepted()
        .content_type("application/json")
        .insert_header((header::RETRY_AFTER, "1"))
        .insert_header((CACHE_OUTCOME_HEADER, "MISS"))
        .body("{\"ready\":false}")
}

fn record_outcome(root_span: &RootSpan, outcome: &str, artifact: &PageArtifact) {
    root_span.record("cache_outcome", &outcome);
    root_span.record("build_id", &artifact.build_id.to_string().as_str());
}
