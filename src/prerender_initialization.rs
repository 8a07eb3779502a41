use anyhow::{Context, Result};
use podgen_catalog_client::EpisodeProvider;
use podgen_pages::build_and_store;
use podgen_pages::policy::PathManifest;
use podgen_store::ArtifactStore;
use tracing::{debug, info};

/// Build every page listed in the manifest's pre-render set before the
/// server starts taking requests. The episode manifest lists none, so this
/// normally returns immediately; a failed pre-render build aborts startup.
pub async fn prerender_manifest_pages<T: EpisodeProvider>(
    provider: &T,
    store: &ArtifactStore,
    manifest: &PathManifest,
) -> Result<()> {
    if manifest.prerender.is_empty() {
        debug!("The manifest lists no pages to pre-render.");
        return Ok(());
    }

    for slug in &manifest.prerender {
        let artifact = build_and_store(provider, store, slug)
            .await
            .with_context(|| format!("Failed to pre-render the page for \"{}\".", slug))?;
        info!(slug = %slug, build_id = %artifact.build_id, "Pre-rendered an episode page.");
    }

    Ok(())
}
