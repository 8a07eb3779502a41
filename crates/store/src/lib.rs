//! Provides the in-memory cache of generated episode pages to the rest of podgen.

pub mod models;

use models::PageArtifact;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Outcome of looking a page up in the store.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// An artifact exists and is inside its revalidation window.
    Fresh(Arc<PageArtifact>),
    /// An artifact exists but outlived its window; it stays servable while a
    /// background rebuild replaces it.
    Stale(Arc<PageArtifact>),
    /// No artifact has ever been built for this page.
    Missing,
}

/// Cache of generated episode pages, keyed by episode slug.
///
/// The store owns all freshness bookkeeping. The page builder stays
/// stateless; artifacts are only ever replaced wholesale by a new build.
#[derive(Default)]
pub struct ArtifactStore {
    artifacts: RwLock<HashMap<String, Arc<PageArtifact>>>,
    build_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    rebuilds_in_flight: Arc<std::sync::Mutex<HashSet<String>>>,
}

impl ArtifactStore {
    pub fn new() -> ArtifactStore {
        ArtifactStore::default()
    }

    /// Look up the artifact for `slug` and classify its freshness.
    pub async fn lookup(&self, slug: &str) -> Lookup {
        let artifacts = self.artifacts.read().await;
        match artifacts.get(slug) {
            Some(artifact) if artifact.is_stale() => Lookup::Stale(Arc::clone(artifact)),
            Some(artifact) => Lookup::Fresh(Arc::clone(artifact)),
            None => Lookup::Missing,
        }
    }

    /// Cache a freshly built page body for `slug`, replacing any previous
    /// artifact wholesale, and return the stored artifact.
    pub async fn store(
        &self,
        slug: &str,
        body: String,
        revalidate_after: Duration,
    ) -> Arc<PageArtifact> {
        let artifact = Arc::new(PageArtifact::new(body, revalidate_after));
        let mut artifacts = self.artifacts.write().await;
        artifacts.insert(String::from(slug), Arc::clone(&artifact));
        debug!(
            slug = %slug,
            build_id = %artifact.build_id,
            "Stored a built episode page artifact."
        );
        artifact
    }

    /// Retrieve the build lock for `slug`, creating it on first use.
    ///
    /// # Remarks
    ///
    /// The lock serializes first-time builds of one page so that concurrent
    /// requests coalesce into a single catalog fetch; callers must check the
    /// store again after acquiring it, and discard the lock with
    /// [ArtifactStore::discard_build_lock] once their build completes.
    pub async fn build_lock(&self, slug: &str) -> Arc<Mutex<()>> {
        let mut locks = self.build_locks.lock().await;
        let lock = locks
            .entry(String::from(slug))
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(lock)
    }

    /// Drop the build lock entry for `slug` unless another caller still holds
    /// it. Requests arrive with arbitrary slugs, so entries cannot outlive the
    /// builds they serialized; callers drop their own clone first, and the
    /// last finisher removes the entry.
    pub async fn discard_build_lock(&self, slug: &str) {
        let mut locks = self.build_locks.lock().await;
        if let Some(lock) = locks.get(slug) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(slug);
            }
        }
    }

    /// Claim the right to rebuild `slug` in the background.
    ///
    /// Returns [None] while another rebuild of the same page is in flight.
    /// The ticket releases the claim when dropped, so a failed rebuild leaves
    /// the next stale request free to try again.
    pub fn try_begin_rebuild(&self, slug: &str) -> Option<RebuildTicket> {
        let mut in_flight = match self.rebuilds_in_flight.lock() {
            Ok(guard) => guard,
            Err(_) => return None,
        };
        if !in_flight.insert(String::from(slug)) {
            debug!(slug = %slug, "A rebuild of this page is already in flight.");
            return None;
        }
        Some(RebuildTicket {
            slug: String::from(slug),
            rebuilds: Arc::clone(&self.rebuilds_in_flight),
        })
    }
}

/// Claim on the single background rebuild slot of one page. Dropping the
/// ticket releases the slot whether or not the rebuild succeeded.
pub struct RebuildTicket {
    slug: String,
    rebuilds: Arc<std::sync::Mutex<HashSet<String>>>,
}

impl Drop for RebuildTicket {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.rebuilds.lock() {
            in_flight.remove(&self.slug);
        }
    }
}
