//! Defines the models that represent cached page artifacts belonging to podgen.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// One generated episode page, cached in its servable form.
///
/// The builder hands the store a serialized page body; everything else here
/// is platform bookkeeping that the store owns exclusively.
#[derive(Debug, Clone)]
pub struct PageArtifact {
    pub build_id: Uuid,

    /// The serialized episode view model, ready to serve as a response body.
    pub body: String,

    /// How long the artifact counts as fresh after it was built.
    pub revalidate_after: Duration,

    built_at: Instant,
}

impl PageArtifact {
    pub fn new(body: String, revalidate_after: Duration) -> PageArtifact {
        PageArtifact {
            build_id: Uuid::new_v4(),
            body,
            revalidate_after,
            built_at: Instant::now(),
        }
    }

    /// Time elapsed since this artifact was built.
    pub fn age(&self) -> Duration {
        self.built_at.elapsed()
    }

    /// Whether the artifact has outlived its revalidation window. Stale
    /// artifacts remain servable until a rebuild replaces them.
    pub fn is_stale(&self) -> bool {
        self.age() >= self.revalidate_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_is_fresh_within_window() {
        // Arrange
        let artifact = PageArtifact::new(String::from("{}"), Duration::from_secs(3600));

        // Act
        let stale = artifact.is_stale();

        // Assert
        assert!(!stale)
    }

    #[test]
    fn artifact_is_stale_once_window_expires() {
        // Arrange
        let artifact = PageArtifact::new(String::from("{}"), Duration::ZERO);

        // Act
        let stale = artifact.is_stale();

        // Assert
        assert!(stale)
    }

    #[test]
    fn rebuilt_artifacts_get_distinct_build_ids() {
        // Arrange
        let first = PageArtifact::new(String::from("{}"), Duration::from_secs(3600));

        // Act
        let second = PageArtifact::new(String::from("{}"), Duration::from_secs(3600));

        // Assert
        assert_ne!(first.build_id, second.build_id)
    }
}
