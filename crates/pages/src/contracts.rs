//! Seams between the page pipeline and the presentation layer embedding it.

use crate::models::EpisodeViewModel;

/// Capability handed to a render surface for starting playback.
///
/// Surfaces receive this as an injected collaborator; there is no global
/// player they could reach for instead.
pub trait Playback {
    /// Replace whatever is playing with the given episode.
    fn play(&self, episode: EpisodeViewModel);
}

/// A presentation layer able to render one episode page.
///
/// podgen ships no concrete surface; layout and styling belong to the
/// embedding application.
pub trait RenderSurface {
    fn render(&self, episode: &EpisodeViewModel, playback: &dyn Playback);
}
