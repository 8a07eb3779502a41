use serde::{Deserialize, Serialize};

/// The display-ready form of one episode.
///
/// Every field is derived from the raw catalog record in a single pass when
/// the page is built; nothing here mutates afterwards. The struct serializes
/// with the camelCase keys the presentation layer receives as page props.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeViewModel {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,

    /// Publication date already rendered for display, e.g. "15 mar 21".
    pub published_at: String,

    /// Episode length in whole seconds.
    pub duration: u64,

    /// Episode length rendered as `HH:MM:SS`.
    pub duration_as_string: String,

    /// Sanitized HTML; render surfaces may trust it as-is.
    pub description: String,

    /// The playable audio URL.
    pub url: String,
}
