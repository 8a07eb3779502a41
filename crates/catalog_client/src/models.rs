//! Models to be used when deserializing episode records returned by the
//! catalog API's `/episodes/{slug}` resource.

use serde::{Deserialize, Serialize};

/// One raw episode record exactly as the catalog returns it. The date and
/// duration fields stay unparsed strings here; validating them is the page
/// builder's job.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct CatalogEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    pub thumbnail: String,
    pub description: String,
    pub file: CatalogEpisodeFile,
}

/// The audio file attached to an episode record.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct CatalogEpisodeFile {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub duration: String,
}
