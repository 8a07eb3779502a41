//! Cleans catalog-supplied description HTML before it reaches a render surface.

use ammonia::Builder;
use std::collections::HashMap;

/// Sanitize an episode description. Anchors are forced to open in a new tab;
/// ammonia's defaults add `rel="noopener noreferrer"` alongside. Markup-free
/// text passes through unchanged.
pub fn sanitize_description(description: &str) -> String {
    let mut attribute_values = HashMap::new();
    attribute_values.insert("target", "_blank");

    let mut tag_attribute_values = HashMap::new();
    tag_attribute_values.insert("a", attribute_values);

    let mut builder = Builder::default();
    builder.add_tag_attributes("a", &["href", "target"]);
    builder.set_tag_attribute_values(tag_attribute_values);

    builder.clean(description).to_string()
}
