//! # Power Tag Sets
//!
//! Attribute groups copied onto emitted shapes.

use gridlayer_core::TagSet;

/// Tag identifying records this layer claims.
pub const POWER_KEY: &str = "power";

/// Tags copied onto every shape at the shape's own zoom range.
pub const PRIMARY_TAGS: TagSet = TagSet::new(&["power", "voltage"]);

/// Detail tags shared by every layer.
///
/// The minimal common pair: the display name and the Wikidata link.
pub const COMMON_DETAIL_TAGS: TagSet = TagSet::new(&["name", "wikidata"]);

/// Tags copied only once the zoom reaches the feature's detail threshold.
///
/// Superset of [`COMMON_DETAIL_TAGS`].
pub const DETAIL_TAGS: TagSet = TagSet::new(&[
    "name",
    "wikidata",
    "operator",
    "frequency",
    "cables",
    "circuits",
    "material",
    "design",
    "structure",
    "location",
    "ref",
    "plant:source",
    "plant:method",
    "plant:output:electricity",
    "generator:source",
    "generator:method",
    "generator:type",
    "generator:output:electricity",
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_includes_common() {
        assert!(COMMON_DETAIL_TAGS.iter().all(|key| DETAIL_TAGS.contains(key)));
    }

    #[test]
    fn test_groups_are_disjoint() {
        assert!(PRIMARY_TAGS.iter().all(|key| !DETAIL_TAGS.contains(key)));
    }
}
