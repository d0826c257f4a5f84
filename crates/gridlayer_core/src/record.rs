//! # Source Records
//!
//! A source record is an immutable tagged feature supplied by ingestion.
//! Classifiers read its tags and ask which geometric forms it supports.

use std::collections::BTreeMap;

/// Read-only view of one ingested feature.
pub trait SourceRecord {
    /// Returns the value of tag `key`, if present.
    fn tag(&self, key: &str) -> Option<&str>;

    /// Whether the record can be rendered as a polygon.
    fn can_be_polygon(&self) -> bool;

    /// Whether the record can be rendered as a line.
    fn can_be_line(&self) -> bool;

    /// Whether the record is a point.
    fn is_point(&self) -> bool;

    /// Returns whether tag `key` is present.
    fn has_tag(&self, key: &str) -> bool {
        self.tag(key).is_some()
    }

    /// Picks the rendering branch, checking polygon, then line, then point.
    fn geometry_class(&self) -> GeometryClass {
        if self.can_be_polygon() {
            GeometryClass::Area
        } else if self.can_be_line() {
            GeometryClass::Line
        } else if self.is_point() {
            GeometryClass::Point
        } else {
            GeometryClass::None
        }
    }
}

/// Rendering branch chosen for a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryClass {
    /// Closed shape, rendered as a polygon.
    Area,
    /// Open linear shape.
    Line,
    /// Single location.
    Point,
    /// Nothing renderable.
    None,
}

/// In-memory record with an explicit geometry class.
///
/// Used where the geometry itself does not matter: tests, fixtures and
/// callers that classify tag sets without coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedRecord {
    tags: BTreeMap<String, String>,
    class: GeometryClass,
}

impl TaggedRecord {
    /// Creates an untagged record of the given class.
    #[must_use]
    pub fn new(class: GeometryClass) -> Self {
        Self {
            tags: BTreeMap::new(),
            class,
        }
    }

    /// Adds or replaces a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// All tags of the record.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }
}

impl SourceRecord for TaggedRecord {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    fn can_be_polygon(&self) -> bool {
        self.class == GeometryClass::Area
    }

    fn can_be_line(&self) -> bool {
        self.class == GeometryClass::Line
    }

    fn is_point(&self) -> bool {
        self.class == GeometryClass::Point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capabilities {
        polygon: bool,
        line: bool,
        point: bool,
    }

    impl SourceRecord for Capabilities {
        fn tag(&self, _key: &str) -> Option<&str> {
            None
        }
        fn can_be_polygon(&self) -> bool {
            self.polygon
        }
        fn can_be_line(&self) -> bool {
            self.line
        }
        fn is_point(&self) -> bool {
            self.point
        }
    }

    #[test]
    fn test_polygon_wins_over_line() {
        // Closed ways can be both.
        let record = Capabilities {
            polygon: true,
            line: true,
            point: false,
        };
        assert_eq!(record.geometry_class(), GeometryClass::Area);
    }

    #[test]
    fn test_line_wins_over_point() {
        let record = Capabilities {
            polygon: false,
            line: true,
            point: true,
        };
        assert_eq!(record.geometry_class(), GeometryClass::Line);
    }

    #[test]
    fn test_no_capability() {
        let record = Capabilities {
            polygon: false,
            line: false,
            point: false,
        };
        assert_eq!(record.geometry_class(), GeometryClass::None);
    }

    #[test]
    fn test_tagged_record() {
        let record = TaggedRecord::new(GeometryClass::Point)
            .with_tag("power", "tower")
            .with_tag("ref", "12");
        assert_eq!(record.tag("power"), Some("tower"));
        assert!(record.has_tag("ref"));
        assert!(!record.has_tag("name"));
        assert_eq!(record.geometry_class(), GeometryClass::Point);
    }
}
