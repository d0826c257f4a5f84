//! # GeoJSON Source Records
//!
//! A [`GeoRecord`] is one imported feature: its tags and its WGS84
//! geometry. Capabilities follow the GeoJSON geometry type.

use std::collections::BTreeMap;
use std::sync::Arc;

use geo::Geometry;
use gridlayer_core::SourceRecord;

/// Geometry shared between a record and the shapes built from it.
pub type SharedGeometry = Arc<Geometry<f64>>;

/// An imported, tagged feature.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoRecord {
    id: Option<String>,
    tags: BTreeMap<String, String>,
    geometry: SharedGeometry,
}

impl GeoRecord {
    /// Creates a record from tags and a lon/lat geometry.
    #[must_use]
    pub fn new(
        id: Option<String>,
        tags: BTreeMap<String, String>,
        geometry: Geometry<f64>,
    ) -> Self {
        Self {
            id,
            tags,
            geometry: Arc::new(geometry),
        }
    }

    /// Feature id from the source file, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All tags.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Source geometry in WGS84 lon/lat.
    #[must_use]
    pub fn geometry(&self) -> &SharedGeometry {
        &self.geometry
    }
}

impl SourceRecord for GeoRecord {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    fn can_be_polygon(&self) -> bool {
        matches!(
            *self.geometry,
            Geometry::Polygon(_)
                | Geometry::MultiPolygon(_)
                | Geometry::Rect(_)
                | Geometry::Triangle(_)
        )
    }

    fn can_be_line(&self) -> bool {
        matches!(
            *self.geometry,
            Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::Line(_)
        )
    }

    fn is_point(&self) -> bool {
        matches!(*self.geometry, Geometry::Point(_) | Geometry::MultiPoint(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, polygon, GeometryCollection};
    use gridlayer_core::GeometryClass;

    fn record(geometry: Geometry<f64>) -> GeoRecord {
        GeoRecord::new(None, BTreeMap::new(), geometry)
    }

    #[test]
    fn test_capabilities_follow_geometry_type() {
        let area = record(polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)].into());
        let line = record(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into());
        let node = record(point!(x: 1.0, y: 2.0).into());
        let empty = record(Geometry::GeometryCollection(GeometryCollection(Vec::new())));

        assert_eq!(area.geometry_class(), GeometryClass::Area);
        assert_eq!(line.geometry_class(), GeometryClass::Line);
        assert_eq!(node.geometry_class(), GeometryClass::Point);
        assert_eq!(empty.geometry_class(), GeometryClass::None);
    }
}
