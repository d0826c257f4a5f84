//! # GeoJSON Export
//!
//! Writes the features of one zoom back out as GeoJSON, with the layer
//! name and shape kind alongside the bound attributes.

use geojson::{Feature, FeatureCollection, GeoJson};
use gridlayer_core::TileFeature;
use serde_json::{Map, Value};

use crate::record::SharedGeometry;

/// Property holding the tile layer name.
pub const LAYER_PROPERTY: &str = "@layer";

/// Property holding the shape kind.
pub const KIND_PROPERTY: &str = "@kind";

/// Converts one tile feature to a GeoJSON feature.
#[must_use]
pub fn to_geojson_feature(feature: &TileFeature<SharedGeometry>) -> Feature {
    let mut properties: Map<String, Value> = feature
        .attributes
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    properties.insert(LAYER_PROPERTY.to_owned(), Value::String(feature.layer.clone()));
    properties.insert(KIND_PROPERTY.to_owned(), Value::String(feature.kind.to_string()));

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&*feature.geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Converts the features of one zoom to a FeatureCollection.
#[must_use]
pub fn to_geojson(features: &[TileFeature<SharedGeometry>]) -> GeoJson {
    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features: features.iter().map(to_geojson_feature).collect(),
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use geo::point;
    use gridlayer_core::ShapeKind;

    #[test]
    fn test_feature_properties() {
        let feature = TileFeature {
            layer: "power".to_owned(),
            kind: ShapeKind::Point,
            geometry: Arc::new(point!(x: 8.5, y: 47.4).into()),
            attributes: BTreeMap::from([("power".to_owned(), "tower".to_owned())]),
            min_pixel_size: 1.0,
            buffer_pixels: 32.0,
        };

        let GeoJson::FeatureCollection(collection) = to_geojson(&[feature]) else {
            panic!("expected a feature collection");
        };
        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["power"], "tower");
        assert_eq!(properties[LAYER_PROPERTY], "power");
        assert_eq!(properties[KIND_PROPERTY], "point");
        assert!(collection.features[0].geometry.is_some());
    }
}
