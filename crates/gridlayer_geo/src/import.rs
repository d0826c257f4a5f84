//! # GeoJSON Import
//!
//! Reads GeoJSON into [`GeoRecord`]s. Properties become string tags the way
//! OSM exports carry them: strings verbatim, numbers and booleans
//! stringified, nulls and nested values dropped.

use std::collections::BTreeMap;
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, GeoJson};
use serde_json::{Map, Value};

use crate::error::{ImportError, ImportResult};
use crate::record::GeoRecord;

/// Imports every feature of a GeoJSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not GeoJSON.
pub fn import_geojson(path: &Path) -> ImportResult<Vec<GeoRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_geojson(&content)?;
    tracing::info!(
        "Imported {} records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parses GeoJSON text: a FeatureCollection, a single Feature, or a bare
/// Geometry.
///
/// Features without geometry, or whose geometry cannot be converted, are
/// skipped.
///
/// # Errors
///
/// Returns an error if the text is not GeoJSON.
pub fn parse_geojson(content: &str) -> ImportResult<Vec<GeoRecord>> {
    let features = match content.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    Ok(features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| into_record(index, feature))
        .collect())
}

fn into_record(index: usize, feature: Feature) -> Option<GeoRecord> {
    let Some(geometry) = feature.geometry else {
        tracing::debug!(index, "skipping feature without geometry");
        return None;
    };
    let geometry = match geo::Geometry::<f64>::try_from(geometry) {
        Ok(geometry) => geometry,
        Err(err) => {
            tracing::warn!(index, %err, "skipping feature with unreadable geometry");
            return None;
        }
    };
    let id = feature.id.map(|id| match id {
        Id::String(value) => value,
        Id::Number(value) => value.to_string(),
    });
    let tags = feature.properties.as_ref().map(tags_from_properties).unwrap_or_default();
    Some(GeoRecord::new(id, tags, geometry))
}

/// Converts GeoJSON properties to string tags.
#[must_use]
pub fn tags_from_properties(properties: &Map<String, Value>) -> BTreeMap<String, String> {
    properties
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.clone(), value))
        })
        .collect()
}
