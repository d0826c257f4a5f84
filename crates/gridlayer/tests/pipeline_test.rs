//! Tile pipeline tests.
//!
//! GeoJSON in, per-zoom features out, with a recording merge engine
//! standing in for the tiling infrastructure.

use std::cell::RefCell;
use std::sync::Arc;

use gridlayer::{Feature, PipelineError, TilePipeline, Tiles};
use gridlayer_core::{
    GeometryError, GeometryResult, LineMergeParams, MergeEngine, PolygonMergeParams, ShapeKind,
    Zoom,
};
use gridlayer_geo::{parse_geojson, GeoRecord, SharedGeometry};
use gridlayer_power::{LayerConfig, PowerLayer};

// Substation: square of 360/6000 degrees on the equator, so about 1/6000
// of the world wide and 32 px wide from zoom 10.
// Line: 400 kV, 10 degrees long.
// Tower: a point.
// Plus one record the layer does not claim and one with no usable geometry.
const INPUT: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "power": "substation", "name": "Nordwerk", "operator": "Grid Co" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0, 0], [0.06, 0], [0.06, 0.06], [0, 0.06], [0, 0]]]
            }
        },
        {
            "type": "Feature",
            "properties": { "power": "line", "voltage": "400000", "operator": "Grid Co" },
            "geometry": { "type": "LineString", "coordinates": [[0, 1], [10, 1]] }
        },
        {
            "type": "Feature",
            "properties": { "power": "tower", "ref": "T-17" },
            "geometry": { "type": "Point", "coordinates": [5, 1] }
        },
        {
            "type": "Feature",
            "properties": { "highway": "primary" },
            "geometry": { "type": "LineString", "coordinates": [[0, 2], [10, 2]] }
        },
        {
            "type": "Feature",
            "properties": { "power": "plant" },
            "geometry": { "type": "GeometryCollection", "geometries": [] }
        }
    ]
}"#;

fn records() -> Vec<GeoRecord> {
    parse_geojson(INPUT).unwrap()
}

fn pipeline(workers: usize) -> TilePipeline {
    TilePipeline::new(PowerLayer::new(Arc::new(LayerConfig::default()))).with_workers(workers)
}

fn kinds(tiles: &Tiles, zoom: Zoom) -> Vec<ShapeKind> {
    tiles
        .get(&zoom)
        .map(|features| features.iter().map(|feature| feature.kind).collect())
        .unwrap_or_default()
}

fn find(tiles: &Tiles, zoom: Zoom, kind: ShapeKind, power: &str) -> Option<Feature> {
    tiles
        .get(&zoom)?
        .iter()
        .find(|feature| {
            feature.kind == kind
                && feature.attributes.get("power").map(String::as_str) == Some(power)
        })
        .cloned()
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_zoom_buckets() {
    let tiles = pipeline(4).classify(records());

    assert!(tiles.keys().all(|&zoom| zoom >= 4));
    assert_eq!(kinds(&tiles, 4), vec![ShapeKind::Line]);
    assert_eq!(kinds(&tiles, 8), vec![ShapeKind::Polygon, ShapeKind::Line]);
    assert_eq!(
        kinds(&tiles, 10),
        vec![ShapeKind::Polygon, ShapeKind::Point, ShapeKind::Line]
    );
    assert_eq!(
        kinds(&tiles, 12),
        vec![ShapeKind::Polygon, ShapeKind::Point, ShapeKind::Line, ShapeKind::Point]
    );
}

#[test]
fn test_area_details_follow_pixel_size() {
    let tiles = pipeline(2).classify(records());

    let coarse = find(&tiles, 9, ShapeKind::Polygon, "substation").unwrap();
    assert!(!coarse.attributes.contains_key("name"));

    let fine = find(&tiles, 10, ShapeKind::Polygon, "substation").unwrap();
    assert_eq!(fine.attributes.get("name").map(String::as_str), Some("Nordwerk"));
    assert_eq!(fine.attributes.get("operator").map(String::as_str), Some("Grid Co"));

    assert!(find(&tiles, 9, ShapeKind::Point, "substation").is_none());
    let label = find(&tiles, 10, ShapeKind::Point, "substation").unwrap();
    assert_eq!(label.attributes.get("name").map(String::as_str), Some("Nordwerk"));
}

#[test]
fn test_line_details_three_zooms_later() {
    let tiles = pipeline(2).classify(records());

    let early = find(&tiles, 6, ShapeKind::Line, "line").unwrap();
    assert_eq!(early.attributes.get("voltage").map(String::as_str), Some("400000"));
    assert!(!early.attributes.contains_key("operator"));

    let detailed = find(&tiles, 7, ShapeKind::Line, "line").unwrap();
    assert_eq!(detailed.attributes.get("operator").map(String::as_str), Some("Grid Co"));
}

#[test]
fn test_points_carry_details_immediately() {
    let tiles = pipeline(2).classify(records());

    assert!(find(&tiles, 11, ShapeKind::Point, "tower").is_none());
    let tower = find(&tiles, 12, ShapeKind::Point, "tower").unwrap();
    assert_eq!(tower.attributes.get("ref").map(String::as_str), Some("T-17"));
    assert!((tower.buffer_pixels - 32.0).abs() < f64::EPSILON);
}

#[test]
fn test_unclaimed_records_are_skipped() {
    let tiles = pipeline(2).classify(records());
    assert!(tiles
        .values()
        .flatten()
        .all(|feature| feature.attributes.contains_key("power")));
}

#[test]
fn test_output_independent_of_workers() {
    let single = pipeline(1).classify(records());
    let many = pipeline(8).classify(records());
    assert_eq!(single, many);
}

#[test]
fn test_empty_input() {
    assert!(pipeline(3).classify(Vec::new()).is_empty());
}

// =============================================================================
// Post-processing
// =============================================================================

/// Records the merge calls; optionally fails the nth polygon merge.
#[derive(Default)]
struct RecordingMerge {
    calls: RefCell<Vec<&'static str>>,
    fail_polygon_call: Option<usize>,
}

impl MergeEngine<SharedGeometry> for RecordingMerge {
    fn merge_multi_point(&self, items: Vec<Feature>) -> GeometryResult<Vec<Feature>> {
        self.calls.borrow_mut().push("points");
        Ok(items)
    }

    fn merge_nearby_polygons(
        &self,
        items: Vec<Feature>,
        _params: &PolygonMergeParams,
    ) -> GeometryResult<Vec<Feature>> {
        let mut calls = self.calls.borrow_mut();
        calls.push("polygons");
        let nth = calls.iter().filter(|&&what| what == "polygons").count();
        if self.fail_polygon_call == Some(nth) {
            return Err(GeometryError::Merge {
                zoom: 0,
                reason: "self-intersecting ring".to_owned(),
            });
        }
        Ok(items)
    }

    fn merge_line_strings(
        &self,
        items: Vec<Feature>,
        _params: &LineMergeParams,
    ) -> GeometryResult<Vec<Feature>> {
        self.calls.borrow_mut().push("lines");
        Ok(items)
    }
}

#[test]
fn test_post_process_every_zoom_in_order() {
    let pipeline = pipeline(2);
    let merge = RecordingMerge::default();
    let tiles = pipeline.run(records(), &merge).unwrap();

    // Zooms 4..=15 each get points, then polygons, then lines.
    let calls = merge.calls.borrow();
    assert_eq!(calls.len(), 12 * 3);
    for step in calls.chunks(3) {
        assert_eq!(step, ["points", "polygons", "lines"]);
    }
    assert_eq!(tiles, pipeline.classify(records()));
}

#[test]
fn test_post_process_failure_names_zoom() {
    let pipeline = pipeline(2);
    let tiles = pipeline.classify(records());
    let first_zoom = *tiles.keys().next().unwrap();

    // Fail on the second zoom processed.
    let merge = RecordingMerge {
        fail_polygon_call: Some(2),
        ..RecordingMerge::default()
    };
    match pipeline.post_process(tiles, &merge) {
        Err(PipelineError::PostProcess { zoom, source }) => {
            assert_eq!(zoom, first_zoom + 1);
            assert!(matches!(source, GeometryError::Merge { .. }));
        }
        other => panic!("expected a post-processing error, got {other:?}"),
    }
}
