//! # Geometry Collector
//!
//! Builds shapes from a [`GeoRecord`]'s geometry. Shape sizes are measured
//! in Web Mercator world units so the classifier can ask at which zoom a
//! shape reaches a given pixel width.
//!
//! ## Sizes
//! - Polygons: square root of the projected area
//! - Lines: projected length
//! - Points: zero

use std::sync::Arc;

use geo::{Area, Geometry, InteriorPoint, LineString};
use gridlayer_core::{FeatureCollector, GeometryError, GeometryResult, RenderInstruction, ShapeKind};

use crate::mercator::project;
use crate::record::{GeoRecord, SharedGeometry};

/// Shape handle produced by [`GeoCollector`].
pub type GeoShape = RenderInstruction<SharedGeometry>;

/// Collects the shapes emitted for one record.
#[derive(Debug)]
pub struct GeoCollector {
    geometry: SharedGeometry,
    emitted: Vec<GeoShape>,
}

impl GeoCollector {
    /// Creates a collector for `record`.
    #[must_use]
    pub fn new(record: &GeoRecord) -> Self {
        Self {
            geometry: Arc::clone(record.geometry()),
            emitted: Vec::new(),
        }
    }

    /// Shapes emitted so far, in emission order.
    #[must_use]
    pub fn into_instructions(self) -> Vec<GeoShape> {
        self.emitted
    }

    fn unsupported(&self, kind: ShapeKind) -> GeometryError {
        GeometryError::Unsupported {
            kind,
            reason: format!("source geometry is a {}", geometry_name(&self.geometry)),
        }
    }
}

impl FeatureCollector for GeoCollector {
    type Shape = GeoShape;

    fn polygon(&mut self, layer: &str) -> GeometryResult<GeoShape> {
        match *self.geometry {
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => {
                let size = project(&self.geometry).unsigned_area().sqrt();
                Ok(RenderInstruction::new(
                    layer,
                    ShapeKind::Polygon,
                    Arc::clone(&self.geometry),
                    size,
                ))
            }
            _ => Err(self.unsupported(ShapeKind::Polygon)),
        }
    }

    fn line(&mut self, layer: &str) -> GeometryResult<GeoShape> {
        let size = match project(&self.geometry) {
            Geometry::LineString(line) => length(&line),
            Geometry::MultiLineString(lines) => lines.iter().map(length).sum(),
            Geometry::Line(segment) => segment.dx().hypot(segment.dy()),
            _ => return Err(self.unsupported(ShapeKind::Line)),
        };
        Ok(RenderInstruction::new(layer, ShapeKind::Line, Arc::clone(&self.geometry), size))
    }

    fn point(&mut self, layer: &str) -> GeometryResult<GeoShape> {
        match *self.geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Ok(RenderInstruction::new(
                layer,
                ShapeKind::Point,
                Arc::clone(&self.geometry),
                0.0,
            )),
            _ => Err(self.unsupported(ShapeKind::Point)),
        }
    }

    fn point_on_surface(&mut self, layer: &str) -> GeometryResult<GeoShape> {
        let point = self.geometry.interior_point().ok_or_else(|| {
            GeometryError::Degenerate(format!(
                "{} has no interior point",
                geometry_name(&self.geometry)
            ))
        })?;
        Ok(RenderInstruction::new(
            layer,
            ShapeKind::Point,
            Arc::new(Geometry::Point(point)),
            0.0,
        ))
    }

    fn emit(&mut self, shape: GeoShape) {
        self.emitted.push(shape);
    }
}

fn length(line: &LineString<f64>) -> f64 {
    line.lines().map(|segment| segment.dx().hypot(segment.dy())).sum()
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "point",
        Geometry::Line(_) => "line",
        Geometry::LineString(_) => "line string",
        Geometry::Polygon(_) => "polygon",
        Geometry::MultiPoint(_) => "multi-point",
        Geometry::MultiLineString(_) => "multi-line string",
        Geometry::MultiPolygon(_) => "multi-polygon",
        Geometry::GeometryCollection(_) => "geometry collection",
        Geometry::Rect(_) => "rectangle",
        Geometry::Triangle(_) => "triangle",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use geo::{line_string, point, polygon, MultiPolygon};
    use gridlayer_core::Shape;

    fn record(geometry: Geometry<f64>) -> GeoRecord {
        GeoRecord::new(None, BTreeMap::new(), geometry)
    }

    /// Square of `degrees` per side centred on the equator.
    fn square(degrees: f64) -> Geometry<f64> {
        let half = degrees / 2.0;
        polygon![
            (x: -half, y: -half),
            (x: half, y: -half),
            (x: half, y: half),
            (x: -half, y: half)
        ]
        .into()
    }

    #[test]
    fn test_polygon_pixel_zoom() {
        // 360/8192 degrees is one 32-pixel span at zoom 10 on the equator.
        let mut collector = GeoCollector::new(&record(square(360.0 / 8192.0)));
        let polygon = collector.polygon("power").unwrap();
        assert_eq!(polygon.kind(), ShapeKind::Polygon);
        assert_eq!(polygon.min_zoom_for_pixel_size(32.0), 10);
        assert_eq!(polygon.min_zoom_for_pixel_size(64.0), 11);
    }

    #[test]
    fn test_line_length() {
        let line: Geometry<f64> =
            line_string![(x: 0.0, y: 0.0), (x: 360.0 / 1024.0, y: 0.0)].into();
        let mut collector = GeoCollector::new(&record(line));
        let shape = collector.line("power").unwrap();
        // 1/1024 of the world: 256 px at zoom 10, 512 px at zoom 11.
        assert_eq!(shape.min_zoom_for_pixel_size(200.0), 10);
        assert_eq!(shape.min_zoom_for_pixel_size(300.0), 11);
    }

    #[test]
    fn test_point_on_surface_is_inside() {
        let mut collector = GeoCollector::new(&record(square(1.0)));
        let label = collector.point_on_surface("power").unwrap();
        assert_eq!(label.kind(), ShapeKind::Point);
        let Geometry::Point(point) = &**label.geometry() else {
            panic!("label is not a point");
        };
        assert!(point.x().abs() < 0.5 && point.y().abs() < 0.5);
    }

    #[test]
    fn test_empty_polygon_has_no_label() {
        let empty = Geometry::MultiPolygon(MultiPolygon(Vec::new()));
        let mut collector = GeoCollector::new(&record(empty));
        assert!(matches!(
            collector.point_on_surface("power"),
            Err(GeometryError::Degenerate(_))
        ));
    }

    #[test]
    fn test_mismatched_shape_is_rejected() {
        let mut collector = GeoCollector::new(&record(point!(x: 1.0, y: 1.0).into()));
        assert!(matches!(
            collector.polygon("power"),
            Err(GeometryError::Unsupported { kind: ShapeKind::Polygon, .. })
        ));
        assert!(collector.line("power").is_err());
        assert!(collector.point("power").is_ok());
    }

    #[test]
    fn test_emitted_in_order() {
        let mut collector = GeoCollector::new(&record(square(1.0)));
        let polygon = collector.polygon("power").unwrap();
        let label = collector.point_on_surface("power").unwrap();
        collector.emit(polygon);
        collector.emit(label);
        let kinds: Vec<_> = collector
            .into_instructions()
            .iter()
            .map(RenderInstruction::kind)
            .collect();
        assert_eq!(kinds, vec![ShapeKind::Polygon, ShapeKind::Point]);
    }
}
