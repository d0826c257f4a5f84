//! # Merge Engine Interface
//!
//! Generalization runs once per layer, tile and zoom, after every record
//! contributing to that tile has been classified. The algorithms live in
//! the tiling infrastructure; a layer only picks their parameters.

use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::feature::TileFeature;

/// Parameters for coalescing nearby polygons.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonMergeParams {
    /// Buffer applied around polygons before joining, in pixels.
    pub buffer: f64,
    /// Simplification tolerance of the merged outline, in pixels.
    pub tolerance: f64,
    /// Fraction of its area a merged polygon must keep to be retained.
    pub min_area_ratio: f64,
    /// Fraction of its area a hole must keep to be retained.
    pub min_hole_area_ratio: f64,
}

/// Parameters for joining line strings end to end.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineMergeParams {
    /// Simplification tolerance, in pixels.
    pub tolerance: f64,
    /// Minimum length of a merged line relative to the tolerance.
    pub min_length_ratio: f64,
    /// Maximum number of lines joined into one.
    pub max_fan_in: u32,
}

/// Post-render generalization algorithms.
///
/// Every operation takes the full feature list of one tile at one zoom and
/// returns the reduced list.
pub trait MergeEngine<G> {
    /// Combines points sharing a layer and attributes into multi-points.
    ///
    /// # Errors
    ///
    /// Returns an error if a geometry cannot be processed.
    fn merge_multi_point(&self, items: Vec<TileFeature<G>>) -> GeometryResult<Vec<TileFeature<G>>>;

    /// Coalesces nearby polygons sharing attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if a geometry cannot be processed.
    fn merge_nearby_polygons(
        &self,
        items: Vec<TileFeature<G>>,
        params: &PolygonMergeParams,
    ) -> GeometryResult<Vec<TileFeature<G>>>;

    /// Joins touching line strings sharing attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if a geometry cannot be processed.
    fn merge_line_strings(
        &self,
        items: Vec<TileFeature<G>>,
        params: &LineMergeParams,
    ) -> GeometryResult<Vec<TileFeature<G>>>;
}
