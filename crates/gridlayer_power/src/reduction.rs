//! # Resolution Reduction
//!
//! Merge parameters handed to the generalization engine once a tile's
//! features for one zoom are complete. They encode the density target of
//! the power layer and are read from config rather than derived.

use gridlayer_core::{
    GeometryResult, LineMergeParams, MergeEngine, PolygonMergeParams, TileFeature, Zoom,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default polygon coalescing for power areas.
pub const POLYGON_MERGE: PolygonMergeParams = PolygonMergeParams {
    buffer: 3.0,
    tolerance: 3.0,
    min_area_ratio: 0.5,
    min_hole_area_ratio: 0.5,
};

/// Default line merging for power lines.
pub const LINE_MERGE: LineMergeParams = LineMergeParams {
    tolerance: 5.0,
    min_length_ratio: 0.25,
    max_fan_in: 8,
};

/// Merge tuning for one layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReductionParams {
    /// Nearby-polygon coalescing.
    #[serde(default = "default_polygons")]
    pub polygons: PolygonMergeParams,
    /// Line-string merging.
    #[serde(default = "default_lines")]
    pub lines: LineMergeParams,
}

fn default_polygons() -> PolygonMergeParams {
    POLYGON_MERGE
}

fn default_lines() -> LineMergeParams {
    LINE_MERGE
}

impl Default for ReductionParams {
    fn default() -> Self {
        Self {
            polygons: POLYGON_MERGE,
            lines: LINE_MERGE,
        }
    }
}

impl ReductionParams {
    /// Checks that every tolerance is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for negative or non-finite values and
    /// for a zero fan-in.
    pub fn validate(&self) -> ConfigResult<()> {
        let values = [
            ("reduction.polygons.buffer", self.polygons.buffer),
            ("reduction.polygons.tolerance", self.polygons.tolerance),
            ("reduction.polygons.min_area_ratio", self.polygons.min_area_ratio),
            ("reduction.polygons.min_hole_area_ratio", self.polygons.min_hole_area_ratio),
            ("reduction.lines.tolerance", self.lines.tolerance),
            ("reduction.lines.min_length_ratio", self.lines.min_length_ratio),
        ];
        if let Some((name, value)) = values
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a finite, non-negative number, got {value}"
            )));
        }
        if self.lines.max_fan_in == 0 {
            return Err(ConfigError::Invalid(
                "reduction.lines.max_fan_in must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Runs the merge passes over one zoom's features: points, then
    /// polygons, then lines.
    ///
    /// # Errors
    ///
    /// Propagates the first error reported by the merge engine.
    pub fn apply<G, M>(
        &self,
        zoom: Zoom,
        items: Vec<TileFeature<G>>,
        merge: &M,
    ) -> GeometryResult<Vec<TileFeature<G>>>
    where
        M: MergeEngine<G> + ?Sized,
    {
        let before = items.len();
        let items = merge.merge_multi_point(items)?;
        let items = merge.merge_nearby_polygons(items, &self.polygons)?;
        let items = merge.merge_line_strings(items, &self.lines)?;
        tracing::debug!(zoom, before, after = items.len(), "reduced power features");
        Ok(items)
    }
}
