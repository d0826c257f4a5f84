//! # Engine Interfaces
//!
//! Traits a layer classifier consumes from the tiling infrastructure.
//!
//! ```text
//! classifier defines:          engine implements:
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ FeatureCollector     │ ←── │ geometry engine      │
//! │ Shape                │ ←── │ shape handles        │
//! │ AttributeProcessor   │ ←── │ tag copy policy      │
//! └──────────────────────┘     └──────────────────────┘
//! ```

use crate::error::GeometryResult;
use crate::record::SourceRecord;
use crate::tags::TagSet;
use crate::zoom::Zoom;

// ============================================================================
// GEOMETRY ENGINE
// ============================================================================

/// A shape being configured before it is emitted.
pub trait Shape {
    /// Sets the inclusive zoom range the shape is visible in.
    fn set_zoom_range(&mut self, min_zoom: Zoom, max_zoom: Zoom);

    /// Sets the first zoom the shape is visible at.
    fn set_min_zoom(&mut self, min_zoom: Zoom);

    /// Shapes rendering smaller than this many pixels are culled.
    fn set_min_pixel_size(&mut self, pixels: f64);

    /// Sets the query buffer around tile edges, in pixels.
    fn set_buffer_pixels(&mut self, pixels: f64);

    /// First zoom the shape is visible at.
    fn min_zoom(&self) -> Zoom;

    /// First zoom at which the shape renders at least `pixels` wide.
    fn min_zoom_for_pixel_size(&self, pixels: f64) -> Zoom;

    /// Binds an attribute for the shape's whole visibility range.
    fn set_attr(&mut self, key: &str, value: &str);

    /// Binds an attribute included only from `min_zoom` upward.
    fn set_attr_with_min_zoom(&mut self, key: &str, value: &str, min_zoom: Zoom);
}

/// Builds shapes from the record it was created for.
///
/// One collector serves one source record.
pub trait FeatureCollector {
    /// Shape handle produced by this collector.
    type Shape: Shape;

    /// Starts a polygon from the record's geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry cannot be read as a polygon.
    fn polygon(&mut self, layer: &str) -> GeometryResult<Self::Shape>;

    /// Starts a line from the record's geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry cannot be read as a line.
    fn line(&mut self, layer: &str) -> GeometryResult<Self::Shape>;

    /// Starts a point from the record's geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry cannot be read as a point.
    fn point(&mut self, layer: &str) -> GeometryResult<Self::Shape>;

    /// Starts a representative point guaranteed to lie inside the record's
    /// polygon.
    ///
    /// # Errors
    ///
    /// Returns an error if no interior point exists.
    fn point_on_surface(&mut self, layer: &str) -> GeometryResult<Self::Shape>;

    /// Hands a configured shape back for output.
    fn emit(&mut self, shape: Self::Shape);
}

// ============================================================================
// ATTRIBUTE ENGINE
// ============================================================================

/// Copies tag values from a record onto a shape.
pub trait AttributeProcessor: Send + Sync {
    /// Copies every tag of `tags` present on `record`, unconditionally.
    fn set_attributes<R, S>(&self, record: &R, shape: &mut S, tags: TagSet)
    where
        R: SourceRecord + ?Sized,
        S: Shape;

    /// Copies every tag of `tags` present on `record`, visible from
    /// `min_zoom` upward.
    fn set_attributes_with_min_zoom<R, S>(
        &self,
        record: &R,
        shape: &mut S,
        tags: TagSet,
        min_zoom: Zoom,
    ) where
        R: SourceRecord + ?Sized,
        S: Shape;
}

/// Copies tag values verbatim. Absent and blank values are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagCopier;

impl TagCopier {
    fn values<'r, R>(
        record: &'r R,
        tags: TagSet,
    ) -> impl Iterator<Item = (&'static str, &'r str)> + 'r
    where
        R: SourceRecord + ?Sized + 'r,
    {
        tags.iter().filter_map(move |key| {
            record
                .tag(key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (key, value))
        })
    }
}

impl AttributeProcessor for TagCopier {
    fn set_attributes<R, S>(&self, record: &R, shape: &mut S, tags: TagSet)
    where
        R: SourceRecord + ?Sized,
        S: Shape,
    {
        for (key, value) in Self::values(record, tags) {
            shape.set_attr(key, value);
        }
    }

    fn set_attributes_with_min_zoom<R, S>(
        &self,
        record: &R,
        shape: &mut S,
        tags: TagSet,
        min_zoom: Zoom,
    ) where
        R: SourceRecord + ?Sized,
        S: Shape,
    {
        for (key, value) in Self::values(record, tags) {
            shape.set_attr_with_min_zoom(key, value, min_zoom);
        }
    }
}
