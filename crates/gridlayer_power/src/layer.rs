//! # Power Layer
//!
//! Decides, per source record, which shapes to emit and when their
//! attributes appear.
//!
//! ## Branches
//!
//! ```text
//! record ──► geometry_class()
//!              ├─ Area  ─► polygon z8-15 (+ label point if named)
//!              ├─ Line  ─► line z(voltage)-15
//!              ├─ Point ─► point z(category)+
//!              └─ None  ─► nothing
//! ```
//!
//! ## Thread Safety
//!
//! `PowerLayer` holds only shared, read-only configuration. One instance
//! may classify records from any number of threads.

use std::sync::Arc;

use gridlayer_core::{
    AttributeProcessor, FeatureCollector, GeometryClass, GeometryResult, MergeEngine, Shape,
    SourceRecord, TagCopier, TileFeature, Zoom, MAX_ZOOM,
};

use crate::config::LayerConfig;
use crate::tags::{DETAIL_TAGS, POWER_KEY, PRIMARY_TAGS};
use crate::zoom::{label_min_zoom, line_min_zoom};

/// First zoom power areas are drawn at.
pub const AREA_MIN_ZOOM: Zoom = 8;

/// Areas smaller than this many pixels are culled.
pub const AREA_MIN_PIXEL_SIZE: f64 = 2.0;

/// Lines shorter than this many pixels are culled.
pub const LINE_MIN_PIXEL_SIZE: f64 = 1.0;

/// An area earns its details once it renders this many pixels wide.
pub const DETAIL_PIXEL_SIZE: f64 = 32.0;

/// Query buffer for points and label points, in pixels.
pub const POINT_BUFFER_PIXELS: f64 = 32.0;

/// Zoom levels between a line appearing and its details appearing.
pub const LINE_DETAIL_OFFSET: Zoom = 3;

/// Classifier for the power layer.
#[derive(Clone, Debug)]
pub struct PowerLayer<A = TagCopier> {
    config: Arc<LayerConfig>,
    attributes: A,
}

impl PowerLayer<TagCopier> {
    /// Creates a layer copying tags verbatim.
    #[must_use]
    pub fn new(config: Arc<LayerConfig>) -> Self {
        Self::with_attributes(config, TagCopier)
    }
}

impl Default for PowerLayer<TagCopier> {
    fn default() -> Self {
        Self::new(Arc::new(LayerConfig::default()))
    }
}

impl<A: AttributeProcessor> PowerLayer<A> {
    /// Creates a layer with a custom attribute processor.
    #[must_use]
    pub fn with_attributes(config: Arc<LayerConfig>, attributes: A) -> Self {
        Self { config, attributes }
    }

    /// Output layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.layer.name
    }

    /// Layer configuration.
    #[must_use]
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Whether this layer handles `record`: any record with a `power` tag.
    #[must_use]
    pub fn claims<R: SourceRecord + ?Sized>(&self, record: &R) -> bool {
        record.has_tag(POWER_KEY)
    }

    /// Emits the shapes for one record into `collector`.
    ///
    /// Never fails: shapes the geometry engine cannot build are logged and
    /// skipped, and unreadable tag values fall back to defaults.
    pub fn process_feature<R, C>(&self, record: &R, collector: &mut C)
    where
        R: SourceRecord + ?Sized,
        C: FeatureCollector,
    {
        match record.geometry_class() {
            GeometryClass::Area => self.process_area(record, collector),
            GeometryClass::Line => self.process_line(record, collector),
            GeometryClass::Point => self.process_point(record, collector),
            GeometryClass::None => {
                tracing::trace!("power record has no renderable geometry");
            }
        }
    }

    /// Generalizes the features of one tile at one zoom.
    ///
    /// Must run only after every record contributing to the tile has been
    /// processed.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from the merge engine; the caller decides
    /// whether to skip or retry the tile.
    pub fn post_process<G, M>(
        &self,
        zoom: Zoom,
        items: Vec<TileFeature<G>>,
        merge: &M,
    ) -> GeometryResult<Vec<TileFeature<G>>>
    where
        M: MergeEngine<G> + ?Sized,
    {
        self.config.reduction.apply(zoom, items, merge)
    }

    fn process_area<R, C>(&self, record: &R, collector: &mut C)
    where
        R: SourceRecord + ?Sized,
        C: FeatureCollector,
    {
        let Some(mut polygon) = built(collector.polygon(self.name()), "area") else {
            return;
        };
        polygon.set_zoom_range(AREA_MIN_ZOOM, MAX_ZOOM);
        polygon.set_min_pixel_size(AREA_MIN_PIXEL_SIZE);
        self.attributes.set_attributes(record, &mut polygon, PRIMARY_TAGS);

        let detail_min_zoom =
            label_min_zoom(record).min(polygon.min_zoom_for_pixel_size(DETAIL_PIXEL_SIZE));
        // Gates below the polygon's own range are moot; keep them inside it.
        let polygon_detail_zoom = detail_min_zoom.max(polygon.min_zoom());
        self.attributes
            .set_attributes_with_min_zoom(record, &mut polygon, DETAIL_TAGS, polygon_detail_zoom);
        collector.emit(polygon);

        if record.has_tag("name") || record.has_tag("ref") {
            let label = collector.point_on_surface(self.name());
            let Some(mut point) = built(label, "area label") else {
                return;
            };
            point.set_min_zoom(detail_min_zoom);
            point.set_buffer_pixels(POINT_BUFFER_PIXELS);
            self.attributes.set_attributes(record, &mut point, PRIMARY_TAGS);
            self.attributes.set_attributes(record, &mut point, DETAIL_TAGS);
            collector.emit(point);
        }
    }

    fn process_line<R, C>(&self, record: &R, collector: &mut C)
    where
        R: SourceRecord + ?Sized,
        C: FeatureCollector,
    {
        let Some(mut line) = built(collector.line(self.name()), "line") else {
            return;
        };
        let min_zoom = line_min_zoom(record);
        line.set_zoom_range(min_zoom, MAX_ZOOM);
        line.set_min_pixel_size(LINE_MIN_PIXEL_SIZE);
        self.attributes.set_attributes(record, &mut line, PRIMARY_TAGS);

        let detail_min_zoom = min_zoom.saturating_add(LINE_DETAIL_OFFSET).min(MAX_ZOOM);
        self.attributes
            .set_attributes_with_min_zoom(record, &mut line, DETAIL_TAGS, detail_min_zoom);
        collector.emit(line);
    }

    fn process_point<R, C>(&self, record: &R, collector: &mut C)
    where
        R: SourceRecord + ?Sized,
        C: FeatureCollector,
    {
        let Some(mut point) = built(collector.point(self.name()), "point") else {
            return;
        };
        point.set_min_zoom(label_min_zoom(record));
        point.set_buffer_pixels(POINT_BUFFER_PIXELS);
        self.attributes.set_attributes(record, &mut point, PRIMARY_TAGS);
        self.attributes.set_attributes(record, &mut point, DETAIL_TAGS);
        collector.emit(point);
    }
}

/// Unwraps a shape, logging construction failures.
fn built<S>(shape: GeometryResult<S>, what: &str) -> Option<S> {
    shape
        .map_err(|err| tracing::warn!(%err, "skipping power {what}"))
        .ok()
}
