//! # Rendering Instructions
//!
//! A [`RenderInstruction`] is one shape emitted for a source record: the
//! geometry, the zoom range it is visible in, culling hints, and attribute
//! bindings. It doubles as the mutable shape handle while a classifier
//! configures it, and is frozen once emitted.
//!
//! [`TileFeature`] is what one instruction looks like at a single zoom,
//! which is what the merge engine consumes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::Shape;
use crate::zoom::{min_zoom_for_pixel_size, Zoom, MAX_ZOOM, MIN_ZOOM, TILE_PIXELS};

/// Geometric form of an emitted shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Filled area.
    Polygon,
    /// Linear feature.
    Line,
    /// Point feature (including label points derived from areas).
    Point,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Polygon => "polygon",
            Self::Line => "line",
            Self::Point => "point",
        };
        f.write_str(name)
    }
}

/// One attribute bound to a shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Tag name.
    pub key: String,
    /// Tag value copied from the source record.
    pub value: String,
    /// First zoom the attribute is included at. `None` means whenever the
    /// shape itself is visible.
    pub min_zoom: Option<Zoom>,
}

impl Attribute {
    /// Whether the attribute is included at `zoom`.
    #[must_use]
    pub fn visible_at(&self, zoom: Zoom) -> bool {
        self.min_zoom.map_or(true, |min| zoom >= min)
    }
}

/// A shape emitted for one source record.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderInstruction<G> {
    layer: String,
    kind: ShapeKind,
    geometry: G,
    world_size: f64,
    min_zoom: Zoom,
    max_zoom: Zoom,
    min_pixel_size: f64,
    buffer_pixels: f64,
    attributes: Vec<Attribute>,
}

impl<G> RenderInstruction<G> {
    /// Default minimum rendered size in pixels.
    pub const DEFAULT_MIN_PIXEL_SIZE: f64 = 1.0;
    /// Default query buffer in pixels.
    pub const DEFAULT_BUFFER_PIXELS: f64 = 4.0;

    /// Creates a shape visible at every zoom with no attributes.
    ///
    /// `world_size` is the geometry's extent in world units (see
    /// [`min_zoom_for_pixel_size`]): square root of the area for polygons,
    /// length for lines, zero for points.
    #[must_use]
    pub fn new(layer: impl Into<String>, kind: ShapeKind, geometry: G, world_size: f64) -> Self {
        Self {
            layer: layer.into(),
            kind,
            geometry,
            world_size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            min_pixel_size: Self::DEFAULT_MIN_PIXEL_SIZE,
            buffer_pixels: Self::DEFAULT_BUFFER_PIXELS,
            attributes: Vec::new(),
        }
    }

    /// Layer the shape belongs to.
    #[must_use]
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Geometric form.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Source geometry.
    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Last zoom the shape is visible at.
    #[must_use]
    pub fn max_zoom(&self) -> Zoom {
        self.max_zoom
    }

    /// Minimum rendered size in pixels.
    #[must_use]
    pub fn min_pixel_size(&self) -> f64 {
        self.min_pixel_size
    }

    /// Query buffer in pixels.
    #[must_use]
    pub fn buffer_pixels(&self) -> f64 {
        self.buffer_pixels
    }

    /// Attribute bindings in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up a bound attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.key == key)
    }

    /// Whether the shape is visible at `zoom`.
    #[must_use]
    pub fn visible_at(&self, zoom: Zoom) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&zoom)
    }

    /// Rendered extent in pixels at `zoom`.
    #[must_use]
    pub fn pixel_size_at(&self, zoom: Zoom) -> f64 {
        self.world_size * TILE_PIXELS * f64::from(1u32 << zoom.min(MAX_ZOOM))
    }

    /// Whether the shape reaches its minimum pixel size at `zoom`.
    ///
    /// Points have no extent and always qualify.
    #[must_use]
    pub fn large_enough_at(&self, zoom: Zoom) -> bool {
        self.kind == ShapeKind::Point || self.pixel_size_at(zoom) >= self.min_pixel_size
    }

    /// Resolves the shape at one zoom, dropping attributes gated above it.
    #[must_use]
    pub fn at_zoom(&self, zoom: Zoom) -> Option<TileFeature<G>>
    where
        G: Clone,
    {
        if !self.visible_at(zoom) {
            return None;
        }
        let attributes = self
            .attributes
            .iter()
            .filter(|attr| attr.visible_at(zoom))
            .map(|attr| (attr.key.clone(), attr.value.clone()))
            .collect();
        Some(TileFeature {
            layer: self.layer.clone(),
            kind: self.kind,
            geometry: self.geometry.clone(),
            attributes,
            min_pixel_size: self.min_pixel_size,
            buffer_pixels: self.buffer_pixels,
        })
    }

    fn bind(&mut self, key: &str, value: &str, min_zoom: Option<Zoom>) {
        let attribute = Attribute {
            key: key.to_owned(),
            value: value.to_owned(),
            min_zoom,
        };
        match self.attributes.iter_mut().find(|attr| attr.key == key) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }
}

impl<G> Shape for RenderInstruction<G> {
    fn set_zoom_range(&mut self, min_zoom: Zoom, max_zoom: Zoom) {
        self.max_zoom = max_zoom.min(MAX_ZOOM);
        self.min_zoom = min_zoom.min(self.max_zoom);
    }

    fn set_min_zoom(&mut self, min_zoom: Zoom) {
        self.min_zoom = min_zoom.min(self.max_zoom);
    }

    fn set_min_pixel_size(&mut self, pixels: f64) {
        self.min_pixel_size = pixels;
    }

    fn set_buffer_pixels(&mut self, pixels: f64) {
        self.buffer_pixels = pixels;
    }

    fn min_zoom(&self) -> Zoom {
        self.min_zoom
    }

    fn min_zoom_for_pixel_size(&self, pixels: f64) -> Zoom {
        min_zoom_for_pixel_size(self.world_size, pixels)
    }

    fn set_attr(&mut self, key: &str, value: &str) {
        self.bind(key, value, None);
    }

    fn set_attr_with_min_zoom(&mut self, key: &str, value: &str, min_zoom: Zoom) {
        self.bind(key, value, Some(min_zoom));
    }
}

/// One shape as it appears in a single tile at a single zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct TileFeature<G> {
    /// Layer the feature belongs to.
    pub layer: String,
    /// Geometric form.
    pub kind: ShapeKind,
    /// Geometry.
    pub geometry: G,
    /// Attributes visible at this zoom.
    pub attributes: BTreeMap<String, String>,
    /// Minimum rendered size in pixels.
    pub min_pixel_size: f64,
    /// Query buffer in pixels.
    pub buffer_pixels: f64,
}
