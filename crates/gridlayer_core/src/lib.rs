//! # GRIDLAYER Core
//!
//! Shared model for layer classifiers in a vector-tile pipeline.
//!
//! ## Design Principles
//!
//! 1. **Records are read-only** - Classifiers only inspect tags and capabilities
//! 2. **Engines behind traits** - Geometry, attribute and merge engines are
//!    consumed through narrow interfaces so classifiers test against fakes
//! 3. **Transient output** - Rendering instructions live for one record, one pass
//!
//! ## Core Components
//!
//! - `SourceRecord`: tagged input feature with capability predicates
//! - `GeometryClass`: closed dispatch over area/line/point/none
//! - `RenderInstruction`: one emitted shape with zoom range and attributes
//! - `TileFeature`: an instruction resolved at a single zoom level
//! - `FeatureCollector` / `Shape`: geometry engine interface
//! - `AttributeProcessor`: attribute-copy interface
//! - `MergeEngine`: post-render generalization interface
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridlayer_core::{GeometryClass, SourceRecord, TaggedRecord};
//!
//! let record = TaggedRecord::new(GeometryClass::Line).with_tag("power", "line");
//! assert_eq!(record.geometry_class(), GeometryClass::Line);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod error;
pub mod feature;
pub mod merge;
pub mod record;
pub mod tags;
pub mod zoom;

pub use engine::{AttributeProcessor, FeatureCollector, Shape, TagCopier};
pub use error::{GeometryError, GeometryResult};
pub use feature::{Attribute, RenderInstruction, ShapeKind, TileFeature};
pub use merge::{LineMergeParams, MergeEngine, PolygonMergeParams};
pub use record::{GeometryClass, SourceRecord, TaggedRecord};
pub use tags::TagSet;
pub use zoom::{min_zoom_for_pixel_size, Zoom, MAX_ZOOM, MIN_ZOOM, TILE_PIXELS};
