//! # GRIDLAYER Geo
//!
//! GeoJSON-backed source records and geometry engine.
//!
//! ## Architecture
//! - `import` - GeoJSON files → tagged [`GeoRecord`]s
//! - `mercator` - WGS84 → Web Mercator world units
//! - `collector` - shapes, pixel-size zooms and label points per record
//! - `export` - per-zoom tile features → GeoJSON
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridlayer_geo::{import_geojson, GeoCollector};
//!
//! for record in import_geojson(Path::new("power.geojson"))? {
//!     let mut collector = GeoCollector::new(&record);
//!     layer.process_feature(&record, &mut collector);
//!     shapes.extend(collector.into_instructions());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod collector;
pub mod error;
pub mod export;
pub mod import;
pub mod mercator;
pub mod record;

pub use collector::{GeoCollector, GeoShape};
pub use error::{ImportError, ImportResult};
pub use export::{to_geojson, to_geojson_feature};
pub use import::{import_geojson, parse_geojson, tags_from_properties};
pub use record::{GeoRecord, SharedGeometry};
