//! # GRIDLAYER
//!
//! Runs the power layer over GeoJSON records and collects the features
//! each zoom would render.
//!
//! ## Design Principles
//!
//! 1. **Fan-out, fan-in** - Records are classified in parallel, then
//!    merged per zoom once every worker has finished
//! 2. **Deterministic** - Output order follows input order, whatever the
//!    worker count
//! 3. **Engine-agnostic** - Merging goes through the `MergeEngine` trait
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gridlayer::TilePipeline;
//! use gridlayer_power::{LayerConfig, PowerLayer};
//!
//! let config = Arc::new(LayerConfig::load(Path::new("layer.toml"))?);
//! let pipeline = TilePipeline::new(PowerLayer::new(config));
//! let tiles = pipeline.run(gridlayer_geo::import_geojson(input)?, &merge)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Feature, TilePipeline, Tiles};
