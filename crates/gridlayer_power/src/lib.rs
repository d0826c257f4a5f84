//! # GRIDLAYER Power Layer
//!
//! Resolution management for electrical-power infrastructure.
//!
//! ## Design Principles
//!
//! 1. **Pure**: Same record, same shapes - no hidden state between records
//! 2. **Monotonic**: Bigger infrastructure never appears later than smaller
//! 3. **Forgiving**: Noisy tag values degrade to the low-detail bucket
//! 4. **Tunable**: Merge tolerances come from config, not code
//!
//! ## Core Components
//!
//! - `units`: voltage and power-output parsers
//! - `zoom`: minzoom classifiers for lines, labels and plants
//! - `PowerLayer`: per-record dispatcher and per-zoom post-processing
//! - `ReductionParams`: merge tolerances
//! - `LayerConfig`: TOML configuration
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gridlayer_power::{LayerConfig, PowerLayer};
//!
//! let layer = PowerLayer::new(Arc::new(LayerConfig::default()));
//! if layer.claims(&record) {
//!     layer.process_feature(&record, &mut collector);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod layer;
pub mod reduction;
pub mod tags;
pub mod units;
pub mod zoom;

pub use config::{LayerConfig, LayerSection, LAYER_NAME};
pub use error::{ConfigError, ConfigResult};
pub use layer::PowerLayer;
pub use reduction::{ReductionParams, LINE_MERGE, POLYGON_MERGE};
pub use tags::{COMMON_DETAIL_TAGS, DETAIL_TAGS, PRIMARY_TAGS};
pub use units::{parse_max_voltage, parse_power_output};
pub use zoom::{label_min_zoom, line_min_zoom, plant_min_zoom, PowerKind};
