//! # Pipeline Error Types

use gridlayer_core::{GeometryError, Zoom};
use gridlayer_geo::ImportError;
use gridlayer_power::ConfigError;
use thiserror::Error;

/// Errors that can occur while running the tile pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Layer configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source records could not be imported.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// The merge engine failed on one zoom.
    #[error("post-processing failed at zoom {zoom}: {source}")]
    PostProcess {
        /// Zoom being post-processed.
        zoom: Zoom,
        /// Merge engine failure.
        #[source]
        source: GeometryError,
    },
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
