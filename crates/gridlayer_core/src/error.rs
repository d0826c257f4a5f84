//! # Geometry Error Types
//!
//! Errors raised by the geometry and merge engines. Classification itself
//! never fails; these only surface from shape construction and from
//! post-processing a tile.

use thiserror::Error;

use crate::feature::ShapeKind;
use crate::zoom::Zoom;

/// Errors that can occur while building or generalizing shapes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The record's geometry cannot produce the requested shape.
    #[error("cannot build a {kind} from this record: {reason}")]
    Unsupported {
        /// Shape that was requested.
        kind: ShapeKind,
        /// Why it could not be built.
        reason: String,
    },

    /// The input geometry is empty or collapsed.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// A merge algorithm failed on the tile's features.
    #[error("merge failed at zoom {zoom}: {reason}")]
    Merge {
        /// Zoom level being generalized.
        zoom: Zoom,
        /// Failure reported by the merge engine.
        reason: String,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
