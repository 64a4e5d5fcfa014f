//! MeshExtractError: Unified error type for mesh-extract public APIs
//!
//! This error type is used throughout the mesh-extract library to provide robust,
//! non-panicking error handling for all public APIs. Per-location extraction
//! failures (a query outside the mesh, an inactive cell, a mismatched scalar
//! array) are *not* errors; they degrade to the configured no-data value.

use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for mesh-extract operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshExtractError {
    /// A cell references a vertex index outside the grid's point list.
    #[error("cell {cell}: vertex index {vertex} out of bounds (grid has {point_count} points)")]
    VertexIndexOutOfBounds {
        cell: usize,
        vertex: usize,
        point_count: usize,
    },
    /// A cell's vertex count does not match its declared cell type.
    #[error("cell {cell}: {cell_type:?} expects {expected} vertices, got {got}")]
    CellVertexCount {
        cell: usize,
        cell_type: CellType,
        expected: usize,
        got: usize,
    },
    /// The grid contains a cell type the extraction engine does not handle.
    #[error("unsupported cell type {0:?} (only 2D cells are supported)")]
    UnsupportedCellType(CellType),
    /// A geometry routine received malformed input (wrong slice length,
    /// fewer than three vertices for a polygon, ...).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A data-location string did not parse to `points`, `cells`, or `unknown`.
    #[error("invalid data location `{0}` (expected \"points\", \"cells\", or \"unknown\")")]
    InvalidDataLocation(String),
    /// A structural invariant was violated (CSR offsets out of order,
    /// incidence table inconsistent with connectivity, ...).
    #[error("invariant violation in {context}: {detail}")]
    InvariantViolation {
        context: &'static str,
        detail: String,
    },
}
