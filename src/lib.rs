#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-extract
//!
//! mesh-extract is a Rust library for sampling scalar fields on unstructured
//! 2D meshes, designed for post-processing hydraulic and environmental
//! simulation results. It locates arbitrary points in mixed triangle, quad
//! and polygon grids, interpolates point- or cell-located scalars there, and
//! segments polylines against the mesh so sampled profiles capture every
//! cell transition.
//!
//! ## Features
//! - CSR-backed [`UnstructuredGrid`](topology::grid::UnstructuredGrid) with
//!   point-to-cell incidence for mixed cell types
//! - R-tree point location with deterministic tie-breaking on shared
//!   boundaries
//! - Barycentric interpolation over a vertex-anchored triangle fan, plus
//!   inverse-distance weighting of cell data onto points
//! - Polyline segmentation that samples edge crossings and flags gaps
//!   between disconnected mesh regions
//! - Midpoint-fan triangulation of mixed grids into triangle-only grids
//! - Per-cell and per-point activity masks with fail-soft handling of
//!   malformed field input
//!
//! ## Determinism
//!
//! Point location never depends on spatial-index iteration order: candidate
//! cells are sorted by cell index, so a location on a shared edge or corner
//! resolves to the same cell on every run and platform.
//!
//! ## Usage
//! Add `mesh-extract` as a dependency in your `Cargo.toml` and enable
//! features as needed:
//!
//! ```toml
//! [dependencies]
//! mesh-extract = "0.4.1"
//! # Optional features:
//! # features = ["rayon"]
//! ```

// Re-export our major subsystems:
pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::extract::{ExtractionConfig, ExtractionResult, PointExtractor};
    pub use crate::algs::locate::SpatialLocator;
    pub use crate::algs::polyline::{PolylineExtractor, PolylineSegmenter};
    pub use crate::algs::triangulate::triangulate;
    pub use crate::data::scalars::{DataLocation, ScalarField};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshExtractError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::grid::UnstructuredGrid;
}
