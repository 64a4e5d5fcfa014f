//! Top-level module for mesh topology.
//!
//! This module provides the concrete grid representation the extraction
//! engine runs against:
//! - [`cell_type::CellType`]: the 2D cell tags (triangle, quad, polygon)
//! - [`grid::UnstructuredGrid`]: points + CSR connectivity + point→cell
//!   incidence, validated at construction
//!
//! Grids are immutable once built; replacing the mesh means building a new
//! grid (and with it, a new spatial index).

pub mod cell_type;
pub mod grid;

pub use cell_type::CellType;
pub use grid::UnstructuredGrid;
