//! UnstructuredGrid: immutable 2D mesh connectivity and coordinates.
//!
//! The grid stores point coordinates and cell connectivity in flat CSR
//! arrays, plus a point-to-cell incidence table built once at construction.
//! All structure is validated in [`UnstructuredGrid::new`]; extraction code
//! downstream never has to re-check vertex indices or ring lengths.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshExtractError;
use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};

/// An immutable 2D unstructured mesh.
///
/// `UnstructuredGrid` maintains:
/// - `points`: xyz coordinates per point (z doubles as the default scalar),
/// - cell connectivity as CSR (`cell_offsets` into `cell_vertices`) with one
///   [`CellType`] tag per cell,
/// - a CSR point→cell incidence table (`point_cell_offsets` into
///   `point_cells`).
///
/// # Invariants
///
/// - `cell_offsets` is monotone, starts at 0, ends at `cell_vertices.len()`.
/// - Every vertex index is `< points.len()`; every ring length matches its
///   cell type.
/// - For each point, `point_cells` lists exactly the cells whose ring
///   contains it, in ascending cell order.
///
/// These invariants hold by construction and are re-checked via
/// [`validate_invariants`](DebugInvariants::validate_invariants) in debug
/// builds and when the `check-invariants` feature is enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnstructuredGrid {
    points: Vec<[f64; 3]>,
    cell_types: Vec<CellType>,
    cell_offsets: Vec<usize>,
    cell_vertices: Vec<usize>,
    point_cell_offsets: Vec<usize>,
    point_cells: Vec<usize>,
}

impl UnstructuredGrid {
    /// Build a grid from point coordinates and per-cell connectivity.
    ///
    /// # Errors
    /// Returns `Err(UnsupportedCellType)` for a `Polygon(n)` with `n < 3`,
    /// `Err(CellVertexCount)` when a ring length disagrees with its cell
    /// type, and `Err(VertexIndexOutOfBounds)` for an index past the point
    /// list.
    ///
    /// # Complexity
    /// **O(points + total ring length)**, including the incidence build.
    pub fn new(
        points: Vec<[f64; 3]>,
        cells: Vec<(CellType, Vec<usize>)>,
    ) -> Result<Self, MeshExtractError> {
        let mut cell_types = Vec::with_capacity(cells.len());
        let mut cell_offsets = Vec::with_capacity(cells.len() + 1);
        let mut cell_vertices = Vec::new();

        cell_offsets.push(0);
        for (cell, (cell_type, ring)) in cells.into_iter().enumerate() {
            if let CellType::Polygon(n) = cell_type {
                if n < 3 {
                    return Err(MeshExtractError::UnsupportedCellType(cell_type));
                }
            }
            let expected = cell_type.vertex_count();
            if ring.len() != expected {
                return Err(MeshExtractError::CellVertexCount {
                    cell,
                    cell_type,
                    expected,
                    got: ring.len(),
                });
            }
            for &vertex in &ring {
                if vertex >= points.len() {
                    return Err(MeshExtractError::VertexIndexOutOfBounds {
                        cell,
                        vertex,
                        point_count: points.len(),
                    });
                }
            }
            cell_types.push(cell_type);
            cell_vertices.extend_from_slice(&ring);
            cell_offsets.push(cell_vertices.len());
        }

        let (point_cell_offsets, point_cells) =
            build_incidence(points.len(), &cell_offsets, &cell_vertices);

        let grid = Self {
            points,
            cell_types,
            cell_offsets,
            cell_vertices,
            point_cell_offsets,
            point_cells,
        };
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        grid.debug_assert_invariants();
        Ok(grid)
    }

    /// Number of points in the grid.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_types.len()
    }

    /// Coordinates of point `p`.
    #[inline]
    pub fn point(&self, p: usize) -> [f64; 3] {
        self.points[p]
    }

    /// All point coordinates, in index order.
    #[inline]
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Type tag of cell `c`.
    #[inline]
    pub fn cell_type(&self, c: usize) -> CellType {
        self.cell_types[c]
    }

    /// Vertex ring of cell `c` as point indices.
    #[inline]
    pub fn cell_vertices(&self, c: usize) -> &[usize] {
        &self.cell_vertices[self.cell_offsets[c]..self.cell_offsets[c + 1]]
    }

    /// Vertex ring of cell `c` gathered as coordinates.
    pub fn cell_points(&self, c: usize) -> Vec<[f64; 3]> {
        self.cell_vertices(c)
            .iter()
            .map(|&v| self.points[v])
            .collect()
    }

    /// Arithmetic mean of cell `c`'s vertex coordinates.
    pub fn cell_centroid(&self, c: usize) -> [f64; 3] {
        let ring = self.cell_vertices(c);
        let mut acc = [0.0_f64; 3];
        for &v in ring {
            let p = self.points[v];
            acc[0] += p[0];
            acc[1] += p[1];
            acc[2] += p[2];
        }
        let n = ring.len() as f64;
        [acc[0] / n, acc[1] / n, acc[2] / n]
    }

    /// Cells incident to point `p`, in ascending cell order.
    #[inline]
    pub fn cells_of_point(&self, p: usize) -> &[usize] {
        &self.point_cells[self.point_cell_offsets[p]..self.point_cell_offsets[p + 1]]
    }
}

/// Count-then-fill CSR transposition of the cell→vertex table.
///
/// Filling walks cells in ascending order, so each point's incidence list
/// comes out ascending without a sort.
fn build_incidence(
    point_count: usize,
    cell_offsets: &[usize],
    cell_vertices: &[usize],
) -> (Vec<usize>, Vec<usize>) {
    let mut counts = vec![0usize; point_count];
    for &v in cell_vertices {
        counts[v] += 1;
    }
    let mut offsets = Vec::with_capacity(point_count + 1);
    offsets.push(0);
    for p in 0..point_count {
        offsets.push(offsets[p] + counts[p]);
    }
    let mut cursor = offsets[..point_count].to_vec();
    let mut incidence = vec![0usize; cell_vertices.len()];
    for c in 0..cell_offsets.len() - 1 {
        for &v in &cell_vertices[cell_offsets[c]..cell_offsets[c + 1]] {
            incidence[cursor[v]] = c;
            cursor[v] += 1;
        }
    }
    (offsets, incidence)
}

impl DebugInvariants for UnstructuredGrid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "UnstructuredGrid invalid");
    }

    fn validate_invariants(&self) -> Result<(), MeshExtractError> {
        let fail = |detail: String| MeshExtractError::InvariantViolation {
            context: "UnstructuredGrid",
            detail,
        };

        // 1) CSR offsets are monotone and cover the flat arrays
        if self.cell_offsets.first() != Some(&0)
            || self.cell_offsets.last() != Some(&self.cell_vertices.len())
            || self.cell_offsets.windows(2).any(|w| w[0] > w[1])
        {
            return Err(fail("cell_offsets not a valid CSR offset vector".into()));
        }
        if self.cell_offsets.len() != self.cell_types.len() + 1 {
            return Err(fail(format!(
                "{} cell types vs {} offset entries",
                self.cell_types.len(),
                self.cell_offsets.len()
            )));
        }
        if self.point_cell_offsets.first() != Some(&0)
            || self.point_cell_offsets.last() != Some(&self.point_cells.len())
            || self.point_cell_offsets.windows(2).any(|w| w[0] > w[1])
        {
            return Err(fail("point_cell_offsets not a valid CSR offset vector".into()));
        }
        if self.point_cell_offsets.len() != self.points.len() + 1 {
            return Err(fail(format!(
                "{} points vs {} incidence offset entries",
                self.points.len(),
                self.point_cell_offsets.len()
            )));
        }

        // 2) ring lengths match cell types; vertex indices in bounds
        for c in 0..self.cell_count() {
            let ring = self.cell_vertices(c);
            if ring.len() != self.cell_types[c].vertex_count() {
                return Err(fail(format!(
                    "cell {c} ring length {} disagrees with {:?}",
                    ring.len(),
                    self.cell_types[c]
                )));
            }
            if let Some(&v) = ring.iter().find(|&&v| v >= self.points.len()) {
                return Err(fail(format!("cell {c} references missing point {v}")));
            }
        }

        // 3) incidence lists ascending and consistent with connectivity
        for p in 0..self.point_count() {
            let cells = self.cells_of_point(p);
            if cells.windows(2).any(|w| w[0] >= w[1]) {
                return Err(fail(format!("incidence of point {p} not ascending")));
            }
            if let Some(&c) = cells
                .iter()
                .find(|&&c| !self.cell_vertices(c).contains(&p))
            {
                return Err(fail(format!(
                    "incidence lists cell {c} for point {p}, but its ring omits the point"
                )));
            }
        }
        Ok(())
    }
}
