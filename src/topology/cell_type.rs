//! Cell type metadata for grid cells.

use serde::{Deserialize, Serialize};

/// Cell types accepted by the extraction engine.
///
/// The engine is strictly 2D: every cell is a planar polygon described by its
/// vertex ring. `Polygon(n)` covers rings beyond quads; interpolation treats
/// it as a triangle fan anchored at the ring's first vertex, so convex and
/// star-shaped-from-first-vertex polygons are the supported class.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 2D polygon with `n` vertices.
    Polygon(u8),
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Triangle
    }
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Triangle | CellType::Quadrilateral | CellType::Polygon(_) => 2,
        }
    }

    /// Number of vertices the cell's connectivity must carry.
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
            CellType::Polygon(n) => n as usize,
        }
    }
}
