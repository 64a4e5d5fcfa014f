//! Midpoint-fan triangulation of mixed-cell grids.
//!
//! Downstream consumers (renderers, exporters) often want triangles only.
//! [`triangulate`] rewrites every non-triangle cell into a symmetric fan
//! around its centroid, refined through the edge midpoints, so the
//! triangulation has no sliver preference toward any ring vertex.

use crate::mesh_error::MeshExtractError;
use crate::topology::cell_type::CellType;
use crate::topology::grid::UnstructuredGrid;

/// Build an all-triangle grid covering the same area as `grid`.
///
/// Triangles are copied unchanged, referencing the original points. Every
/// other cell with `n` ring vertices contributes `n` edge midpoints (in
/// edge order) followed by its centroid to the point array, and splits
/// into `2n` triangles: `(vᵢ, mᵢ, c)` and `(mᵢ, vᵢ₊₁, c)` per edge. Points
/// appended for one cell are not shared with the next, so a shared edge
/// between two quadrilaterals gets two coincident midpoints; the cell
/// order of the output follows the input.
///
/// # Errors
///
/// Propagates [`MeshExtractError`] from output-grid validation.
pub fn triangulate(grid: &UnstructuredGrid) -> Result<UnstructuredGrid, MeshExtractError> {
    let mut points = grid.points().to_vec();
    let mut cells = Vec::new();

    for c in 0..grid.cell_count() {
        let ring = grid.cell_vertices(c);
        if grid.cell_type(c) == CellType::Triangle {
            cells.push((CellType::Triangle, ring.to_vec()));
            continue;
        }

        let n = ring.len();
        let first_midpoint = points.len();
        for i in 0..n {
            points.push(midpoint(grid.point(ring[i]), grid.point(ring[(i + 1) % n])));
        }
        let centroid = points.len();
        points.push(grid.cell_centroid(c));

        for i in 0..n {
            let m = first_midpoint + i;
            cells.push((CellType::Triangle, vec![ring[i], m, centroid]));
            cells.push((CellType::Triangle, vec![m, ring[(i + 1) % n], centroid]));
        }
    }

    UnstructuredGrid::new(points, cells)
}

fn midpoint(p: [f64; 3], q: [f64; 3]) -> [f64; 3] {
    [
        0.5 * (p[0] + q[0]),
        0.5 * (p[1] + q[1]),
        0.5 * (p[2] + q[2]),
    ]
}
