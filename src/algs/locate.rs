//! Spatial locator: R-tree broad phase over cell bounding boxes.
//!
//! The tree indexes one axis-aligned box per cell, slightly inflated so
//! on-boundary queries are never lost to rounding. Every query finishes
//! with the exact containment test from [`crate::geometry::weights`], and
//! candidates are always visited in ascending cell order, so ties on shared
//! edges and vertices resolve deterministically to the lowest cell index.
//!
//! The locator is read-only after [`SpatialLocator::build`] and safe to
//! share across threads.

use crate::geometry::weights;
use crate::topology::grid::UnstructuredGrid;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// Minimum absolute inflation of each cell box.
const ENVELOPE_PAD: f64 = 1e-9;
/// Extra inflation relative to the cell's extent, matching the tolerance of
/// the exact containment test on large-coordinate meshes.
const ENVELOPE_PAD_REL: f64 = 1e-9;

/// Bounding box of one cell, as stored in the R-tree.
#[derive(Debug, Clone)]
struct CellEnvelope {
    cell_index: usize,
    min: [f64; 2],
    max: [f64; 2],
}

impl CellEnvelope {
    fn new(cell_index: usize, ring: &[[f64; 3]]) -> Self {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for p in ring {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        let extent = (max[0] - min[0]).max(max[1] - min[1]);
        let pad = ENVELOPE_PAD.max(ENVELOPE_PAD_REL * extent);
        Self {
            cell_index,
            min: [min[0] - pad, min[1] - pad],
            max: [max[0] + pad, max[1] + pad],
        }
    }
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for CellEnvelope {
    /// Squared distance from `point` to the box, zero inside.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = (self.min[0] - point[0]).max(point[0] - self.max[0]).max(0.0);
        let dy = (self.min[1] - point[1]).max(point[1] - self.max[1]).max(0.0);
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.min[0] <= point[0]
            && point[0] <= self.max[0]
            && self.min[1] <= point[1]
            && point[1] <= self.max[1]
    }
}

/// R-tree over cell bounding boxes with exact narrow-phase tests.
#[derive(Debug)]
pub struct SpatialLocator {
    tree: RTree<CellEnvelope>,
}

impl SpatialLocator {
    /// Bulk-load the index from a grid. **O(n log n)**; amortized across
    /// every subsequent query on the same grid.
    pub fn build(grid: &UnstructuredGrid) -> Self {
        let envelopes = (0..grid.cell_count())
            .map(|c| CellEnvelope::new(c, &grid.cell_points(c)))
            .collect();
        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// First cell containing `location`, in ascending cell order.
    ///
    /// Boundary points shared by several cells resolve to the lowest index;
    /// `None` when no cell contains the location.
    pub fn find_cell(&self, grid: &UnstructuredGrid, location: [f64; 3]) -> Option<usize> {
        let mut candidates = self.candidates_at(location);
        candidates.sort_unstable();
        candidates
            .into_iter()
            .find(|&c| contains(grid, c, location))
    }

    /// All cells containing `location`, ascending.
    pub fn containing_cells(&self, grid: &UnstructuredGrid, location: [f64; 3]) -> Vec<usize> {
        let mut candidates = self.candidates_at(location);
        candidates.sort_unstable();
        candidates.retain(|&c| contains(grid, c, location));
        candidates
    }

    /// Cells whose bounding box intersects the rectangle `[min, max]`,
    /// ascending. Broad phase for segment walks; callers still need exact
    /// tests.
    pub fn cells_in_envelope(&self, min: [f64; 2], max: [f64; 2]) -> Vec<usize> {
        let envelope = AABB::from_corners(min, max);
        let mut cells: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| e.cell_index)
            .collect();
        cells.sort_unstable();
        cells
    }

    fn candidates_at(&self, location: [f64; 3]) -> Vec<usize> {
        self.tree
            .locate_all_at_point(&[location[0], location[1]])
            .map(|e| e.cell_index)
            .collect()
    }
}

fn contains(grid: &UnstructuredGrid, c: usize, location: [f64; 3]) -> bool {
    match weights::cell_contains_point(grid.cell_type(c), &grid.cell_points(c), location) {
        Ok(inside) => inside,
        Err(e) => {
            log::error!("containment test failed for cell {c}: {e}");
            false
        }
    }
}
