//! Polyline segmentation and extraction.
//!
//! [`PolylineSegmenter`] refines a polyline into the ordered sample
//! locations where the interpolated field is worth reading: the original
//! vertices plus every crossing with a cell's interpolation edges (outer
//! ring edges and interior fan diagonals). Between those samples the
//! interpolant is linear along the polyline, so the samples fully describe
//! it. Where two consecutive crossings bracket a hole in the mesh, a
//! midpoint is inserted so the gap shows up as a no-data sample.
//!
//! [`PolylineExtractor`] couples the segmenter with a [`PointExtractor`]:
//! set scalars, set a polyline, read the refined locations and their
//! values.

use crate::algs::extract::{ExtractionResult, PointExtractor};
use crate::algs::locate::SpatialLocator;
use crate::data::scalars::DataLocation;
use crate::geometry::{intersect, weights};
use crate::topology::grid::UnstructuredGrid;
use itertools::Itertools;

/// Absolute floor of the sample-merge tolerance.
const XY_TOL: f64 = 1e-9;
/// Relative contribution of the segment length to the merge tolerance, so
/// UTM-scale segments still merge crossings that differ only by rounding.
const XY_TOL_REL: f64 = 1e-12;

/// Refines polylines against one grid's cells.
pub struct PolylineSegmenter<'a> {
    grid: &'a UnstructuredGrid,
    locator: &'a SpatialLocator,
}

impl<'a> PolylineSegmenter<'a> {
    pub fn new(grid: &'a UnstructuredGrid, locator: &'a SpatialLocator) -> Self {
        Self { grid, locator }
    }

    /// Ordered sample locations along `polyline`.
    ///
    /// Per segment: collect crossings with the interpolation edges of every
    /// nearby cell, sort them along the segment, merge coincident ones,
    /// insert a midpoint between adjacent crossings whose middle lies
    /// outside every cell, and emit start, crossings, end. A candidate
    /// within merge tolerance of the previously emitted sample is dropped,
    /// which collapses joints between consecutive segments. Locations
    /// outside the mesh are kept (they extract as no-data); z is
    /// interpolated along each segment. Degenerate input is tolerated: an
    /// empty polyline yields nothing, a single vertex yields itself.
    pub fn segment(&self, polyline: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let mut out = Vec::new();
        match polyline {
            [] => {}
            [p] => out.push(*p),
            _ => {
                for (a, b) in polyline.iter().copied().tuple_windows() {
                    self.segment_into(a, b, &mut out);
                }
            }
        }
        out
    }

    fn segment_into(&self, a: [f64; 3], b: [f64; 3], out: &mut Vec<[f64; 3]>) {
        let tol = merge_tolerance(a, b);
        let crossings = self.crossings(a, b, tol);

        let emit = |p: [f64; 3], out: &mut Vec<[f64; 3]>| {
            if out.last().is_none_or(|&last| xy_distance(last, p) > tol) {
                out.push(p);
            }
        };

        emit(a, out);
        for (i, &(t, p)) in crossings.iter().enumerate() {
            if i > 0 {
                let t_mid = 0.5 * (crossings[i - 1].0 + t);
                let mid = lerp(a, b, t_mid);
                if self.locator.find_cell(self.grid, mid).is_none() {
                    emit(mid, out);
                }
            }
            emit(p, out);
        }
        emit(b, out);
    }

    /// Crossings of `a→b` with nearby interpolation edges, sorted along the
    /// segment and merged within `tol`.
    fn crossings(&self, a: [f64; 3], b: [f64; 3], tol: f64) -> Vec<(f64, [f64; 3])> {
        let min = [a[0].min(b[0]) - tol, a[1].min(b[1]) - tol];
        let max = [a[0].max(b[0]) + tol, a[1].max(b[1]) + tol];
        let mut ts = Vec::new();
        for c in self.locator.cells_in_envelope(min, max) {
            let ring = self.grid.cell_points(c);
            for (i, j) in weights::interpolation_edges(self.grid.cell_type(c), ring.len()) {
                intersect::segment_crossings(a, b, ring[i], ring[j], &mut ts);
            }
        }
        ts.sort_unstable_by(f64::total_cmp);

        let mut crossings: Vec<(f64, [f64; 3])> = Vec::new();
        for t in ts {
            let p = lerp(a, b, t);
            if crossings
                .last()
                .is_none_or(|&(_, last)| xy_distance(last, p) > tol)
            {
                crossings.push((t, p));
            }
        }
        crossings
    }
}

/// Polyline extraction with a fixed scalar location.
///
/// The scalar location is chosen at construction (mirroring how sampling
/// runs are configured once and then fed one time step after another);
/// [`set_scalars`](Self::set_scalars) routes values accordingly. With
/// `DataLocation::Unknown` the extractor stays on the elevation default.
pub struct PolylineExtractor<'g> {
    extractor: PointExtractor<'g>,
    scalar_location: DataLocation,
    locations: Vec<[f64; 3]>,
}

impl<'g> PolylineExtractor<'g> {
    /// Build the extractor and its spatial index for `grid`.
    pub fn new(grid: &'g UnstructuredGrid, scalar_location: DataLocation) -> Self {
        Self {
            extractor: PointExtractor::new(grid),
            scalar_location,
            locations: Vec::new(),
        }
    }

    /// Replace the scalars (values plus activity) for the next extraction.
    /// Values go to the location fixed at construction.
    pub fn set_scalars(
        &mut self,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) {
        match self.scalar_location {
            DataLocation::Points => {
                self.extractor
                    .set_point_scalars(values, activity, activity_location)
            }
            DataLocation::Cells => {
                self.extractor
                    .set_cell_scalars(values, activity, activity_location)
            }
            DataLocation::Unknown => {
                log::warn!("scalar location unknown; keeping the elevation default");
            }
        }
    }

    /// Segment `polyline` and remember the refined sample locations.
    pub fn set_polyline(&mut self, polyline: &[[f64; 3]]) {
        let segmenter = PolylineSegmenter::new(self.extractor.grid(), self.extractor.locator());
        self.locations = segmenter.segment(polyline);
    }

    /// The refined sample locations of the current polyline.
    #[inline]
    pub fn locations(&self) -> &[[f64; 3]] {
        &self.locations
    }

    /// Extract the current scalars at the refined locations. Repeated calls
    /// with unchanged inputs return identical output.
    pub fn extract(&self) -> ExtractionResult {
        self.extractor.extract(&self.locations)
    }

    /// See [`PointExtractor::set_no_data_value`].
    pub fn set_no_data_value(&mut self, no_data_value: f64) {
        self.extractor.set_no_data_value(no_data_value);
    }

    /// See [`PointExtractor::set_use_idw_for_point_data`].
    pub fn set_use_idw_for_point_data(&mut self, use_idw: bool) {
        self.extractor.set_use_idw_for_point_data(use_idw);
    }
}

fn merge_tolerance(a: [f64; 3], b: [f64; 3]) -> f64 {
    XY_TOL.max(XY_TOL_REL * f64::hypot(b[0] - a[0], b[1] - a[1]))
}

fn xy_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    f64::hypot(a[0] - b[0], a[1] - b[1])
}

fn lerp(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    [
        a[0] + t * (b[0] - a[0]),
        a[1] + t * (b[1] - a[1]),
        a[2] + t * (b[2] - a[2]),
    ]
}
