//! Scalar field storage: values located at points or cells, with activity.
//!
//! A [`ScalarField`] binds a value array to the shape of a grid at
//! construction time. Activity, however it was supplied, is normalized to a
//! per-cell mask immediately:
//! - cell-located activity is used as-is,
//! - point-located activity marks a cell inactive when *any* of its
//!   vertices is inactive,
//! - a wrong-length activity array is ignored (all cells active).
//!
//! A wrong-length *value* array is different: it clears the field's `valid`
//! flag, and every downstream query degrades to no-data until the scalars
//! are replaced. Neither mismatch is an error value; misconfigured inputs
//! fail soft.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshExtractError;
use crate::topology::grid::UnstructuredGrid;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Distance below which a point is considered to sit on a cell centroid.
const DISTANCE_TOL: f64 = 1e-9;

/// Where a scalar or activity array lives on the grid.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum DataLocation {
    /// One value per grid point.
    Points,
    /// One value per grid cell.
    Cells,
    /// Location not specified.
    #[default]
    Unknown,
}

impl FromStr for DataLocation {
    type Err = MeshExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "points" => Ok(DataLocation::Points),
            "cells" => Ok(DataLocation::Cells),
            "unknown" => Ok(DataLocation::Unknown),
            _ => Err(MeshExtractError::InvalidDataLocation(s.to_string())),
        }
    }
}

/// Scalar values bound to a grid, plus a normalized per-cell activity mask.
///
/// # Invariants
///
/// - `location` is `Points` or `Cells`, never `Unknown`.
/// - `valid` is true iff `values.len()` matches the grid count for
///   `location` (captured at construction).
/// - `cell_activity` is empty (all active) or has one entry per cell.
#[derive(Clone, Debug)]
pub struct ScalarField {
    location: DataLocation,
    values: Vec<f64>,
    cell_activity: Vec<bool>,
    point_count: usize,
    cell_count: usize,
    valid: bool,
}

impl ScalarField {
    /// The default field: point z-coordinates, everything active.
    pub fn elevation(grid: &UnstructuredGrid) -> Self {
        let field = Self {
            location: DataLocation::Points,
            values: grid.points().iter().map(|p| p[2]).collect(),
            cell_activity: Vec::new(),
            point_count: grid.point_count(),
            cell_count: grid.cell_count(),
            valid: true,
        };
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        field.debug_assert_invariants();
        field
    }

    /// Point-located scalars. `activity_location` describes the activity
    /// array, which may sit at points or cells independently of the values.
    pub fn from_point_values(
        grid: &UnstructuredGrid,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) -> Self {
        Self::build(grid, DataLocation::Points, values, activity, activity_location)
    }

    /// Cell-located scalars; activity handling as in
    /// [`from_point_values`](Self::from_point_values).
    pub fn from_cell_values(
        grid: &UnstructuredGrid,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) -> Self {
        Self::build(grid, DataLocation::Cells, values, activity, activity_location)
    }

    fn build(
        grid: &UnstructuredGrid,
        location: DataLocation,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) -> Self {
        let expected = match location {
            DataLocation::Points => grid.point_count(),
            _ => grid.cell_count(),
        };
        let valid = values.len() == expected;
        if !valid {
            log::debug!(
                "scalar array length {} does not match {expected} {location:?}; \
                 all queries will report no-data until scalars are replaced",
                values.len()
            );
        }
        let field = Self {
            location,
            values,
            cell_activity: normalize_activity(grid, activity, activity_location),
            point_count: grid.point_count(),
            cell_count: grid.cell_count(),
            valid,
        };
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        field.debug_assert_invariants();
        field
    }

    /// Where the values live.
    #[inline]
    pub fn location(&self) -> DataLocation {
        self.location
    }

    /// False when the value array length disagrees with the grid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Activity of cell `c`; an empty mask means every cell is active.
    #[inline]
    pub fn cell_is_active(&self, c: usize) -> bool {
        self.cell_activity.is_empty() || self.cell_activity[c]
    }

    /// Direct value at a grid point (point-located fields only).
    #[inline]
    pub fn point_value(&self, p: usize) -> Option<f64> {
        if self.location != DataLocation::Points || !self.valid {
            return None;
        }
        self.values.get(p).copied()
    }

    /// Direct value at a cell (cell-located fields only).
    #[inline]
    pub fn cell_value(&self, c: usize) -> Option<f64> {
        if self.location != DataLocation::Cells || !self.valid {
            return None;
        }
        self.values.get(c).copied()
    }

    /// Value and activity seen from vertex slot `local_vertex` of cell `c`.
    ///
    /// Cell-located fields broadcast the cell's own value and activity to
    /// every vertex slot, which is what makes non-IDW extraction piecewise
    /// constant per cell. Point-located fields pair the slot's point value
    /// with the cell's activity. `None` for an invalid field or an
    /// out-of-range cell or slot.
    pub fn value_at_cell_vertex(
        &self,
        grid: &UnstructuredGrid,
        c: usize,
        local_vertex: usize,
    ) -> Option<(f64, bool)> {
        if !self.valid || c >= self.cell_count {
            return None;
        }
        let p = *grid.cell_vertices(c).get(local_vertex)?;
        let value = match self.location {
            DataLocation::Points => self.values.get(p).copied()?,
            DataLocation::Cells => self.values.get(c).copied()?,
            DataLocation::Unknown => return None,
        };
        Some((value, self.cell_is_active(c)))
    }

    /// Value at grid point `p`.
    ///
    /// Point-located fields read the array directly. Cell-located fields
    /// have no well-defined point value unless `use_idw` is set, in which
    /// case the value is inverse-distance weighted (weight `1/d`) over the
    /// centroids of the *active* cells incident to `p`; a point within
    /// tolerance of a centroid takes that cell's value exactly. `None` when
    /// the point has no active incident cell or the field is invalid.
    pub fn value_at_point(
        &self,
        grid: &UnstructuredGrid,
        p: usize,
        use_idw: bool,
    ) -> Option<f64> {
        match self.location {
            DataLocation::Points => self.point_value(p),
            DataLocation::Cells if use_idw => self.idw_point_value(grid, p),
            _ => None,
        }
    }

    fn idw_point_value(&self, grid: &UnstructuredGrid, p: usize) -> Option<f64> {
        if !self.valid {
            return None;
        }
        let at = grid.point(p);
        let mut num = 0.0;
        let mut den = 0.0;
        for &c in grid.cells_of_point(p) {
            if !self.cell_is_active(c) {
                continue;
            }
            let centroid = grid.cell_centroid(c);
            let d = f64::hypot(at[0] - centroid[0], at[1] - centroid[1]);
            if d <= DISTANCE_TOL {
                return Some(self.values[c]);
            }
            let w = 1.0 / d;
            num += w * self.values[c];
            den += w;
        }
        (den > 0.0).then(|| num / den)
    }
}

/// Normalize an activity array to a per-cell mask (empty = all active).
fn normalize_activity(
    grid: &UnstructuredGrid,
    activity: &[bool],
    activity_location: DataLocation,
) -> Vec<bool> {
    if activity.is_empty() {
        return Vec::new();
    }
    match activity_location {
        DataLocation::Cells => {
            if activity.len() == grid.cell_count() {
                activity.to_vec()
            } else {
                log::warn!(
                    "cell activity length {} does not match {} cells; ignoring activity",
                    activity.len(),
                    grid.cell_count()
                );
                Vec::new()
            }
        }
        DataLocation::Points => {
            if activity.len() == grid.point_count() {
                (0..grid.cell_count())
                    .map(|c| grid.cell_vertices(c).iter().all(|&v| activity[v]))
                    .collect()
            } else {
                log::warn!(
                    "point activity length {} does not match {} points; ignoring activity",
                    activity.len(),
                    grid.point_count()
                );
                Vec::new()
            }
        }
        DataLocation::Unknown => Vec::new(),
    }
}

impl DebugInvariants for ScalarField {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "ScalarField invalid");
    }

    fn validate_invariants(&self) -> Result<(), MeshExtractError> {
        let fail = |detail: String| MeshExtractError::InvariantViolation {
            context: "ScalarField",
            detail,
        };
        let expected = match self.location {
            DataLocation::Points => self.point_count,
            DataLocation::Cells => self.cell_count,
            DataLocation::Unknown => {
                return Err(fail("field location must be Points or Cells".into()));
            }
        };
        if self.valid != (self.values.len() == expected) {
            return Err(fail(format!(
                "valid flag {} disagrees with {} values for {expected} {:?}",
                self.valid,
                self.values.len(),
                self.location
            )));
        }
        if !self.cell_activity.is_empty() && self.cell_activity.len() != self.cell_count {
            return Err(fail(format!(
                "activity mask length {} vs {} cells",
                self.cell_activity.len(),
                self.cell_count
            )));
        }
        Ok(())
    }
}
