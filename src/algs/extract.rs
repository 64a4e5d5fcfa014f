//! Point extraction: locate, fetch, interpolate, no-data policy.
//!
//! [`PointExtractor`] owns the per-grid machinery (spatial index, current
//! scalar field, tunables) and evaluates arbitrary query locations against
//! it. Extraction never fails: a location outside the mesh, inside only
//! inactive cells, or queried while the scalar array length is wrong simply
//! reports the configured no-data value. Scalars and tunables may be
//! replaced between calls; the spatial index is built once per grid.

use crate::algs::locate::SpatialLocator;
use crate::data::scalars::{DataLocation, ScalarField};
use crate::geometry::weights;
use crate::mesh_error::MeshExtractError;
use crate::topology::grid::UnstructuredGrid;
use serde::{Deserialize, Serialize};

/// Extraction tunables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Reported for unresolvable locations; NaN by default.
    pub no_data_value: f64,
    /// Interpolate cell-located scalars through inverse-distance-weighted
    /// point values instead of treating them as constant per cell.
    pub use_idw_for_point_data: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            no_data_value: f64::NAN,
            use_idw_for_point_data: false,
        }
    }
}

/// Output of one extraction call, parallel to the query locations.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionResult {
    /// Interpolated value (or the no-data value) per location.
    pub values: Vec<f64>,
    /// Resolved cell per location; `None` when no active cell contains it.
    pub cells: Vec<Option<usize>>,
}

/// Scalar field extraction at arbitrary query points of one grid.
pub struct PointExtractor<'g> {
    grid: &'g UnstructuredGrid,
    locator: SpatialLocator,
    field: ScalarField,
    config: ExtractionConfig,
}

impl<'g> PointExtractor<'g> {
    /// Build the extractor (and its spatial index) for a grid. Until
    /// scalars are set, the field defaults to point elevations (z).
    pub fn new(grid: &'g UnstructuredGrid) -> Self {
        Self {
            grid,
            locator: SpatialLocator::build(grid),
            field: ScalarField::elevation(grid),
            config: ExtractionConfig::default(),
        }
    }

    /// The grid this extractor queries.
    #[inline]
    pub fn grid(&self) -> &'g UnstructuredGrid {
        self.grid
    }

    /// The shared spatial index.
    #[inline]
    pub fn locator(&self) -> &SpatialLocator {
        &self.locator
    }

    /// Current tunables.
    #[inline]
    pub fn config(&self) -> ExtractionConfig {
        self.config
    }

    /// Install point-located scalars. `activity_location` describes the
    /// activity array (points or cells), independent of the values.
    ///
    /// A wrong-length value array puts the field in the fail-soft state:
    /// every query reports no-data until the scalars are replaced.
    pub fn set_point_scalars(
        &mut self,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) {
        self.field = ScalarField::from_point_values(self.grid, values, activity, activity_location);
    }

    /// Install cell-located scalars; activity handling as in
    /// [`set_point_scalars`](Self::set_point_scalars).
    pub fn set_cell_scalars(
        &mut self,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) {
        self.field = ScalarField::from_cell_values(self.grid, values, activity, activity_location);
    }

    /// Install scalars at a runtime-chosen location.
    ///
    /// # Errors
    /// Returns `Err(InvalidDataLocation)` for `DataLocation::Unknown`; the
    /// current field is left untouched.
    pub fn set_scalars(
        &mut self,
        location: DataLocation,
        values: Vec<f64>,
        activity: &[bool],
        activity_location: DataLocation,
    ) -> Result<(), MeshExtractError> {
        match location {
            DataLocation::Points => {
                self.set_point_scalars(values, activity, activity_location);
                Ok(())
            }
            DataLocation::Cells => {
                self.set_cell_scalars(values, activity, activity_location);
                Ok(())
            }
            DataLocation::Unknown => Err(MeshExtractError::InvalidDataLocation(
                "unknown".to_string(),
            )),
        }
    }

    /// Value reported when a location cannot be resolved.
    pub fn set_no_data_value(&mut self, no_data_value: f64) {
        self.config.no_data_value = no_data_value;
    }

    /// Current no-data value.
    #[inline]
    pub fn no_data_value(&self) -> f64 {
        self.config.no_data_value
    }

    /// Toggle inverse-distance weighting for cell-located scalars.
    pub fn set_use_idw_for_point_data(&mut self, use_idw: bool) {
        self.config.use_idw_for_point_data = use_idw;
    }

    /// Extract values at `locations`.
    ///
    /// Per location: find the first *active* containing cell (ascending
    /// cell order, so boundary ties are deterministic), interpolate the
    /// field inside it, and report the cell index alongside the value.
    /// Locations that resolve to no cell, and every location while the
    /// field is invalid, report the no-data value. The output is returned
    /// by value; no state survives between calls.
    pub fn extract(&self, locations: &[[f64; 3]]) -> ExtractionResult {
        #[cfg(feature = "rayon")]
        let (values, cells) = {
            use rayon::prelude::*;
            locations.par_iter().map(|&l| self.resolve(l)).unzip()
        };
        #[cfg(not(feature = "rayon"))]
        let (values, cells) = locations.iter().map(|&l| self.resolve(l)).unzip();
        ExtractionResult { values, cells }
    }

    /// Single-location variant of [`extract`](Self::extract).
    pub fn extract_at(&self, location: [f64; 3]) -> f64 {
        self.resolve(location).0
    }

    fn resolve(&self, location: [f64; 3]) -> (f64, Option<usize>) {
        let cell = self.locate_active_cell(location);
        let value = match cell {
            Some(c) if self.field.is_valid() => self
                .value_in_cell(c, location)
                .unwrap_or(self.config.no_data_value),
            _ => self.config.no_data_value,
        };
        (value, cell)
    }

    /// First containing cell that is active; containing-but-inactive cells
    /// are skipped, and a location inside only inactive cells stays
    /// unresolved.
    fn locate_active_cell(&self, location: [f64; 3]) -> Option<usize> {
        self.locator
            .containing_cells(self.grid, location)
            .into_iter()
            .find(|&c| self.field.cell_is_active(c))
    }

    fn value_in_cell(&self, c: usize, location: [f64; 3]) -> Option<f64> {
        // Constant per cell when cell data is used without IDW: every
        // vertex slot broadcasts the cell's own value.
        if self.field.location() == DataLocation::Cells && !self.config.use_idw_for_point_data {
            let (value, active) = self.field.value_at_cell_vertex(self.grid, c, 0)?;
            return active.then_some(value);
        }
        let ring = self.grid.cell_points(c);
        match weights::interpolation_weights(self.grid.cell_type(c), &ring, location) {
            Ok(Some(w)) => {
                let mut acc = 0.0;
                for (wi, &v) in w.iter().zip(self.grid.cell_vertices(c)) {
                    let value = self.field.value_at_point(
                        self.grid,
                        v,
                        self.config.use_idw_for_point_data,
                    )?;
                    acc += wi * value;
                }
                Some(acc)
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("interpolation failed in cell {c}: {e}");
                None
            }
        }
    }
}


#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn config_json_roundtrip() {
        // a finite sentinel; JSON has no encoding for NaN
        let cfg = ExtractionConfig {
            no_data_value: -999.0,
            use_idw_for_point_data: true,
        };
        let s = serde_json::to_string(&cfg).unwrap();
        let back: ExtractionConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(cfg, back);
    }
}
