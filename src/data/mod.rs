//! Data module: scalar fields and their placement on the grid.

pub mod scalars;

pub use scalars::{DataLocation, ScalarField};
