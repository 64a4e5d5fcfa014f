//! Geometry utilities for mesh-extract.
//!
//! This module provides the per-cell containment and interpolation-weight
//! computations plus the segment intersection primitive the polyline
//! segmenter is built on.

pub mod intersect;
pub mod weights;
