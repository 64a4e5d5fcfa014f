//! Re-export public algorithms.

pub mod extract;
pub mod locate;
pub mod polyline;
pub mod triangulate;

pub use extract::{ExtractionConfig, ExtractionResult, PointExtractor};
pub use locate::SpatialLocator;
pub use polyline::{PolylineExtractor, PolylineSegmenter};
pub use triangulate::triangulate;
