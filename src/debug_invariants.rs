//! Invariant checks for the crate's container types.
//!
//! [`UnstructuredGrid`](crate::topology::grid::UnstructuredGrid) and
//! [`ScalarField`](crate::data::scalars::ScalarField) carry redundant state
//! (CSR ring offsets, point-to-cell incidence, normalized activity masks)
//! that has to stay mutually consistent. Both implement [`DebugInvariants`],
//! and their constructors end with a [`debug_invariants!`] check that is
//! compiled in for debug builds and for release builds with the
//! `check-invariants` feature, and compiled out otherwise.

use crate::mesh_error::MeshExtractError;

/// Structural self-checks for container types.
pub trait DebugInvariants {
    /// Panic if an invariant is broken, in builds where checks are active.
    fn debug_assert_invariants(&self);
    /// Check every invariant, reporting the first violation.
    fn validate_invariants(&self) -> Result<(), MeshExtractError>;
}

/// Run a fallible invariant check, panicking on violation.
///
/// Expands to nothing unless `debug_assertions` or the `check-invariants`
/// feature is active. The first argument is the `Result` to check; the rest
/// becomes the context prefix of the panic message.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
