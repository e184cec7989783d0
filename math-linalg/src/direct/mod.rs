//! Direct solvers for linear systems
//!
//! This module provides direct (non-iterative) factorizations:
//! - [`Lu`]: LU decomposition with partial pivoting
//! - [`lu_solve`]: one-shot factor and solve

mod lu;

pub use lu::{Lu, lu_solve};
