//! Dense linear algebra with pluggable compute providers
//!
//! This crate provides column-major dense vectors and matrices whose arithmetic
//! runs on a selectable compute backend, with size-aware parallel dispatch and
//! an LU factorization for determinants, inverses and linear solves.
//!
//! # Features
//!
//! - **Containers**: [`Vector`] and [`Matrix`] with fixed shape and owned storage
//! - **Providers**: pure-Rust [`NativeProvider`]; MKL and CUDA tags are modelled
//!   but report `NotSupported` in this build
//! - **Dispatch**: matrix products split across rayon workers once an operand
//!   reaches 32 rows or columns
//! - **Direct Solvers**: LU decomposition with partial pivoting
//! - **Generic Scalar Types**: Works with Complex64, Complex32, f64, f32
//! - **ndarray interop**: conversion to and from `Array1`/`Array2`
//!
//! # Example
//!
//! ```
//! use math_linalg::{ComputeContext, Matrix, Vector};
//!
//! let a = Matrix::from_rows(&[[4.0_f64, 7.0], [2.0, 6.0]])?;
//! let b = Vector::from_slice(&[1.0, 2.0]);
//!
//! let x = a.lu()?.solve_vector(&b)?;
//! let ax = a.multiply_vector(&x)?;
//! assert!((ax[0] - 1.0).abs() < 1e-12);
//!
//! // Explicit context: sequential kernels only
//! let ctx = ComputeContext::sequential();
//! let a2 = a.multiply_with(&ctx, &a)?;
//! assert_eq!(a2.shape(), a.shape());
//! # Ok::<(), math_linalg::LinalgError>(())
//! ```

pub mod blas_helpers;
pub mod context;
pub mod direct;
pub mod dispatch;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod provider;
pub mod traits;
pub mod vector;

// Re-export main types
pub use context::{ComputeConfig, ComputeContext};
pub use error::{ArgumentReason, LinalgError, NotSupportedReason, Result, Shape};
pub use matrix::Matrix;
pub use traits::{Scalar, ZERO_TOLERANCE};
pub use vector::Vector;

// Re-export compute backends
pub use dispatch::{DispatchPolicy, MAX_PARALLELISM, MIN_PARALLELISM, PARALLEL_ORDER_THRESHOLD};
pub use provider::{
    CudaProvider, LinearAlgebraProvider, MklProvider, NativeProvider, Provider, ProviderKind,
    Transpose, available_providers, is_available,
};

// Re-export direct solvers
pub use direct::{Lu, lu_solve};
