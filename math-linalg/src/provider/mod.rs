//! Compute providers
//!
//! A provider is a stateless strategy implementing the elementwise and
//! matrix-multiply kernels behind every container operation:
//! - [`NativeProvider`]: pure-Rust kernels, parallel GEMM through rayon
//! - [`MklProvider`], [`CudaProvider`]: vendor placeholders, not usable in this build
//!
//! [`Provider`] is the tagged variant stored in a
//! [`ComputeContext`](crate::context::ComputeContext).

mod native;
mod vendor;

pub use native::NativeProvider;
pub use vendor::{CudaProvider, MklProvider};

use crate::dispatch::DispatchPolicy;
use crate::error::Result;
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag identifying a compute backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Pure-Rust kernels
    #[default]
    Native,
    /// Intel MKL (vendor BLAS)
    Mkl,
    /// Nvidia CUDA
    Cuda,
}

impl ProviderKind {
    /// Every known backend, in preference order
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Native,
        ProviderKind::Mkl,
        ProviderKind::Cuda,
    ];
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Native => "Native",
            ProviderKind::Mkl => "MKL",
            ProviderKind::Cuda => "CUDA",
        };
        f.write_str(name)
    }
}

/// Whether the backend can actually run kernels in this build.
///
/// No vendor bindings are linked, so only [`ProviderKind::Native`] is usable.
pub fn is_available(kind: ProviderKind) -> bool {
    match kind {
        ProviderKind::Native => true,
        ProviderKind::Mkl => MklProvider::probe(),
        ProviderKind::Cuda => CudaProvider::probe(),
    }
}

/// All backends for which [`is_available`] holds
pub fn available_providers() -> Vec<ProviderKind> {
    ProviderKind::ALL
        .into_iter()
        .filter(|kind| is_available(*kind))
        .collect()
}

/// Transposition flag of a GEMM operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transpose {
    /// Use the operand as stored
    #[default]
    NoTranspose,
    /// Use the transpose of the operand
    Transpose,
}

impl Transpose {
    /// Logical `(rows, cols)` of `op(X)` for an operand stored `rows × cols`
    #[inline]
    pub fn apply(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Transpose::NoTranspose => (rows, cols),
            Transpose::Transpose => (cols, rows),
        }
    }
}

/// Kernel contract every backend implements for element type `T`.
///
/// Matrices are passed as column-major slices with explicit dimensions.
/// Output buffers are written in full; kernels never read them except
/// `gemm`, which scales the existing contents by `beta`.
pub trait LinearAlgebraProvider<T: Scalar>: Send + Sync {
    /// Which backend this is
    fn kind(&self) -> ProviderKind;

    /// `result[i] = scalar * x[i]`
    fn array_multiply(&self, scalar: T, x: &[T], result: &mut [T]) -> Result<()>;

    /// `result[i] = scalar + x[i]`
    fn array_add_scalar(&self, scalar: T, x: &[T], result: &mut [T]) -> Result<()>;

    /// `result[i] = x[i] + y[i]`
    fn array_add(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<()>;

    /// `result[i] = x[i] - y[i]`
    fn array_subtract(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<()>;

    /// Σ x[i] · y[i]
    fn vector_dot_product(&self, x: &[T], y: &[T]) -> Result<T>;

    /// `result = X · Y` for `X` (rows_x × cols_x) and `Y` (rows_y × cols_y)
    #[allow(clippy::too_many_arguments)]
    fn matrix_multiply(
        &self,
        rows_x: usize,
        cols_x: usize,
        x: &[T],
        rows_y: usize,
        cols_y: usize,
        y: &[T],
        result: &mut [T],
    ) -> Result<()>;

    /// `result = alpha · op(X) · op(Y) + beta · result`
    #[allow(clippy::too_many_arguments)]
    fn gemm(
        &self,
        alpha: T,
        rows_x: usize,
        cols_x: usize,
        x: &[T],
        transpose_x: Transpose,
        rows_y: usize,
        cols_y: usize,
        y: &[T],
        transpose_y: Transpose,
        beta: T,
        result: &mut [T],
    ) -> Result<()>;

    /// `x[i] = scalar * x[i]`
    fn array_multiply_in_place(&self, scalar: T, x: &mut [T]) -> Result<()> {
        let source = x.to_vec();
        self.array_multiply(scalar, &source, x)
    }

    /// `x[i] = scalar + x[i]`
    fn array_add_scalar_in_place(&self, scalar: T, x: &mut [T]) -> Result<()> {
        let source = x.to_vec();
        self.array_add_scalar(scalar, &source, x)
    }

    /// `x[i] = x[i] + y[i]`
    fn array_add_in_place(&self, x: &mut [T], y: &[T]) -> Result<()> {
        let source = x.to_vec();
        self.array_add(&source, y, x)
    }

    /// `x[i] = x[i] - y[i]`
    fn array_subtract_in_place(&self, x: &mut [T], y: &[T]) -> Result<()> {
        let source = x.to_vec();
        self.array_subtract(&source, y, x)
    }
}

/// Tagged provider held by a compute context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Pure-Rust kernels
    Native(NativeProvider),
    /// Intel MKL placeholder
    Mkl(MklProvider),
    /// CUDA placeholder
    Cuda(CudaProvider),
}

impl Provider {
    /// Build the provider for `kind`. Only the native one uses `policy`.
    pub fn new(kind: ProviderKind, policy: DispatchPolicy) -> Self {
        match kind {
            ProviderKind::Native => Provider::Native(NativeProvider::new(policy)),
            ProviderKind::Mkl => Provider::Mkl(MklProvider),
            ProviderKind::Cuda => Provider::Cuda(CudaProvider),
        }
    }

    /// Backend type tag
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Native(_) => ProviderKind::Native,
            Provider::Mkl(_) => ProviderKind::Mkl,
            Provider::Cuda(_) => ProviderKind::Cuda,
        }
    }

    fn backend<T: Scalar>(&self) -> &dyn LinearAlgebraProvider<T> {
        match self {
            Provider::Native(p) => p,
            Provider::Mkl(p) => p,
            Provider::Cuda(p) => p,
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Native(NativeProvider::default())
    }
}

impl<T: Scalar> LinearAlgebraProvider<T> for Provider {
    fn kind(&self) -> ProviderKind {
        Provider::kind(self)
    }

    fn array_multiply(&self, scalar: T, x: &[T], result: &mut [T]) -> Result<()> {
        self.backend::<T>().array_multiply(scalar, x, result)
    }

    fn array_add_scalar(&self, scalar: T, x: &[T], result: &mut [T]) -> Result<()> {
        self.backend::<T>().array_add_scalar(scalar, x, result)
    }

    fn array_add(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<()> {
        self.backend::<T>().array_add(x, y, result)
    }

    fn array_subtract(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<()> {
        self.backend::<T>().array_subtract(x, y, result)
    }

    fn vector_dot_product(&self, x: &[T], y: &[T]) -> Result<T> {
        self.backend::<T>().vector_dot_product(x, y)
    }

    fn matrix_multiply(
        &self,
        rows_x: usize,
        cols_x: usize,
        x: &[T],
        rows_y: usize,
        cols_y: usize,
        y: &[T],
        result: &mut [T],
    ) -> Result<()> {
        self.backend::<T>()
            .matrix_multiply(rows_x, cols_x, x, rows_y, cols_y, y, result)
    }

    fn gemm(
        &self,
        alpha: T,
        rows_x: usize,
        cols_x: usize,
        x: &[T],
        transpose_x: Transpose,
        rows_y: usize,
        cols_y: usize,
        y: &[T],
        transpose_y: Transpose,
        beta: T,
        result: &mut [T],
    ) -> Result<()> {
        self.backend::<T>().gemm(
            alpha,
            rows_x,
            cols_x,
            x,
            transpose_x,
            rows_y,
            cols_y,
            y,
            transpose_y,
            beta,
            result,
        )
    }
}
