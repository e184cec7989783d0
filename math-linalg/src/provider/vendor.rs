//! Vendor backend placeholders
//!
//! MKL and CUDA are selectable by tag but no native bindings are linked, so
//! their probes report unavailable and every kernel fails with
//! [`NotSupportedReason::Backend`].

use super::{LinearAlgebraProvider, ProviderKind, Transpose};
use crate::error::{LinalgError, NotSupportedReason, Result};
use crate::traits::Scalar;

fn unavailable<R>(kind: ProviderKind) -> Result<R> {
    Err(LinalgError::NotSupported(NotSupportedReason::Backend(kind)))
}

macro_rules! placeholder_provider {
    ($name:ident, $kind:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            /// Whether the backend library can be used from this build
            pub fn probe() -> bool {
                false
            }
        }

        impl<T: Scalar> LinearAlgebraProvider<T> for $name {
            fn kind(&self) -> ProviderKind {
                $kind
            }

            fn array_multiply(&self, _scalar: T, _x: &[T], _result: &mut [T]) -> Result<()> {
                unavailable($kind)
            }

            fn array_add_scalar(&self, _scalar: T, _x: &[T], _result: &mut [T]) -> Result<()> {
                unavailable($kind)
            }

            fn array_add(&self, _x: &[T], _y: &[T], _result: &mut [T]) -> Result<()> {
                unavailable($kind)
            }

            fn array_subtract(&self, _x: &[T], _y: &[T], _result: &mut [T]) -> Result<()> {
                unavailable($kind)
            }

            fn vector_dot_product(&self, _x: &[T], _y: &[T]) -> Result<T> {
                unavailable($kind)
            }

            fn matrix_multiply(
                &self,
                _rows_x: usize,
                _cols_x: usize,
                _x: &[T],
                _rows_y: usize,
                _cols_y: usize,
                _y: &[T],
                _result: &mut [T],
            ) -> Result<()> {
                unavailable($kind)
            }

            fn gemm(
                &self,
                _alpha: T,
                _rows_x: usize,
                _cols_x: usize,
                _x: &[T],
                _transpose_x: Transpose,
                _rows_y: usize,
                _cols_y: usize,
                _y: &[T],
                _transpose_y: Transpose,
                _beta: T,
                _result: &mut [T],
            ) -> Result<()> {
                unavailable($kind)
            }
        }
    };
}

placeholder_provider!(
    MklProvider,
    ProviderKind::Mkl,
    "Intel MKL provider (vendor BLAS), not linked in this build"
);
placeholder_provider!(
    CudaProvider,
    ProviderKind::Cuda,
    "Nvidia CUDA provider, not linked in this build"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probes_report_unavailable() {
        assert!(!MklProvider::probe());
        assert!(!CudaProvider::probe());
    }

    #[test]
    fn test_cuda_gemm_not_supported() {
        let mut out = [0.0_f32; 1];
        let err = CudaProvider
            .gemm(
                1.0,
                1,
                1,
                &[1.0],
                Transpose::NoTranspose,
                1,
                1,
                &[1.0],
                Transpose::NoTranspose,
                0.0,
                &mut out,
            )
            .unwrap_err();
        assert_eq!(
            err,
            LinalgError::NotSupported(NotSupportedReason::Backend(ProviderKind::Cuda))
        );
    }

    #[test]
    fn test_mkl_dot_not_supported() {
        let result = LinearAlgebraProvider::<f64>::vector_dot_product(&MklProvider, &[1.0], &[2.0]);
        assert!(result.unwrap_err().is_not_supported());
    }
}
