//! Pure-Rust compute provider
//!
//! Kernels validate lengths and shapes only; callers validate everything else.
//! Matrix products split the left operand's rows into contiguous chunks when the
//! [`DispatchPolicy`] allows it. Each chunk produces its own block of output rows,
//! so every output row is written by exactly one task and results do not depend
//! on scheduling.

use super::{LinearAlgebraProvider, ProviderKind, Transpose};
use crate::blas_helpers::{column_major_offset, dot, gather_column, gather_row, scale_inplace};
use crate::dispatch::DispatchPolicy;
use crate::error::{ArgumentReason, LinalgError, Result, Shape};
use crate::parallel::parallel_map_indexed;
use crate::traits::Scalar;
use std::ops::Range;

/// Pure-Rust provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeProvider {
    policy: DispatchPolicy,
}

impl NativeProvider {
    /// Create a provider dispatching by `policy`
    pub fn new(policy: DispatchPolicy) -> Self {
        Self { policy }
    }

    /// The dispatch policy in use
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }
}

fn check_len(name: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(LinalgError::illegal(name, ArgumentReason::LengthMismatch));
    }
    Ok(())
}

/// Row block `rows` of `op(X) · op(Y)`, laid out row by row (`block[r * n + j]`).
#[allow(clippy::too_many_arguments)]
fn product_rows<T: Scalar>(
    rows: Range<usize>,
    rows_x: usize,
    cols_x: usize,
    x: &[T],
    transpose_x: Transpose,
    rows_y: usize,
    cols_y: usize,
    y: &[T],
    transpose_y: Transpose,
) -> Vec<T> {
    let inner = transpose_x.apply(rows_x, cols_x).1;
    let n = transpose_y.apply(rows_y, cols_y).1;
    let count = rows.len();

    let mut x_rows = vec![T::zero(); count * inner];
    for (local, i) in rows.enumerate() {
        let slot = &mut x_rows[local * inner..(local + 1) * inner];
        gather_row(rows_x, cols_x, x, transpose_x, i, slot);
    }

    let mut block = vec![T::zero(); count * n];
    let mut y_col = vec![T::zero(); inner];
    for j in 0..n {
        gather_column(rows_y, cols_y, y, transpose_y, j, &mut y_col);
        for local in 0..count {
            let x_row = &x_rows[local * inner..(local + 1) * inner];
            block[local * n + j] = dot(x_row, &y_col);
        }
    }
    block
}

impl<T: Scalar> LinearAlgebraProvider<T> for NativeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Native
    }

    fn array_multiply(&self, scalar: T, x: &[T], result: &mut [T]) -> Result<()> {
        check_len("result", result.len(), x.len())?;
        if scalar.is_zero() {
            result.fill(T::zero());
        } else if scalar.is_one() {
            result.copy_from_slice(x);
        } else {
            for (r, xi) in result.iter_mut().zip(x.iter()) {
                *r = scalar * *xi;
            }
        }
        Ok(())
    }

    fn array_add_scalar(&self, scalar: T, x: &[T], result: &mut [T]) -> Result<()> {
        check_len("result", result.len(), x.len())?;
        for (r, xi) in result.iter_mut().zip(x.iter()) {
            *r = scalar + *xi;
        }
        Ok(())
    }

    fn array_add(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<()> {
        check_len("y", y.len(), x.len())?;
        check_len("result", result.len(), x.len())?;
        for ((r, xi), yi) in result.iter_mut().zip(x.iter()).zip(y.iter()) {
            *r = *xi + *yi;
        }
        Ok(())
    }

    fn array_subtract(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<()> {
        check_len("y", y.len(), x.len())?;
        check_len("result", result.len(), x.len())?;
        for ((r, xi), yi) in result.iter_mut().zip(x.iter()).zip(y.iter()) {
            *r = *xi - *yi;
        }
        Ok(())
    }

    fn vector_dot_product(&self, x: &[T], y: &[T]) -> Result<T> {
        check_len("y", y.len(), x.len())?;
        Ok(dot(x, y))
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
        if cols_x != rows_y || result.len() != rows_x * cols_y {
            return Err(LinalgError::mismatch(
                Shape::new(rows_x, cols_x),
                Shape::new(rows_y, cols_y),
            ));
        }
        LinearAlgebraProvider::<T>::gemm(
            self,
            T::one(),
            rows_x,
            cols_x,
            x,
            Transpose::NoTranspose,
            rows_y,
            cols_y,
            y,
            Transpose::NoTranspose,
            T::zero(),
            result,
        )
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
        check_len("x", x.len(), rows_x * cols_x)?;
        check_len("y", y.len(), rows_y * cols_y)?;

        let (m, inner) = transpose_x.apply(rows_x, cols_x);
        let (inner_y, n) = transpose_y.apply(rows_y, cols_y);
        if inner != inner_y || result.len() != m * n {
            return Err(LinalgError::mismatch(
                Shape::new(m, inner),
                Shape::new(inner_y, n),
            ));
        }

        scale_inplace(result, beta);
        if alpha.is_zero() || m == 0 || n == 0 {
            return Ok(());
        }

        let compute = |rows: Range<usize>| {
            product_rows(
                rows,
                rows_x,
                cols_x,
                x,
                transpose_x,
                rows_y,
                cols_y,
                y,
                transpose_y,
            )
        };

        let partitions = if self.policy.should_parallelize_product(m, inner, inner_y, n) {
            self.policy.partition_rows(m)
        } else {
            vec![0..m]
        };
        log::debug!(
            "gemm {}x{}x{}: {} row chunk(s)",
            m,
            inner,
            n,
            partitions.len()
        );

        let blocks: Vec<Vec<T>> = if partitions.len() > 1 {
            parallel_map_indexed(partitions.len(), |p| compute(partitions[p].clone()))
        } else {
            partitions.iter().map(|rows| compute(rows.clone())).collect()
        };

        for (rows, block) in partitions.iter().zip(blocks.iter()) {
            for (local, i) in rows.clone().enumerate() {
                for j in 0..n {
                    result[column_major_offset(m, i, j)] += alpha * block[local * n + j];
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn provider() -> NativeProvider {
        NativeProvider::new(DispatchPolicy::sequential())
    }

    /// Column-major data of a `rows × cols` matrix with entry `f(r, c)`
    fn column_major(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Vec<f64> {
        let mut data = vec![0.0; rows * cols];
        for c in 0..cols {
            for r in 0..rows {
                data[c * rows + r] = f(r, c);
            }
        }
        data
    }

    #[test]
    fn test_array_multiply_fast_paths() {
        let p = provider();
        let x = [1.0_f64, -2.0, 3.0];
        let mut out = [f64::NAN; 3];

        p.array_multiply(0.0, &x, &mut out).unwrap();
        assert_eq!(out, [0.0, 0.0, 0.0]);

        p.array_multiply(1.0, &x, &mut out).unwrap();
        assert_eq!(out, x);

        p.array_multiply(-2.0, &x, &mut out).unwrap();
        assert_eq!(out, [-2.0, 4.0, -6.0]);
    }

    #[test]
    fn test_elementwise_kernels() {
        let p = provider();
        let x = [1.0_f64, 2.0];
        let y = [10.0_f64, 20.0];
        let mut out = [0.0; 2];

        p.array_add(&x, &y, &mut out).unwrap();
        assert_eq!(out, [11.0, 22.0]);
        p.array_subtract(&x, &y, &mut out).unwrap();
        assert_eq!(out, [-9.0, -18.0]);
        p.array_add_scalar(0.5, &x, &mut out).unwrap();
        assert_eq!(out, [1.5, 2.5]);
    }

    #[test]
    fn test_dot_product_length_mismatch() {
        let p = provider();
        let err = LinearAlgebraProvider::<f64>::vector_dot_product(&p, &[1.0, 2.0], &[1.0])
            .unwrap_err();
        assert_eq!(
            err,
            LinalgError::IllegalArgument {
                name: "y",
                reason: ArgumentReason::LengthMismatch
            }
        );
    }

    #[test]
    fn test_dot_product_complex_is_unconjugated() {
        let p = provider();
        let x = [Complex64::new(0.0, 1.0)];
        let d = p.vector_dot_product(&x, &x).unwrap();
        assert_relative_eq!(d.re, -1.0);
        assert_relative_eq!(d.im, 0.0);
    }

    #[test]
    fn test_matrix_multiply_small() {
        // [1 2] [5 6]   [19 22]
        // [3 4] [7 8] = [43 50]
        let a = [1.0_f64, 3.0, 2.0, 4.0];
        let b = [5.0_f64, 7.0, 6.0, 8.0];
        let mut c = [0.0; 4];
        provider().matrix_multiply(2, 2, &a, 2, 2, &b, &mut c).unwrap();
        assert_eq!(c, [19.0, 43.0, 22.0, 50.0]);
    }

    #[test]
    fn test_matrix_multiply_dimension_mismatch() {
        let a = [0.0_f64; 6];
        let b = [0.0_f64; 6];
        let mut c = [0.0; 4];
        let err = provider()
            .matrix_multiply(2, 3, &a, 2, 3, &b, &mut c)
            .unwrap_err();
        assert_eq!(
            err,
            LinalgError::mismatch(Shape::new(2, 3), Shape::new(2, 3))
        );
    }

    #[test]
    fn test_gemm_transposed_operands() {
        // A is 3×2, B is 3×2: Aᵗ·B is 2×2
        let a = column_major(3, 2, |r, c| (r + 2 * c) as f64);
        let b = column_major(3, 2, |r, c| (r * c + 1) as f64);
        let mut c = [0.0_f64; 4];
        provider()
            .gemm(
                1.0,
                3,
                2,
                &a,
                Transpose::Transpose,
                3,
                2,
                &b,
                Transpose::NoTranspose,
                0.0,
                &mut c,
            )
            .unwrap();

        for i in 0..2 {
            for j in 0..2 {
                let expected: f64 = (0..3).map(|k| a[i * 3 + k] * b[j * 3 + k]).sum();
                assert_relative_eq!(c[j * 2 + i], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_gemm_beta_zero_clears_stale_values() {
        let a = [1.0_f64, 0.0, 0.0, 1.0];
        let b = [2.0_f64, 3.0, 4.0, 5.0];
        let mut c = [f64::NAN, f64::INFINITY, f64::NAN, 7.0];
        provider()
            .gemm(
                1.0,
                2,
                2,
                &a,
                Transpose::NoTranspose,
                2,
                2,
                &b,
                Transpose::NoTranspose,
                0.0,
                &mut c,
            )
            .unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn test_gemm_alpha_zero_only_scales() {
        let a = [f64::NAN; 4];
        let b = [f64::NAN; 4];
        let mut c = [1.0_f64, 2.0, 3.0, 4.0];
        provider()
            .gemm(
                0.0,
                2,
                2,
                &a,
                Transpose::NoTranspose,
                2,
                2,
                &b,
                Transpose::NoTranspose,
                3.0,
                &mut c,
            )
            .unwrap();
        assert_eq!(c, [3.0, 6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_gemm_accumulates_with_beta() {
        let a = [1.0_f64, 0.0, 0.0, 1.0];
        let b = [1.0_f64, 1.0, 1.0, 1.0];
        let mut c = [1.0_f64, 1.0, 1.0, 1.0];
        provider()
            .gemm(
                2.0,
                2,
                2,
                &a,
                Transpose::NoTranspose,
                2,
                2,
                &b,
                Transpose::NoTranspose,
                1.0,
                &mut c,
            )
            .unwrap();
        assert_eq!(c, [3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (m, k, n) = (67, 41, 53);
        let a = column_major(m, k, |r, c| ((r * 7 + c * 3) % 11) as f64 - 5.0);
        let b = column_major(k, n, |r, c| ((r * 5 + c * 13) % 17) as f64 * 0.25);

        let mut sequential = vec![0.0_f64; m * n];
        NativeProvider::new(DispatchPolicy::new(1))
            .matrix_multiply(m, k, &a, k, n, &b, &mut sequential)
            .unwrap();

        let mut parallel = vec![0.0_f64; m * n];
        NativeProvider::new(DispatchPolicy::new(4))
            .matrix_multiply(m, k, &a, k, n, &b, &mut parallel)
            .unwrap();

        for (s, p) in sequential.iter().zip(parallel.iter()) {
            assert_relative_eq!(s, p, epsilon = 1e-12);
        }
    }
}
