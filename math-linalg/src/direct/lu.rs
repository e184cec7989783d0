//! LU decomposition
//!
//! Gaussian elimination with partial pivoting on a column-major copy of the
//! input. The unit lower factor and the upper factor share one packed matrix;
//! the separate `lower()`/`upper()` matrices are built on first access.

use crate::error::{LinalgError, NotSupportedReason, Result, Shape};
use crate::matrix::Matrix;
use crate::traits::Scalar;
use crate::vector::Vector;
use num_traits::Zero;
use std::sync::OnceLock;

/// LU factorization `P·A = L·U`
///
/// Stores L (unit diagonal, strictly below the diagonal) and U (on and above
/// the diagonal) packed in one matrix, plus the row swaps in LAPACK `ipiv`
/// style: at step `k`, row `k` was swapped with row `pivots[k]`.
#[derive(Debug, Clone)]
pub struct Lu<T: Scalar> {
    factors: Matrix<T>,
    pivots: Vec<usize>,
    swaps: usize,
    singular: bool,
    lower: OnceLock<Matrix<T>>,
    upper: OnceLock<Matrix<T>>,
}

impl<T: Scalar> Lu<T> {
    /// Factorize a copy of `matrix`.
    ///
    /// At each step the row with the largest magnitude in the pivot column
    /// wins, the earliest one on ties. A pivot column that is exactly zero
    /// marks the matrix singular and the step is skipped.
    pub fn new(matrix: &Matrix<T>) -> Result<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::NotSupported(NotSupportedReason::NonSquare));
        }

        let n = matrix.rows();
        let mut a = matrix.as_slice().to_vec();
        let mut pivots = vec![0; n];
        let mut swaps = 0;
        let mut singular = false;

        for k in 0..n {
            // Find pivot
            let mut max_val = a[k * n + k].modulus();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = a[k * n + i].modulus();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }
            pivots[k] = max_row;

            if max_val.is_zero() {
                log::debug!("LU: no nonzero pivot in column {k} of {n}, matrix is singular");
                singular = true;
                continue;
            }

            // Swap rows if needed
            if max_row != k {
                for j in 0..n {
                    a.swap(j * n + k, j * n + max_row);
                }
                swaps += 1;
            }

            // Multipliers go below the diagonal of column k
            let pivot = a[k * n + k];
            for i in (k + 1)..n {
                a[k * n + i] /= pivot;
            }

            // Eliminate, column by column
            for j in (k + 1)..n {
                let u_kj = a[j * n + k];
                if u_kj.is_zero() {
                    continue;
                }
                for i in (k + 1)..n {
                    let l_ik = a[k * n + i];
                    a[j * n + i] -= l_ik * u_kj;
                }
            }
        }

        Ok(Self {
            factors: Matrix::from_storage(n, n, a),
            pivots,
            swaps,
            singular,
            lower: OnceLock::new(),
            upper: OnceLock::new(),
        })
    }

    /// Matrix dimension
    pub fn order(&self) -> usize {
        self.factors.rows()
    }

    /// Packed L and U factors
    pub fn factors(&self) -> &Matrix<T> {
        &self.factors
    }

    /// Row swapped with row `k` at elimination step `k`
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Whether some pivot column was exactly zero
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Unit lower-triangular factor, built once
    pub fn lower(&self) -> &Matrix<T> {
        self.lower.get_or_init(|| {
            let n = self.order();
            let packed = self.factors.as_slice();
            let mut data = vec![T::zero(); n * n];
            for col in 0..n {
                data[col * n + col] = T::one();
                for row in (col + 1)..n {
                    data[col * n + row] = packed[col * n + row];
                }
            }
            Matrix::from_storage(n, n, data)
        })
    }

    /// Upper-triangular factor, built once
    pub fn upper(&self) -> &Matrix<T> {
        self.upper.get_or_init(|| self.factors.upper_triangle())
    }

    /// det(A) = (−1)^swaps · Π uᵢᵢ, zero when singular
    pub fn determinant(&self) -> T {
        if self.singular {
            return T::zero();
        }
        let n = self.order();
        let packed = self.factors.as_slice();
        let product = (0..n).fold(T::one(), |acc, i| acc * packed[i * n + i]);
        if self.swaps % 2 == 1 { -product } else { product }
    }

    /// Solve `A·x = b` for one right-hand side stored in `x`, in place
    fn solve_in_place(&self, x: &mut [T]) {
        let n = self.order();
        let lu = self.factors.as_slice();

        // Apply row permutations
        for (k, &pivot) in self.pivots.iter().enumerate() {
            if pivot != k {
                x.swap(k, pivot);
            }
        }

        // Forward substitution: Ly = Pb
        for i in 0..n {
            let mut sum = x[i];
            for k in 0..i {
                sum -= lu[k * n + i] * x[k];
            }
            x[i] = sum;
        }

        // Backward substitution: Ux = y
        for i in (0..n).rev() {
            let mut sum = x[i];
            for k in (i + 1)..n {
                sum -= lu[k * n + i] * x[k];
            }
            x[i] = sum / lu[i * n + i];
        }
    }

    /// Solve `A·X = B` column by column
    pub fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>> {
        let n = self.order();
        if b.rows() != n {
            return Err(LinalgError::mismatch(Shape::new(n, n), b.shape()));
        }
        if self.singular {
            return Err(LinalgError::Singular);
        }
        let mut x = b.as_slice().to_vec();
        for column in x.chunks_exact_mut(n) {
            self.solve_in_place(column);
        }
        Ok(Matrix::from_storage(n, b.cols(), x))
    }

    /// Solve `A·x = b`
    pub fn solve_vector(&self, b: &Vector<T>) -> Result<Vector<T>> {
        let n = self.order();
        if b.len() != n {
            return Err(LinalgError::mismatch(Shape::new(n, n), Shape::vector(b.len())));
        }
        if self.singular {
            return Err(LinalgError::Singular);
        }
        let mut x = b.as_slice().to_vec();
        self.solve_in_place(&mut x);
        Ok(x.into())
    }

    /// A⁻¹, or `Singular`
    pub fn inverse(&self) -> Result<Matrix<T>> {
        if self.singular {
            return Err(LinalgError::Singular);
        }
        self.solve(&Matrix::identity(self.order())?)
    }
}

/// Solve `A·x = b` using LU decomposition
///
/// This is a convenience function that combines factorization and solve.
pub fn lu_solve<T: Scalar>(a: &Matrix<T>, b: &Vector<T>) -> Result<Vector<T>> {
    Lu::new(a)?.solve_vector(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn m(rows: &[&[f64]]) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_lu_solve_real() {
        let a = m(&[&[4.0, 1.0], &[1.0, 3.0]]);
        let b = Vector::from_slice(&[1.0, 2.0]);

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        // Verify: Ax = b
        let ax = a.multiply_vector(&x).unwrap();
        for i in 0..2 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_solve_complex() {
        let a = Matrix::from_rows(&[
            [Complex64::new(4.0, 1.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(3.0, -1.0)],
        ])
        .unwrap();
        let b = Vector::from_slice(&[Complex64::new(1.0, 1.0), Complex64::new(2.0, -1.0)]);

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        // Verify: Ax ≈ b
        let ax = a.multiply_vector(&x).unwrap();
        for i in 0..2 {
            assert_relative_eq!((ax[i] - b[i]).norm(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_identity() {
        let n = 5;
        let a = Matrix::<f64>::identity(n).unwrap();
        let b = Vector::from_fn(n, |i| (i + 1) as f64);

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        for i in 0..n {
            assert_relative_eq!(x[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_singular() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]); // Singular matrix
        let b = Vector::from_slice(&[1.0, 2.0]);

        assert_eq!(lu_solve(&a, &b).unwrap_err(), LinalgError::Singular);

        let lu = a.lu().unwrap();
        assert!(lu.is_singular());
        assert_eq!(lu.determinant(), 0.0);
        assert_eq!(lu.inverse().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn test_lu_factorize_and_solve() {
        let a = m(&[&[4.0, 1.0, 0.0], &[1.0, 3.0, 1.0], &[0.0, 1.0, 2.0]]);

        let factorization = Lu::new(&a).expect("Factorization should succeed");

        // Solve multiple RHS at once
        let b = m(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]);
        let x = factorization.solve(&b).expect("Solve should succeed");

        let ax = a.multiply(&x).unwrap();
        for (got, want) in ax.iter().zip(b.iter()) {
            assert_relative_eq!(got, want, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_pivoting_records_swaps() {
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let lu = a.lu().unwrap();
        assert_eq!(lu.pivots(), &[1, 1]);
        assert_relative_eq!(lu.determinant(), -1.0);
    }

    #[test]
    fn test_pivot_tie_keeps_earliest_row() {
        let a = m(&[&[1.0, 2.0], &[-1.0, 3.0]]);
        let lu = a.lu().unwrap();
        assert_eq!(lu.pivots(), &[0, 1]);
        assert_relative_eq!(lu.determinant(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lower_times_upper_is_permuted_input() {
        let a = m(&[&[2.0, 1.0, 1.0], &[4.0, -6.0, 0.0], &[-2.0, 7.0, 2.0]]);
        let lu = a.lu().unwrap();

        let mut permuted = a.to_row_arrays();
        for (k, &p) in lu.pivots().iter().enumerate() {
            permuted.swap(k, p);
        }
        let pa = Matrix::from_rows(&permuted).unwrap();
        let product = lu.lower().multiply(lu.upper()).unwrap();
        for (got, want) in product.iter().zip(pa.iter()) {
            assert_relative_eq!(got, want, epsilon = 1e-12);
        }

        for i in 0..3 {
            assert_eq!(lu.lower()[(i, i)], 1.0);
        }
        assert_eq!(lu.upper()[(2, 0)], 0.0);
        assert_relative_eq!(lu.determinant(), -16.0, epsilon = 1e-10);
    }

    #[test]
    fn test_factors_are_cached() {
        let a = m(&[&[3.0, 1.0], &[6.0, 4.0]]);
        let lu = a.lu().unwrap();
        assert!(std::ptr::eq(lu.lower(), lu.lower()));
        assert!(std::ptr::eq(lu.upper(), lu.upper()));
    }

    #[test]
    fn test_dimension_checks() {
        let rect = Matrix::<f64>::zeros(2, 3).unwrap();
        assert_eq!(
            Lu::new(&rect).unwrap_err(),
            LinalgError::NotSupported(NotSupportedReason::NonSquare)
        );

        let lu = Matrix::<f64>::identity(3).unwrap().lu().unwrap();
        let err = lu.solve_vector(&Vector::zeros(2)).unwrap_err();
        assert_eq!(err, LinalgError::mismatch(Shape::new(3, 3), Shape::vector(2)));
        assert!(lu.solve(&Matrix::zeros(2, 1).unwrap()).unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_zero_column_is_singular() {
        let a = m(&[&[0.0, 1.0, 2.0], &[0.0, 3.0, 4.0], &[0.0, 5.0, 7.0]]);
        let lu = a.lu().unwrap();
        assert!(lu.is_singular());
        assert_eq!(a.determinant().unwrap(), 0.0);
        assert_eq!(a.inverse().unwrap_err(), LinalgError::Singular);
    }
}
