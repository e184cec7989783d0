//! Slice-level helpers shared by the compute kernels
//!
//! All matrices handed to these helpers are column-major: element `(r, c)` of a
//! `rows × cols` operand sits at `c * rows + r`. A transposed operand is never
//! materialized; row and column roles are swapped while gathering instead.

use crate::provider::Transpose;
use crate::traits::Scalar;

/// Offset of element `(row, col)` in a column-major buffer with `rows` rows.
#[inline(always)]
pub fn column_major_offset(rows: usize, row: usize, col: usize) -> usize {
    col * rows + row
}

/// Copy row `i` of `op(X)` into `out`, where `X` is stored `rows × cols`.
///
/// Without transposition the row is a strided gather of length `cols`; with
/// transposition it is column `i` of `X`, a contiguous block of length `rows`.
#[inline]
pub fn gather_row<T: Copy>(
    rows: usize,
    cols: usize,
    x: &[T],
    transpose: Transpose,
    i: usize,
    out: &mut [T],
) {
    match transpose {
        Transpose::NoTranspose => {
            for (k, slot) in out.iter_mut().enumerate().take(cols) {
                *slot = x[column_major_offset(rows, i, k)];
            }
        }
        Transpose::Transpose => {
            let start = i * rows;
            out[..rows].copy_from_slice(&x[start..start + rows]);
        }
    }
}

/// Copy column `j` of `op(Y)` into `out`, where `Y` is stored `rows × cols`.
///
/// Without transposition the column is a contiguous block of length `rows`;
/// with transposition it is row `j` of `Y`, a strided gather of length `cols`.
#[inline]
pub fn gather_column<T: Copy>(
    rows: usize,
    cols: usize,
    y: &[T],
    transpose: Transpose,
    j: usize,
    out: &mut [T],
) {
    match transpose {
        Transpose::NoTranspose => {
            let start = j * rows;
            out[..rows].copy_from_slice(&y[start..start + rows]);
        }
        Transpose::Transpose => {
            for (k, slot) in out.iter_mut().enumerate().take(cols) {
                *slot = y[column_major_offset(rows, j, k)];
            }
        }
    }
}

/// Unconjugated dot product Σ x_i · y_i over the common prefix.
#[inline]
pub fn dot<T: Scalar>(x: &[T], y: &[T]) -> T {
    let mut sum = T::zero();
    for (xi, yi) in x.iter().zip(y.iter()) {
        sum += *xi * *yi;
    }
    sum
}

/// Scale a buffer in place: x = α * x
///
/// α = 0 writes exact zeros so stale NaN or infinity never survives.
#[inline]
pub fn scale_inplace<T: Scalar>(x: &mut [T], alpha: T) {
    if alpha.is_zero() {
        x.fill(T::zero());
    } else if !alpha.is_one() {
        for xi in x.iter_mut() {
            *xi *= alpha;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // 2×3 column-major:
    // [1 3 5]
    // [2 4 6]
    const X: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    #[test]
    fn test_gather_row_plain() {
        let mut row = [0.0; 3];
        gather_row(2, 3, &X, Transpose::NoTranspose, 1, &mut row);
        assert_eq!(row, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_gather_row_transposed() {
        // Xᵗ is 3×2, its row 2 is column 2 of X
        let mut row = [0.0; 2];
        gather_row(2, 3, &X, Transpose::Transpose, 2, &mut row);
        assert_eq!(row, [5.0, 6.0]);
    }

    #[test]
    fn test_gather_column_plain() {
        let mut col = [0.0; 2];
        gather_column(2, 3, &X, Transpose::NoTranspose, 1, &mut col);
        assert_eq!(col, [3.0, 4.0]);
    }

    #[test]
    fn test_gather_column_transposed() {
        // column 0 of Xᵗ is row 0 of X
        let mut col = [0.0; 3];
        gather_column(2, 3, &X, Transpose::Transpose, 0, &mut col);
        assert_eq!(col, [1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_dot() {
        let x = [1.0_f64, 2.0, 3.0];
        let y = [4.0_f64, 5.0, 6.0];
        assert_relative_eq!(dot(&x, &y), 32.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_inplace_zero_clears_nan() {
        let mut x = [f64::NAN, f64::INFINITY, 1.0];
        scale_inplace(&mut x, 0.0);
        assert_eq!(x, [0.0, 0.0, 0.0]);

        let mut y = [1.0_f64, -2.0];
        scale_inplace(&mut y, 0.5);
        assert_eq!(y, [0.5, -1.0]);
    }
}
