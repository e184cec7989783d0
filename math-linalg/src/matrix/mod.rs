//! Dense column-major matrix
//!
//! Element `(row, col)` of an `R × C` matrix lives at `col * R + row` in one
//! owned `Vec<T>` of length `R * C`. Columns are contiguous, so column copies
//! are single block copies and row copies are strided gathers.
//!
//! The implementation is split by concern:
//! - `creation.rs`: factories
//! - `views.rs`: rows, columns, sub-matrices, triangles, norms
//! - `ops.rs`: arithmetic through the compute context, factorizations
//! - `format.rs`: conversions and text output

mod creation;
mod format;
mod ops;
mod views;

use crate::error::{LinalgError, NotSupportedReason, Result, Shape};
use crate::traits::Scalar;
use std::ops::{Index, IndexMut};

/// Dense matrix of `T` in column-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Wrap storage that is already column-major, without copying.
    pub(crate) fn from_storage(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Storage offset of `(row, col)`, unchecked
    #[inline(always)]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        col * self.rows + row
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `rows × cols`
    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    /// Whether `rows == cols`
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The column-major storage
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Elements in storage (column-major) order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn require_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(LinalgError::NotSupported(NotSupportedReason::NonSquare));
        }
        Ok(())
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(LinalgError::index("row", row, self.rows));
        }
        Ok(())
    }

    pub(crate) fn check_column(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(LinalgError::index("column", col, self.cols));
        }
        Ok(())
    }

    /// Element `(row, col)`, or `IndexOutOfRange`
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_row(row)?;
        self.check_column(col)?;
        Ok(self.data[self.offset(row, col)])
    }

    /// Overwrite element `(row, col)`, or fail with `IndexOutOfRange`
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_row(row)?;
        self.check_column(col)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// # Panics
///
/// Panics if `row` or `col` is out of range; use [`Matrix::get`] for a
/// checked read.
impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {} matrix",
            self.shape()
        );
        &self.data[self.offset(row, col)]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {} matrix",
            self.shape()
        );
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_layout() {
        let m = Matrix::from_storage(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 0)], 2.0);
        assert_eq!(m[(0, 1)], 3.0);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m.offset(1, 2), 5);
        assert_eq!(m.shape(), Shape::new(2, 3));
    }

    #[test]
    fn test_checked_access() {
        let mut m = Matrix::<f64>::zeros(2, 2).unwrap();
        m.set(1, 0, 7.0).unwrap();
        assert_eq!(m.get(1, 0).unwrap(), 7.0);
        assert_eq!(m.get(2, 0).unwrap_err(), LinalgError::index("row", 2, 2));
        assert_eq!(
            m.set(0, 5, 1.0).unwrap_err(),
            LinalgError::index("column", 5, 2)
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics() {
        let m = Matrix::<f64>::zeros(2, 2).unwrap();
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_equality_needs_same_shape() {
        let a = Matrix::from_storage(2, 1, vec![1.0_f64, 2.0]);
        let b = Matrix::from_storage(1, 2, vec![1.0_f64, 2.0]);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }
}
