//! Rows, columns, blocks and structural transforms
//!
//! Nothing here goes through a compute provider.

use super::Matrix;
use crate::error::{ArgumentReason, LinalgError, Result, Shape};
use crate::traits::Scalar;
use crate::vector::Vector;
use num_traits::{Float, Zero};

impl<T: Scalar> Matrix<T> {
    /// Lazy iterator over row `row`
    pub fn row(&self, row: usize) -> Result<impl Iterator<Item = T> + '_> {
        self.check_row(row)?;
        Ok((0..self.cols).map(move |col| self.data[self.offset(row, col)]))
    }

    /// Lazy iterator over column `col`
    pub fn column(&self, col: usize) -> Result<impl Iterator<Item = T> + '_> {
        self.check_column(col)?;
        Ok(self.column_slice(col).iter().copied())
    }

    #[inline]
    fn column_slice(&self, col: usize) -> &[T] {
        let start = col * self.rows;
        &self.data[start..start + self.rows]
    }

    /// Copy of row `row`
    pub fn row_vec(&self, row: usize) -> Result<Vec<T>> {
        Ok(self.row(row)?.collect())
    }

    /// Copy of column `col`
    pub fn column_vec(&self, col: usize) -> Result<Vec<T>> {
        self.check_column(col)?;
        Ok(self.column_slice(col).to_vec())
    }

    /// Row `row` as a [`Vector`]
    pub fn row_vector(&self, row: usize) -> Result<Vector<T>> {
        self.row_vec(row).map(Vector::from)
    }

    /// Column `col` as a [`Vector`]
    pub fn column_vector(&self, col: usize) -> Result<Vector<T>> {
        self.column_vec(col).map(Vector::from)
    }

    /// Every row, top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = Vector<T>> + '_ {
        (0..self.rows).map(move |row| {
            (0..self.cols)
                .map(|col| self.data[self.offset(row, col)])
                .collect()
        })
    }

    /// Every column, left to right
    pub fn columns_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.cols).map(move |col| self.column_slice(col))
    }

    fn check_block(
        &self,
        row: usize,
        row_count: usize,
        col: usize,
        col_count: usize,
    ) -> Result<()> {
        if row_count == 0 {
            return Err(LinalgError::illegal("row_count", ArgumentReason::NotPositive));
        }
        if col_count == 0 {
            return Err(LinalgError::illegal("col_count", ArgumentReason::NotPositive));
        }
        self.check_row(row)?;
        self.check_column(col)?;
        if row_count > self.rows - row {
            return Err(LinalgError::out_of_range("row_count", row_count));
        }
        if col_count > self.cols - col {
            return Err(LinalgError::out_of_range("col_count", col_count));
        }
        Ok(())
    }

    /// Copy of the `row_count × col_count` block whose top-left corner is `(row, col)`
    pub fn sub_matrix(
        &self,
        row: usize,
        row_count: usize,
        col: usize,
        col_count: usize,
    ) -> Result<Self> {
        self.check_block(row, row_count, col, col_count)?;
        let mut data = Vec::with_capacity(row_count * col_count);
        for j in col..col + col_count {
            let start = self.offset(row, j);
            data.extend_from_slice(&self.data[start..start + row_count]);
        }
        Ok(Self::from_storage(row_count, col_count, data))
    }

    /// Overwrite the block at `(row, col)` with `block`
    pub fn set_sub_matrix(&mut self, row: usize, col: usize, block: &Matrix<T>) -> Result<()> {
        self.check_block(row, block.rows, col, block.cols)?;
        for j in 0..block.cols {
            let start = self.offset(row, col + j);
            self.data[start..start + block.rows].copy_from_slice(block.column_slice(j));
        }
        Ok(())
    }

    /// Overwrite row `row`; `values` must have `cols` elements
    pub fn set_row(&mut self, row: usize, values: impl AsRef<[T]>) -> Result<()> {
        let values = values.as_ref();
        self.check_row(row)?;
        if values.len() != self.cols {
            return Err(LinalgError::mismatch(
                Shape::new(1, self.cols),
                Shape::new(1, values.len()),
            ));
        }
        for (col, value) in values.iter().enumerate() {
            let offset = self.offset(row, col);
            self.data[offset] = *value;
        }
        Ok(())
    }

    /// Overwrite column `col`; `values` must have `rows` elements
    pub fn set_column(&mut self, col: usize, values: impl AsRef<[T]>) -> Result<()> {
        let values = values.as_ref();
        self.check_column(col)?;
        if values.len() != self.rows {
            return Err(LinalgError::mismatch(
                Shape::vector(self.rows),
                Shape::vector(values.len()),
            ));
        }
        let start = col * self.rows;
        self.data[start..start + self.rows].copy_from_slice(values);
        Ok(())
    }

    /// `[self; lower]`, stacking rows; column counts must match
    pub fn concatenate_below(&self, lower: &Matrix<T>) -> Result<Self> {
        if self.cols != lower.cols {
            return Err(LinalgError::mismatch(self.shape(), lower.shape()));
        }
        let rows = self.rows + lower.rows;
        let mut data = Vec::with_capacity(rows * self.cols);
        for col in 0..self.cols {
            data.extend_from_slice(self.column_slice(col));
            data.extend_from_slice(lower.column_slice(col));
        }
        Ok(Self::from_storage(rows, self.cols, data))
    }

    /// `[self, right]`, appending columns; row counts must match
    pub fn concatenate_right(&self, right: &Matrix<T>) -> Result<Self> {
        if self.rows != right.rows {
            return Err(LinalgError::mismatch(self.shape(), right.shape()));
        }
        let mut data = Vec::with_capacity(self.data.len() + right.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&right.data);
        Ok(Self::from_storage(self.rows, self.cols + right.cols, data))
    }

    /// Set every element to zero
    pub fn clear(&mut self) {
        self.data.fill(T::zero());
    }

    /// Zero row `row`
    pub fn clear_row(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        for col in 0..self.cols {
            let offset = self.offset(row, col);
            self.data[offset] = T::zero();
        }
        Ok(())
    }

    /// Zero column `col`
    pub fn clear_column(&mut self, col: usize) -> Result<()> {
        self.check_column(col)?;
        let start = col * self.rows;
        self.data[start..start + self.rows].fill(T::zero());
        Ok(())
    }

    /// Zero the `row_count × col_count` block at `(row, col)`
    pub fn clear_sub_matrix(
        &mut self,
        row: usize,
        row_count: usize,
        col: usize,
        col_count: usize,
    ) -> Result<()> {
        self.check_block(row, row_count, col, col_count)?;
        for j in col..col + col_count {
            let start = self.offset(row, j);
            self.data[start..start + row_count].fill(T::zero());
        }
        Ok(())
    }

    /// Zero every element within the zero tolerance
    pub fn coerce_zero(&mut self) {
        self.coerce_zero_by(|x| x.is_negligible());
    }

    /// Zero every element matching `predicate`
    pub fn coerce_zero_by(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        for x in self.data.iter_mut() {
            if predicate(x) {
                *x = T::zero();
            }
        }
    }

    /// Transposed copy
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                data.push(self.data[self.offset(row, col)]);
            }
        }
        Self::from_storage(self.cols, self.rows, data)
    }

    /// Copy keeping `row >= col`, zero above the diagonal
    pub fn lower_triangle(&self) -> Self {
        self.masked(|row, col| row >= col)
    }

    /// Copy keeping `row <= col`, zero below the diagonal
    pub fn upper_triangle(&self) -> Self {
        self.masked(|row, col| row <= col)
    }

    fn masked(&self, keep: impl Fn(usize, usize) -> bool) -> Self {
        let mut data = self.data.clone();
        for col in 0..self.cols {
            for row in 0..self.rows {
                if !keep(row, col) {
                    data[col * self.rows + row] = T::zero();
                }
            }
        }
        Self::from_storage(self.rows, self.cols, data)
    }

    /// Σ aᵢᵢ; square matrices only
    pub fn trace(&self) -> Result<T> {
        self.require_square()?;
        Ok((0..self.rows).fold(T::zero(), |acc, i| acc + self.data[self.offset(i, i)]))
    }

    /// Maximum absolute column sum
    pub fn one_norm(&self) -> T::Real {
        self.columns_iter()
            .map(|column| {
                column
                    .iter()
                    .fold(T::Real::zero(), |acc, x| acc + x.modulus())
            })
            .fold(T::Real::zero(), Float::max)
    }

    /// Maximum absolute row sum
    pub fn infinity_norm(&self) -> T::Real {
        let mut sums = vec![T::Real::zero(); self.rows];
        for column in self.columns_iter() {
            for (sum, x) in sums.iter_mut().zip(column) {
                *sum += x.modulus();
            }
        }
        sums.into_iter().fold(T::Real::zero(), Float::max)
    }

    /// √(Σ |aᵢⱼ|²)
    pub fn frobenius_norm(&self) -> T::Real {
        self.data
            .iter()
            .fold(T::Real::zero(), |acc, x| acc + x.norm_sqr())
            .sqrt()
    }

    /// Square and `|aᵢⱼ - aⱼᵢ|` within the zero tolerance everywhere
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.cols).all(|col| {
            (col + 1..self.rows).all(|row| {
                let diff = self.data[self.offset(row, col)] - self.data[self.offset(col, row)];
                diff.is_negligible()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4×3 with entry `10 * row + col`
    fn sample() -> Matrix<f64> {
        Matrix::from_fn(4, 3, |row, col| (10 * row + col) as f64).unwrap()
    }

    #[test]
    fn test_row_and_column() {
        let m = sample();
        assert_eq!(m.row_vec(2).unwrap(), vec![20.0, 21.0, 22.0]);
        assert_eq!(m.column_vec(1).unwrap(), vec![1.0, 11.0, 21.0, 31.0]);
        assert_eq!(m.row(1).unwrap().sum::<f64>(), 33.0);
        assert_eq!(m.column_vector(0).unwrap().len(), 4);
        assert!(m.row(4).is_err());
        assert!(m.column(3).is_err());
        assert_eq!(m.rows_iter().count(), 4);
        assert_eq!(m.columns_iter().nth(2).unwrap(), &[2.0, 12.0, 22.0, 32.0]);
    }

    #[test]
    fn test_sub_matrix() {
        let m = sample();
        let block = m.sub_matrix(1, 2, 0, 3).unwrap();
        assert_eq!((block.rows(), block.cols()), (2, 3));
        assert_eq!(block.iter().count(), 6);
        assert_eq!(block.row_vec(0).unwrap(), vec![10.0, 11.0, 12.0]);
        assert_eq!(block.row_vec(1).unwrap(), vec![20.0, 21.0, 22.0]);
    }

    #[test]
    fn test_sub_matrix_bounds() {
        let m = sample();
        assert_eq!(
            m.sub_matrix(0, 0, 0, 1).unwrap_err(),
            LinalgError::illegal("row_count", ArgumentReason::NotPositive)
        );
        assert!(m.sub_matrix(3, 2, 0, 1).unwrap_err().is_range_error());
        assert!(m.sub_matrix(0, 1, 3, 1).unwrap_err().is_range_error());
        assert_eq!(
            m.sub_matrix(1, usize::MAX, 0, 1).unwrap_err(),
            LinalgError::out_of_range("row_count", usize::MAX)
        );
        assert_eq!(
            m.sub_matrix(0, 1, 2, usize::MAX).unwrap_err(),
            LinalgError::out_of_range("col_count", usize::MAX)
        );
    }

    #[test]
    fn test_set_sub_matrix() {
        let mut m = Matrix::<f64>::zeros(3, 3).unwrap();
        let block = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        m.set_sub_matrix(1, 1, &block).unwrap();
        assert_eq!(m.row_vec(2).unwrap(), vec![0.0, 3.0, 4.0]);
        assert!(m.set_sub_matrix(2, 2, &block).is_err());
    }

    #[test]
    fn test_set_row_and_column() {
        let mut m = Matrix::<f64>::zeros(2, 3).unwrap();
        m.set_row(1, [1.0, 2.0, 3.0]).unwrap();
        m.set_column(0, Vector::from_slice(&[9.0, 8.0])).unwrap();
        assert_eq!(m.to_row_major_vec(), vec![9.0, 0.0, 0.0, 8.0, 2.0, 3.0]);
        assert!(m.set_row(0, [1.0]).unwrap_err().is_dimension_error());
        assert!(m.set_column(3, [1.0, 2.0]).unwrap_err().is_range_error());
    }

    #[test]
    fn test_concatenate() {
        let a = Matrix::from_rows(&[[1.0_f64, 2.0]]).unwrap();
        let b = Matrix::from_rows(&[[3.0_f64, 4.0]]).unwrap();
        let below = a.concatenate_below(&b).unwrap();
        assert_eq!(below, Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap());
        let right = a.concatenate_right(&b).unwrap();
        assert_eq!(right, Matrix::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap());
        assert!(below.concatenate_right(&a).unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_clear_variants() {
        let mut m = sample();
        m.clear_row(0).unwrap();
        m.clear_column(2).unwrap();
        m.clear_sub_matrix(2, 2, 0, 1).unwrap();
        assert_eq!(m.row_vec(0).unwrap(), vec![0.0, 0.0, 0.0]);
        assert_eq!(m.column_vec(2).unwrap(), vec![0.0; 4]);
        assert_eq!(m.column_vec(0).unwrap(), vec![0.0, 10.0, 0.0, 0.0]);
        m.clear();
        assert!(m.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_transpose_twice() {
        let m = sample();
        let t = m.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 4));
        assert_eq!(t[(2, 1)], m[(1, 2)]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_triangles() {
        let m = Matrix::from_fn(3, 3, |r, c| (r * 3 + c + 1) as f64).unwrap();
        let lower = m.lower_triangle();
        let upper = m.upper_triangle();
        assert_eq!(lower.row_vec(0).unwrap(), vec![1.0, 0.0, 0.0]);
        assert_eq!(upper.row_vec(2).unwrap(), vec![0.0, 0.0, 9.0]);
        assert_eq!(lower[(2, 1)], 8.0);
        assert_eq!(upper[(0, 2)], 3.0);
    }

    #[test]
    fn test_norms_and_trace() {
        let m = Matrix::from_rows(&[[1.0_f64, -2.0], [-3.0, 4.0]]).unwrap();
        assert_relative_eq!(m.one_norm(), 6.0);
        assert_relative_eq!(m.infinity_norm(), 7.0);
        assert_relative_eq!(m.frobenius_norm(), 30.0_f64.sqrt());
        assert_relative_eq!(m.trace().unwrap(), 5.0);
        assert!(sample().trace().unwrap_err().is_not_supported());
    }

    #[test]
    fn test_symmetry_and_coerce_zero() {
        let mut m = Matrix::from_rows(&[[1.0_f64, 2.0 + 1e-12], [2.0, 1e-11]]).unwrap();
        assert!(m.is_symmetric());
        assert!(!sample().is_symmetric());
        m.coerce_zero();
        assert_eq!(m[(1, 1)], 0.0);
        m.coerce_zero_by(|x| *x > 1.5);
        assert_eq!(m.to_row_major_vec(), vec![1.0, 0.0, 0.0, 0.0]);
    }
}
