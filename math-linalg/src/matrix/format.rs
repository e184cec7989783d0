//! Conversions to plain arrays, ndarray and text

use super::Matrix;
use crate::traits::Scalar;
use ndarray::{Array2, ShapeBuilder};
use std::fmt;

impl<T: Scalar> Matrix<T> {
    /// Elements one row after another
    pub fn to_row_major_vec(&self) -> Vec<T> {
        self.transpose().data
    }

    /// Elements one column after another (the storage order)
    pub fn to_column_major_vec(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Take the column-major storage
    pub fn into_column_major_vec(self) -> Vec<T> {
        self.data
    }

    /// One `Vec` per row
    pub fn to_row_arrays(&self) -> Vec<Vec<T>> {
        self.rows_iter().map(Vec::from).collect()
    }

    /// One `Vec` per column
    pub fn to_column_arrays(&self) -> Vec<Vec<T>> {
        self.columns_iter().map(<[T]>::to_vec).collect()
    }

    /// Copy into a Fortran-order ndarray with the same logical shape
    pub fn to_array2(&self) -> Array2<T> {
        Array2::from_shape_fn((self.rows, self.cols).f(), |(row, col)| {
            self.data[self.offset(row, col)]
        })
    }

    /// One line per row; entries rendered by `format` and joined by `delimiter`
    pub fn to_delimited(&self, delimiter: &str, format: impl Fn(&T) -> String) -> String {
        self.rows_iter()
            .map(|row| row.to_delimited(delimiter, &format))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<T: Scalar> From<&Matrix<T>> for Array2<T> {
    fn from(matrix: &Matrix<T>) -> Self {
        matrix.to_array2()
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_delimited("\t", |x| x.to_string()))
    }
}
