//! Matrix factories
//!
//! Every factory copies its input. Shapes need at least one row and one
//! column. Flat sequences shorter than `rows * cols` are zero-padded, longer
//! ones are rejected. In row/column collections the first entry fixes the
//! width; shorter later entries are rejected, longer ones truncated.

use super::Matrix;
use crate::error::{ArgumentReason, LinalgError, Result};
use crate::traits::Scalar;
use ndarray::{Array2, ArrayView2};
use num_traits::Float;
use rand::Rng;
use rand::distr::uniform::SampleUniform;

fn check_shape(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 {
        return Err(LinalgError::out_of_range("rows", rows));
    }
    if cols == 0 {
        return Err(LinalgError::out_of_range("cols", cols));
    }
    Ok(())
}

/// Fill a zeroed buffer of `len` from `values`, rejecting overflow.
fn fill_flat<T: Scalar>(len: usize, values: impl IntoIterator<Item = T>) -> Result<Vec<T>> {
    let mut data = vec![T::zero(); len];
    let mut values = values.into_iter();
    for slot in data.iter_mut() {
        match values.next() {
            Some(value) => *slot = value,
            None => return Ok(data),
        }
    }
    if values.next().is_some() {
        return Err(LinalgError::illegal("values", ArgumentReason::LengthMismatch));
    }
    Ok(data)
}

/// Common width of a collection of slices, per the truncation policy.
fn collection_width<T, S: AsRef<[T]>>(name: &'static str, entries: &[S]) -> Result<usize> {
    let first = entries
        .first()
        .ok_or_else(|| LinalgError::out_of_range(name, 0))?;
    let width = first.as_ref().len();
    if width == 0 {
        return Err(LinalgError::out_of_range(name, 0));
    }
    if entries.iter().any(|entry| entry.as_ref().len() < width) {
        return Err(LinalgError::illegal(name, ArgumentReason::LengthMismatch));
    }
    Ok(width)
}

impl<T: Scalar> Matrix<T> {
    /// All-zero `rows × cols` matrix
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        check_shape(rows, cols)?;
        Ok(Self::from_storage(rows, cols, vec![T::zero(); rows * cols]))
    }

    /// `n × n` identity
    pub fn identity(n: usize) -> Result<Self> {
        Self::diagonal(n, n, |_| T::one())
    }

    /// `rows × cols` matrix with `f(i)` at `(i, i)` and zero elsewhere
    pub fn diagonal(rows: usize, cols: usize, mut f: impl FnMut(usize) -> T) -> Result<Self> {
        let mut matrix = Self::zeros(rows, cols)?;
        for i in 0..rows.min(cols) {
            let offset = matrix.offset(i, i);
            matrix.data[offset] = f(i);
        }
        Ok(matrix)
    }

    /// Matrix whose `(row, col)` entry is `f(row, col)`
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        check_shape(rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for col in 0..cols {
            for row in 0..rows {
                data.push(f(row, col));
            }
        }
        Ok(Self::from_storage(rows, cols, data))
    }

    /// Matrix read from `values` one column after another
    pub fn from_column_major(
        rows: usize,
        cols: usize,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        check_shape(rows, cols)?;
        let data = fill_flat(rows * cols, values)?;
        Ok(Self::from_storage(rows, cols, data))
    }

    /// Matrix read from `values` one row after another
    pub fn from_row_major(
        rows: usize,
        cols: usize,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        check_shape(rows, cols)?;
        let row_major = fill_flat(rows * cols, values)?;
        Self::from_fn(rows, cols, |row, col| row_major[row * cols + col])
    }

    /// Matrix whose rows are copies of `rows`
    pub fn from_rows<S: AsRef<[T]>>(rows: &[S]) -> Result<Self> {
        let cols = collection_width("rows", rows)?;
        Self::from_fn(rows.len(), cols, |row, col| rows[row].as_ref()[col])
    }

    /// Matrix whose columns are copies of `columns`
    pub fn from_columns<S: AsRef<[T]>>(columns: &[S]) -> Result<Self> {
        let rows = collection_width("columns", columns)?;
        let mut data = Vec::with_capacity(rows * columns.len());
        for column in columns {
            data.extend_from_slice(&column.as_ref()[..rows]);
        }
        Ok(Self::from_storage(rows, columns.len(), data))
    }

    /// Copy of a 2-D ndarray, whatever its memory layout
    pub fn from_array2(array: ArrayView2<'_, T>) -> Result<Self> {
        let (rows, cols) = array.dim();
        Self::from_fn(rows, cols, |row, col| array[[row, col]])
    }

    /// Random matrix with real parts uniform in `[min, max]`
    pub fn random(rows: usize, cols: usize, min: T::Real, max: T::Real) -> Result<Self>
    where
        T::Real: SampleUniform,
    {
        Self::random_with(&mut rand::rng(), rows, cols, min, max)
    }

    /// Like [`Matrix::random`] with a caller-supplied generator
    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        min: T::Real,
        max: T::Real,
    ) -> Result<Self>
    where
        T::Real: SampleUniform,
    {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(LinalgError::illegal("max", ArgumentReason::Invalid));
        }
        Self::from_fn(rows, cols, |_, _| T::from_real(rng.random_range(min..=max)))
    }
}

impl<T: Scalar> TryFrom<Array2<T>> for Matrix<T> {
    type Error = LinalgError;

    fn try_from(array: Array2<T>) -> Result<Self> {
        Self::from_array2(array.view())
    }
}

impl<T: Scalar> TryFrom<ArrayView2<'_, T>> for Matrix<T> {
    type Error = LinalgError;

    fn try_from(array: ArrayView2<'_, T>) -> Result<Self> {
        Self::from_array2(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;
    use ndarray::{ShapeBuilder, array};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zeros_rejects_empty_shape() {
        assert!(Matrix::<f64>::zeros(0, 3).unwrap_err().is_range_error());
        assert!(Matrix::<f64>::zeros(3, 0).unwrap_err().is_range_error());
        let m = Matrix::<f64>::zeros(2, 3).unwrap();
        assert!(m.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_identity_and_diagonal() {
        let id = Matrix::<f64>::identity(3).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(id[(row, col)], if row == col { 1.0 } else { 0.0 });
            }
        }
        let d = Matrix::diagonal(2, 3, |i| (i + 5) as f64).unwrap();
        assert_eq!(d.to_row_major_vec(), vec![5.0, 0.0, 0.0, 0.0, 6.0, 0.0]);
    }

    #[test]
    fn test_column_major_transpose_is_row_major() {
        let values: Vec<f64> = (0..12).map(f64::from).collect();
        let a = Matrix::from_column_major(3, 4, values.clone()).unwrap();
        let b = Matrix::from_row_major(4, 3, values).unwrap();
        assert_eq!(a.transpose(), b);
    }

    #[test]
    fn test_short_sequence_is_padded() {
        let m = Matrix::from_row_major(2, 2, [1.0_f64, 2.0, 3.0]).unwrap();
        assert_eq!(m.to_row_major_vec(), vec![1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_long_sequence_is_rejected() {
        let err = Matrix::from_column_major(2, 2, [1.0_f64; 5]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::illegal("values", ArgumentReason::LengthMismatch)
        );
    }

    #[test]
    fn test_from_rows_and_columns() {
        let m = Matrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m[(1, 0)], 3.0);
        let n = Matrix::from_columns(&[vec![1.0_f64, 3.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(m, n);

        let vectors = [Vector::from_slice(&[1.0_f64, 2.0]), Vector::from_slice(&[3.0, 4.0])];
        assert_eq!(Matrix::from_rows(&vectors).unwrap(), m);
    }

    #[test]
    fn test_collection_policy() {
        let truncated = Matrix::from_rows(&[vec![1.0_f64, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        assert_eq!((truncated.rows(), truncated.cols()), (2, 2));
        assert_eq!(truncated[(1, 1)], 4.0);

        let short = Matrix::from_rows(&[vec![1.0_f64, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            short,
            LinalgError::illegal("rows", ArgumentReason::LengthMismatch)
        );

        let empty: [Vec<f64>; 0] = [];
        assert!(Matrix::from_columns(&empty).unwrap_err().is_range_error());
    }

    #[test]
    fn test_from_array2_respects_layout() {
        let standard = array![[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let fortran =
            Array2::from_shape_vec((2, 3).f(), vec![1.0_f64, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
        let a = Matrix::from_array2(standard.view()).unwrap();
        let b = Matrix::try_from(fortran).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[(1, 2)], 6.0);
        assert_eq!(a.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_random_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::<f64>::random_with(&mut rng, 4, 5, 2.0, 3.0).unwrap();
        assert!(m.iter().all(|x| (2.0..=3.0).contains(x)));
        assert!(Matrix::<f64>::random(2, 2, 1.0, -1.0).is_err());
    }
}
