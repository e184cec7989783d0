//! Dense vector
//!
//! [`Vector`] owns a fixed-length `Vec<T>`. Arithmetic lives in `ops.rs` and
//! always allocates its result; the only mutating methods are the explicit
//! in-place ones (`set`, `set_sub_vector`, `clear`, `coerce_zero`, compound
//! assignment operators).

mod ops;

use crate::error::{ArgumentReason, LinalgError, Result};
use crate::matrix::Matrix;
use crate::traits::{Scalar, real_from_count};
use ndarray::{Array1, ArrayView1};
use num_traits::{Float, One, Zero};
use rand::Rng;
use rand::distr::uniform::SampleUniform;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Dense vector of `T`
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// All-zero vector of length `len`
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }

    /// Copy of `values`
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }

    /// Vector whose element `i` is `f(i)`
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..len).map(f).collect(),
        }
    }

    /// Copy of a 1-D ndarray view
    pub fn from_array1(array: ArrayView1<'_, T>) -> Self {
        array.iter().copied().collect()
    }

    /// Random vector with real parts uniform in `[min, max]`
    pub fn random(len: usize, min: T::Real, max: T::Real) -> Result<Self>
    where
        T::Real: SampleUniform,
    {
        Self::random_with(&mut rand::rng(), len, min, max)
    }

    /// Like [`Vector::random`] with a caller-supplied generator
    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        len: usize,
        min: T::Real,
        max: T::Real,
    ) -> Result<Self>
    where
        T::Real: SampleUniform,
    {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(LinalgError::illegal("max", ArgumentReason::Invalid));
        }
        Ok(Self::from_fn(len, |_| {
            T::from_real(rng.random_range(min..=max))
        }))
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Take the storage
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(LinalgError::index("index", index, self.len()));
        }
        Ok(())
    }

    /// Element `index`, or `IndexOutOfRange`
    pub fn get(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.data[index])
    }

    /// Overwrite element `index`, or fail with `IndexOutOfRange`
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        self.data[index] = value;
        Ok(())
    }

    /// Copy of `count` elements starting at `index`
    pub fn sub_vector(&self, index: usize, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(LinalgError::illegal("count", ArgumentReason::NotPositive));
        }
        self.check_index(index)?;
        if count > self.len() - index {
            return Err(LinalgError::out_of_range("count", count));
        }
        Ok(Self::from_slice(&self.data[index..index + count]))
    }

    /// Overwrite elements from `index` on with `values`
    pub fn set_sub_vector(&mut self, index: usize, values: &Vector<T>) -> Result<()> {
        if values.is_empty() {
            return Err(LinalgError::illegal("values", ArgumentReason::NotPositive));
        }
        self.check_index(index)?;
        if values.len() > self.len() - index {
            return Err(LinalgError::out_of_range("values", values.len()));
        }
        self.data[index..index + values.len()].copy_from_slice(&values.data);
        Ok(())
    }

    /// Set every element to zero
    pub fn clear(&mut self) {
        self.data.fill(T::zero());
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

    /// Σ |xᵢ|
    pub fn one_norm(&self) -> T::Real {
        self.data
            .iter()
            .fold(T::Real::zero(), |acc, x| acc + x.modulus())
    }

    /// √(Σ |xᵢ|²)
    pub fn two_norm(&self) -> T::Real {
        self.data
            .iter()
            .fold(T::Real::zero(), |acc, x| acc + x.norm_sqr())
            .sqrt()
    }

    /// maxᵢ |xᵢ|, zero for an empty vector
    pub fn infinity_norm(&self) -> T::Real {
        self.data
            .iter()
            .fold(T::Real::zero(), |acc, x| acc.max(x.modulus()))
    }

    /// Number of elements outside the zero tolerance
    pub fn zero_norm(&self) -> usize {
        self.data.iter().filter(|x| !x.is_negligible()).count()
    }

    /// p-norm (Σ |xᵢ|ᵖ)^(1/p).
    ///
    /// `p = 0` counts the non-negligible elements, `p = ∞` is the maximum
    /// magnitude. Negative or NaN `p` is `ArgumentOutOfRange`.
    pub fn norm(&self, p: T::Real) -> Result<T::Real> {
        if p.is_nan() || p < T::Real::zero() {
            return Err(LinalgError::out_of_range("p", p));
        }
        if p.is_zero() {
            return Ok(real_from_count(self.zero_norm()));
        }
        if p.is_infinite() {
            return Ok(self.infinity_norm());
        }
        if p == T::Real::one() {
            return Ok(self.one_norm());
        }
        if p == real_from_count::<T::Real>(2) {
            return Ok(self.two_norm());
        }
        let sum = self
            .data
            .iter()
            .fold(T::Real::zero(), |acc, x| acc + x.modulus().powf(p));
        Ok(sum.powf(p.recip()))
    }

    /// 1 × N copy
    pub fn to_row_matrix(&self) -> Matrix<T> {
        Matrix::from_storage(1, self.len(), self.data.clone())
    }

    /// N × 1 copy
    pub fn to_column_matrix(&self) -> Matrix<T> {
        Matrix::from_storage(self.len(), 1, self.data.clone())
    }

    /// Copy into an ndarray
    pub fn to_array1(&self) -> Array1<T> {
        Array1::from_vec(self.data.clone())
    }

    /// Elements rendered by `format` and joined by `delimiter`
    pub fn to_delimited(&self, delimiter: &str, format: impl Fn(&T) -> String) -> String {
        self.data
            .iter()
            .map(format)
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Scalar> From<Array1<T>> for Vector<T> {
    fn from(array: Array1<T>) -> Self {
        Self::from_array1(array.view())
    }
}

impl<T: Scalar> From<Vector<T>> for Vec<T> {
    fn from(vector: Vector<T>) -> Self {
        vector.data
    }
}

impl<T: Scalar> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// # Panics
///
/// Panics if `index >= len`; use [`Vector::get`] for a checked read.
impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        assert!(
            index < self.data.len(),
            "index {index} out of range for vector of length {}",
            self.data.len()
        );
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.data.len(),
            "index {index} out of range for vector of length {}",
            self.data.len()
        );
        &mut self.data[index]
    }
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_delimited(", ", |x| x.to_string()))
    }
}
