//! Matrix arithmetic and factorizations
//!
//! `*_with` methods run on an explicit [`ComputeContext`]; the others use
//! the default one. Products go through the provider's GEMM, transposed
//! operands included, so no transpose is ever materialized.

use super::Matrix;
use crate::context::ComputeContext;
use crate::direct::Lu;
use crate::error::{ArgumentReason, LinalgError, NotSupportedReason, Result, Shape, unwrap_op};
use crate::provider::{LinearAlgebraProvider, Transpose};
use crate::traits::Scalar;
use crate::vector::Vector;
use num_complex::{Complex32, Complex64};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

impl<T: Scalar> Matrix<T> {
    fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(LinalgError::mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    /// Run `kernel` into a fresh buffer of this shape
    fn map_with(&self, kernel: impl FnOnce(&mut [T]) -> Result<()>) -> Result<Self> {
        let mut result = vec![T::zero(); self.data.len()];
        kernel(&mut result)?;
        Ok(Self::from_storage(self.rows, self.cols, result))
    }

    /// `self + other`
    pub fn add_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        self.check_same_shape(other)?;
        self.map_with(|out| ctx.provider().array_add(&self.data, &other.data, out))
    }

    /// `self - other`
    pub fn subtract_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        self.check_same_shape(other)?;
        self.map_with(|out| ctx.provider().array_subtract(&self.data, &other.data, out))
    }

    /// `scalar * self`
    pub fn multiply_scalar_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        self.map_with(|out| ctx.provider().array_multiply(scalar, &self.data, out))
    }

    /// `self / scalar`; a zero divisor is `IllegalArgument(ZeroDivisor)`
    pub fn divide_scalar_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        if scalar.is_zero() {
            return Err(LinalgError::illegal("scalar", ArgumentReason::ZeroDivisor));
        }
        self.multiply_scalar_with(ctx, T::one() / scalar)
    }

    /// `self + scalar` elementwise
    pub fn add_scalar_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        self.map_with(|out| ctx.provider().array_add_scalar(scalar, &self.data, out))
    }

    /// `self - scalar` elementwise
    pub fn subtract_scalar_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        self.add_scalar_with(ctx, -scalar)
    }

    /// `scalar - self` elementwise
    pub fn scalar_minus_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        let provider = ctx.provider();
        self.map_with(|out| {
            provider.array_multiply(-T::one(), &self.data, out)?;
            provider.array_add_scalar_in_place(scalar, out)
        })
    }

    /// `-self`
    pub fn negate_with(&self, ctx: &ComputeContext) -> Result<Self> {
        self.multiply_scalar_with(ctx, -T::one())
    }

    /// `op(self) · op(other)` into a fresh matrix
    fn product_with(
        &self,
        ctx: &ComputeContext,
        transpose_self: Transpose,
        other: &Self,
        transpose_other: Transpose,
    ) -> Result<Self> {
        let (m, inner) = transpose_self.apply(self.rows, self.cols);
        let (inner_other, n) = transpose_other.apply(other.rows, other.cols);
        if inner != inner_other {
            return Err(LinalgError::mismatch(
                Shape::new(m, inner),
                Shape::new(inner_other, n),
            ));
        }
        let mut result = vec![T::zero(); m * n];
        ctx.provider().gemm(
            T::one(),
            self.rows,
            self.cols,
            &self.data,
            transpose_self,
            other.rows,
            other.cols,
            &other.data,
            transpose_other,
            T::zero(),
            &mut result,
        )?;
        Ok(Self::from_storage(m, n, result))
    }

    /// `self · other`; requires `self.cols() == other.rows()`
    pub fn multiply_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(LinalgError::mismatch(self.shape(), other.shape()));
        }
        let mut result = vec![T::zero(); self.rows * other.cols];
        ctx.provider().matrix_multiply(
            self.rows,
            self.cols,
            &self.data,
            other.rows,
            other.cols,
            &other.data,
            &mut result,
        )?;
        Ok(Self::from_storage(self.rows, other.cols, result))
    }

    /// `selfᵗ · other`; requires `self.rows() == other.rows()`
    pub fn transpose_multiply_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        self.product_with(ctx, Transpose::Transpose, other, Transpose::NoTranspose)
    }

    /// `self · otherᵗ`; requires `self.cols() == other.cols()`
    pub fn multiply_transpose_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        self.product_with(ctx, Transpose::NoTranspose, other, Transpose::Transpose)
    }

    /// `self · v`, with `v` taken as a column
    pub fn multiply_vector_with(&self, ctx: &ComputeContext, v: &Vector<T>) -> Result<Vector<T>> {
        if self.cols != v.len() {
            return Err(LinalgError::mismatch(self.shape(), Shape::vector(v.len())));
        }
        let mut result = vec![T::zero(); self.rows];
        ctx.provider().matrix_multiply(
            self.rows,
            self.cols,
            &self.data,
            v.len(),
            1,
            v.as_slice(),
            &mut result,
        )?;
        Ok(result.into())
    }

    /// `vᵗ · self`, with `v` taken as a row
    pub fn left_multiply_vector_with(
        &self,
        ctx: &ComputeContext,
        v: &Vector<T>,
    ) -> Result<Vector<T>> {
        if v.len() != self.rows {
            return Err(LinalgError::mismatch(Shape::new(1, v.len()), self.shape()));
        }
        let mut result = vec![T::zero(); self.cols];
        ctx.provider().matrix_multiply(
            1,
            v.len(),
            v.as_slice(),
            self.rows,
            self.cols,
            &self.data,
            &mut result,
        )?;
        Ok(result.into())
    }

    /// `self · divisor⁻¹`
    pub fn divide_matrix_with(&self, ctx: &ComputeContext, divisor: &Self) -> Result<Self> {
        divisor.require_square()?;
        if self.cols != divisor.rows {
            return Err(LinalgError::mismatch(self.shape(), divisor.shape()));
        }
        let inverse = divisor.inverse()?;
        self.multiply_with(ctx, &inverse)
    }

    /// [`Matrix::add_with`] on the default context
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.add_with(&ComputeContext::default(), other)
    }

    /// [`Matrix::subtract_with`] on the default context
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.subtract_with(&ComputeContext::default(), other)
    }

    /// [`Matrix::multiply_scalar_with`] on the default context
    pub fn checked_mul_scalar(&self, scalar: T) -> Result<Self> {
        self.multiply_scalar_with(&ComputeContext::default(), scalar)
    }

    /// [`Matrix::divide_scalar_with`] on the default context
    pub fn checked_div_scalar(&self, scalar: T) -> Result<Self> {
        self.divide_scalar_with(&ComputeContext::default(), scalar)
    }

    /// [`Matrix::add_scalar_with`] on the default context
    pub fn checked_add_scalar(&self, scalar: T) -> Result<Self> {
        self.add_scalar_with(&ComputeContext::default(), scalar)
    }

    /// [`Matrix::subtract_scalar_with`] on the default context
    pub fn checked_sub_scalar(&self, scalar: T) -> Result<Self> {
        self.subtract_scalar_with(&ComputeContext::default(), scalar)
    }

    /// [`Matrix::scalar_minus_with`] on the default context
    pub fn scalar_minus(&self, scalar: T) -> Result<Self> {
        self.scalar_minus_with(&ComputeContext::default(), scalar)
    }

    /// [`Matrix::negate_with`] on the default context
    pub fn checked_neg(&self) -> Result<Self> {
        self.negate_with(&ComputeContext::default())
    }

    /// [`Matrix::multiply_with`] on the default context
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.multiply_with(&ComputeContext::default(), other)
    }

    /// [`Matrix::transpose_multiply_with`] on the default context
    pub fn transpose_multiply(&self, other: &Self) -> Result<Self> {
        self.transpose_multiply_with(&ComputeContext::default(), other)
    }

    /// [`Matrix::multiply_transpose_with`] on the default context
    pub fn multiply_transpose(&self, other: &Self) -> Result<Self> {
        self.multiply_transpose_with(&ComputeContext::default(), other)
    }

    /// [`Matrix::multiply_vector_with`] on the default context
    pub fn multiply_vector(&self, v: &Vector<T>) -> Result<Vector<T>> {
        self.multiply_vector_with(&ComputeContext::default(), v)
    }

    /// [`Matrix::left_multiply_vector_with`] on the default context
    pub fn left_multiply_vector(&self, v: &Vector<T>) -> Result<Vector<T>> {
        self.left_multiply_vector_with(&ComputeContext::default(), v)
    }

    /// [`Matrix::divide_matrix_with`] on the default context
    pub fn divide_matrix(&self, divisor: &Self) -> Result<Self> {
        self.divide_matrix_with(&ComputeContext::default(), divisor)
    }

    /// LU factorization with partial pivoting of a copy of this matrix
    pub fn lu(&self) -> Result<Lu<T>> {
        Lu::new(self)
    }

    /// Determinant; zero for singular matrices
    pub fn determinant(&self) -> Result<T> {
        self.require_square()?;
        Ok(self.lu()?.determinant())
    }

    /// Inverse; `Singular` if there is none
    pub fn inverse(&self) -> Result<Self> {
        self.require_square()?;
        self.lu()?.inverse()
    }

    /// QR decomposition `(Q, R)`; not available yet
    pub fn qr(&self) -> Result<(Self, Self)> {
        Err(LinalgError::NotSupported(NotSupportedReason::Unimplemented(
            "QR decomposition",
        )))
    }

    /// Singular value decomposition `(U, σ, Vᵗ)`; not available yet
    pub fn svd(&self) -> Result<(Self, Vec<T::Real>, Self)> {
        Err(LinalgError::NotSupported(NotSupportedReason::Unimplemented(
            "singular value decomposition",
        )))
    }

    fn add_assign_with(&mut self, ctx: &ComputeContext, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        ctx.provider().array_add_in_place(&mut self.data, &other.data)
    }

    fn sub_assign_with(&mut self, ctx: &ComputeContext, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        ctx.provider()
            .array_subtract_in_place(&mut self.data, &other.data)
    }

    fn mul_assign_with(&mut self, ctx: &ComputeContext, scalar: T) -> Result<()> {
        ctx.provider()
            .array_multiply_in_place(scalar, &mut self.data)
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the shapes differ.
impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        unwrap_op(self.checked_add(rhs))
    }
}

impl<T: Scalar> Add for Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: Matrix<T>) -> Matrix<T> {
        &self + &rhs
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the shapes differ.
impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        unwrap_op(self.checked_sub(rhs))
    }
}

impl<T: Scalar> Sub for Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: Matrix<T>) -> Matrix<T> {
        &self - &rhs
    }
}

/// Matrix product.
///
/// # Panics
///
/// Panics with `DimensionMismatch` unless `self.cols() == rhs.rows()`.
impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        unwrap_op(self.multiply(rhs))
    }
}

impl<T: Scalar> Mul for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        unwrap_op(self.multiply_vector(rhs))
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Matrix<T>) -> Vector<T> {
        unwrap_op(rhs.left_multiply_vector(self))
    }
}

impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        unwrap_op(self.checked_neg())
    }
}

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -&self
    }
}

impl<T: Scalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        unwrap_op(self.add_assign_with(&ComputeContext::default(), rhs));
    }
}

impl<T: Scalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        unwrap_op(self.sub_assign_with(&ComputeContext::default(), rhs));
    }
}

macro_rules! impl_matrix_scalar_ops {
    ($($t:ty),*) => {$(
        impl Mul<$t> for &Matrix<$t> {
            type Output = Matrix<$t>;

            fn mul(self, rhs: $t) -> Matrix<$t> {
                unwrap_op(self.checked_mul_scalar(rhs))
            }
        }

        impl Mul<$t> for Matrix<$t> {
            type Output = Matrix<$t>;

            fn mul(self, rhs: $t) -> Matrix<$t> {
                &self * rhs
            }
        }

        impl Mul<&Matrix<$t>> for $t {
            type Output = Matrix<$t>;

            fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                rhs * self
            }
        }

        /// # Panics
        ///
        /// Panics with `IllegalArgument(ZeroDivisor)` if `rhs` is zero.
        impl Div<$t> for &Matrix<$t> {
            type Output = Matrix<$t>;

            fn div(self, rhs: $t) -> Matrix<$t> {
                unwrap_op(self.checked_div_scalar(rhs))
            }
        }

        impl Div<$t> for Matrix<$t> {
            type Output = Matrix<$t>;

            fn div(self, rhs: $t) -> Matrix<$t> {
                &self / rhs
            }
        }

        impl Add<$t> for &Matrix<$t> {
            type Output = Matrix<$t>;

            fn add(self, rhs: $t) -> Matrix<$t> {
                unwrap_op(self.checked_add_scalar(rhs))
            }
        }

        impl Add<&Matrix<$t>> for $t {
            type Output = Matrix<$t>;

            fn add(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                rhs + self
            }
        }

        impl Sub<$t> for &Matrix<$t> {
            type Output = Matrix<$t>;

            fn sub(self, rhs: $t) -> Matrix<$t> {
                unwrap_op(self.checked_sub_scalar(rhs))
            }
        }

        impl Sub<&Matrix<$t>> for $t {
            type Output = Matrix<$t>;

            fn sub(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                unwrap_op(rhs.scalar_minus(self))
            }
        }

        impl MulAssign<$t> for Matrix<$t> {
            fn mul_assign(&mut self, rhs: $t) {
                unwrap_op(self.mul_assign_with(&ComputeContext::default(), rhs));
            }
        }
    )*};
}

impl_matrix_scalar_ops!(f32, f64, Complex32, Complex64);
