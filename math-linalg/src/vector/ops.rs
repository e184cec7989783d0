//! Vector arithmetic
//!
//! `*_with` methods run on an explicit [`ComputeContext`]; `checked_*` methods
//! use the default one. Operators call the checked methods and panic on error.

use super::Vector;
use crate::context::ComputeContext;
use crate::error::{ArgumentReason, LinalgError, Result, Shape, unwrap_op};
use crate::provider::LinearAlgebraProvider;
use crate::traits::Scalar;
use num_complex::{Complex32, Complex64};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

impl<T: Scalar> Vector<T> {
    fn check_same_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(LinalgError::mismatch(
                Shape::vector(self.len()),
                Shape::vector(other.len()),
            ));
        }
        Ok(())
    }

    /// `self + other`
    pub fn add_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        self.check_same_len(other)?;
        let mut result = vec![T::zero(); self.len()];
        ctx.provider()
            .array_add(self.as_slice(), other.as_slice(), &mut result)?;
        Ok(result.into())
    }

    /// `self - other`
    pub fn subtract_with(&self, ctx: &ComputeContext, other: &Self) -> Result<Self> {
        self.check_same_len(other)?;
        let mut result = vec![T::zero(); self.len()];
        ctx.provider()
            .array_subtract(self.as_slice(), other.as_slice(), &mut result)?;
        Ok(result.into())
    }

    /// `scalar * self`
    pub fn multiply_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        let mut result = vec![T::zero(); self.len()];
        ctx.provider()
            .array_multiply(scalar, self.as_slice(), &mut result)?;
        Ok(result.into())
    }

    /// `self / scalar`; a zero divisor is `IllegalArgument(ZeroDivisor)`
    pub fn divide_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        if scalar.is_zero() {
            return Err(LinalgError::illegal("scalar", ArgumentReason::ZeroDivisor));
        }
        self.multiply_with(ctx, T::one() / scalar)
    }

    /// `scalar + self`
    pub fn add_scalar_with(&self, ctx: &ComputeContext, scalar: T) -> Result<Self> {
        let mut result = vec![T::zero(); self.len()];
        ctx.provider()
            .array_add_scalar(scalar, self.as_slice(), &mut result)?;
        Ok(result.into())
    }

    /// `-self`
    pub fn negate_with(&self, ctx: &ComputeContext) -> Result<Self> {
        self.multiply_with(ctx, -T::one())
    }

    /// Σ selfᵢ · otherᵢ, without conjugation
    pub fn dot_with(&self, ctx: &ComputeContext, other: &Self) -> Result<T> {
        self.check_same_len(other)?;
        ctx.provider()
            .vector_dot_product(self.as_slice(), other.as_slice())
    }

    /// [`Vector::add_with`] on the default context
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.add_with(&ComputeContext::default(), other)
    }

    /// [`Vector::subtract_with`] on the default context
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.subtract_with(&ComputeContext::default(), other)
    }

    /// [`Vector::multiply_with`] on the default context
    pub fn checked_mul(&self, scalar: T) -> Result<Self> {
        self.multiply_with(&ComputeContext::default(), scalar)
    }

    /// [`Vector::divide_with`] on the default context
    pub fn checked_div(&self, scalar: T) -> Result<Self> {
        self.divide_with(&ComputeContext::default(), scalar)
    }

    /// [`Vector::add_scalar_with`] on the default context
    pub fn checked_add_scalar(&self, scalar: T) -> Result<Self> {
        self.add_scalar_with(&ComputeContext::default(), scalar)
    }

    /// [`Vector::negate_with`] on the default context
    pub fn checked_neg(&self) -> Result<Self> {
        self.negate_with(&ComputeContext::default())
    }

    /// [`Vector::dot_with`] on the default context
    pub fn dot(&self, other: &Self) -> Result<T> {
        self.dot_with(&ComputeContext::default(), other)
    }

    fn add_assign_with(&mut self, ctx: &ComputeContext, other: &Self) -> Result<()> {
        self.check_same_len(other)?;
        ctx.provider()
            .array_add_in_place(self.data.as_mut_slice(), other.as_slice())
    }

    fn sub_assign_with(&mut self, ctx: &ComputeContext, other: &Self) -> Result<()> {
        self.check_same_len(other)?;
        ctx.provider()
            .array_subtract_in_place(self.data.as_mut_slice(), other.as_slice())
    }

    fn mul_assign_with(&mut self, ctx: &ComputeContext, scalar: T) -> Result<()> {
        ctx.provider()
            .array_multiply_in_place(scalar, self.data.as_mut_slice())
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<T: Scalar> Add<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: &Vector<T>) -> Vector<T> {
        unwrap_op(self.checked_add(rhs))
    }
}

impl<T: Scalar> Add for Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: Vector<T>) -> Vector<T> {
        &self + &rhs
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<T: Scalar> Sub<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: &Vector<T>) -> Vector<T> {
        unwrap_op(self.checked_sub(rhs))
    }
}

impl<T: Scalar> Sub for Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: Vector<T>) -> Vector<T> {
        &self - &rhs
    }
}

/// Dot product.
///
/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<T: Scalar> Mul<&Vector<T>> for &Vector<T> {
    type Output = T;

    fn mul(self, rhs: &Vector<T>) -> T {
        unwrap_op(self.dot(rhs))
    }
}

impl<T: Scalar> Mul for Vector<T> {
    type Output = T;

    fn mul(self, rhs: Vector<T>) -> T {
        &self * &rhs
    }
}

impl<T: Scalar> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        unwrap_op(self.checked_neg())
    }
}

impl<T: Scalar> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        -&self
    }
}

impl<T: Scalar> AddAssign<&Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &Vector<T>) {
        unwrap_op(self.add_assign_with(&ComputeContext::default(), rhs));
    }
}

impl<T: Scalar> SubAssign<&Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &Vector<T>) {
        unwrap_op(self.sub_assign_with(&ComputeContext::default(), rhs));
    }
}

macro_rules! impl_vector_scalar_ops {
    ($($t:ty),*) => {$(
        impl Mul<$t> for &Vector<$t> {
            type Output = Vector<$t>;

            fn mul(self, rhs: $t) -> Vector<$t> {
                unwrap_op(self.checked_mul(rhs))
            }
        }

        impl Mul<$t> for Vector<$t> {
            type Output = Vector<$t>;

            fn mul(self, rhs: $t) -> Vector<$t> {
                &self * rhs
            }
        }

        impl Mul<&Vector<$t>> for $t {
            type Output = Vector<$t>;

            fn mul(self, rhs: &Vector<$t>) -> Vector<$t> {
                rhs * self
            }
        }

        impl Mul<Vector<$t>> for $t {
            type Output = Vector<$t>;

            fn mul(self, rhs: Vector<$t>) -> Vector<$t> {
                &rhs * self
            }
        }

        /// # Panics
        ///
        /// Panics with `IllegalArgument(ZeroDivisor)` if `rhs` is zero.
        impl Div<$t> for &Vector<$t> {
            type Output = Vector<$t>;

            fn div(self, rhs: $t) -> Vector<$t> {
                unwrap_op(self.checked_div(rhs))
            }
        }

        impl Div<$t> for Vector<$t> {
            type Output = Vector<$t>;

            fn div(self, rhs: $t) -> Vector<$t> {
                &self / rhs
            }
        }

        impl Add<$t> for &Vector<$t> {
            type Output = Vector<$t>;

            fn add(self, rhs: $t) -> Vector<$t> {
                unwrap_op(self.checked_add_scalar(rhs))
            }
        }

        impl Add<$t> for Vector<$t> {
            type Output = Vector<$t>;

            fn add(self, rhs: $t) -> Vector<$t> {
                &self + rhs
            }
        }

        impl Sub<$t> for &Vector<$t> {
            type Output = Vector<$t>;

            fn sub(self, rhs: $t) -> Vector<$t> {
                unwrap_op(self.checked_add_scalar(-rhs))
            }
        }

        impl Sub<$t> for Vector<$t> {
            type Output = Vector<$t>;

            fn sub(self, rhs: $t) -> Vector<$t> {
                &self - rhs
            }
        }

        impl MulAssign<$t> for Vector<$t> {
            fn mul_assign(&mut self, rhs: $t) {
                unwrap_op(self.mul_assign_with(&ComputeContext::default(), rhs));
            }
        }
    )*};
}

impl_vector_scalar_ops!(f32, f64, Complex32, Complex64);
