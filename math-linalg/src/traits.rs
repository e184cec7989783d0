//! Core numeric trait for vector and matrix elements
//!
//! [`Scalar`] abstracts over real and complex element types so that every
//! container, kernel and factorization is resolved statically per element type.
//! Magnitudes, norms and tolerances live in the associated [`Scalar::Real`] type.

use num_complex::{Complex32, Complex64};
use num_traits::{Float, FromPrimitive, NumAssign, One, ToPrimitive, Zero};
use std::fmt::{Debug, Display};
use std::ops::Neg;

/// Absolute tolerance of the epsilon-zero test used by `coerce_zero`,
/// the zero norm and symmetry checks.
pub const ZERO_TOLERANCE: f64 = 1.0e-9;

/// Trait for element types that can be stored in vectors and matrices.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for most uses)
/// - `f32` (for memory-constrained uses)
/// - `Complex64`
/// - `Complex32`
pub trait Scalar:
    NumAssign
    + Clone
    + Copy
    + Send
    + Sync
    + Debug
    + Display
    + Zero
    + One
    + Neg<Output = Self>
    + 'static
{
    /// The real number type underlying this field
    type Real: Float
        + NumAssign
        + FromPrimitive
        + ToPrimitive
        + Send
        + Sync
        + Debug
        + Display
        + 'static;

    /// Complex conjugate
    fn conj(&self) -> Self;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> Self::Real;

    /// Magnitude |z|
    fn modulus(&self) -> Self::Real {
        self.norm_sqr().sqrt()
    }

    /// Create from a real value
    fn from_real(r: Self::Real) -> Self;

    /// Real part
    fn re(&self) -> Self::Real;

    /// Imaginary part
    fn im(&self) -> Self::Real;

    /// Check if this is within `tol` of zero
    fn is_zero_approx(&self, tol: Self::Real) -> bool {
        self.modulus() <= tol
    }

    /// Epsilon-zero test with [`ZERO_TOLERANCE`]
    fn is_negligible(&self) -> bool {
        self.is_zero_approx(Self::tolerance())
    }

    /// [`ZERO_TOLERANCE`] in the real type of this field
    fn tolerance() -> Self::Real {
        Self::Real::from_f64(ZERO_TOLERANCE).unwrap_or_else(Self::Real::epsilon)
    }

    /// Square root
    fn sqrt(&self) -> Self;
}

/// Convert a count into a real value
#[inline]
pub(crate) fn real_from_count<R: Float + FromPrimitive>(count: usize) -> R {
    R::from_usize(count).unwrap_or_else(R::infinity)
}

impl Scalar for Complex64 {
    type Real = f64;

    #[inline]
    fn conj(&self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn modulus(&self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex64::new(r, 0.0)
    }

    #[inline]
    fn re(&self) -> f64 {
        self.re
    }

    #[inline]
    fn im(&self) -> f64 {
        self.im
    }

    #[inline]
    fn sqrt(&self) -> Self {
        Complex64::sqrt(*self)
    }
}

impl Scalar for Complex32 {
    type Real = f32;

    #[inline]
    fn conj(&self) -> Self {
        Complex32::conj(self)
    }

    #[inline]
    fn norm_sqr(&self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn modulus(&self) -> f32 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn from_real(r: f32) -> Self {
        Complex32::new(r, 0.0)
    }

    #[inline]
    fn re(&self) -> f32 {
        self.re
    }

    #[inline]
    fn im(&self) -> f32 {
        self.im
    }

    #[inline]
    fn sqrt(&self) -> Self {
        Complex32::sqrt(*self)
    }
}

impl Scalar for f64 {
    type Real = f64;

    #[inline]
    fn conj(&self) -> Self {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        *self * *self
    }

    #[inline]
    fn modulus(&self) -> f64 {
        f64::abs(*self)
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn re(&self) -> f64 {
        *self
    }

    #[inline]
    fn im(&self) -> f64 {
        0.0
    }

    #[inline]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }
}

impl Scalar for f32 {
    type Real = f32;

    #[inline]
    fn conj(&self) -> Self {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f32 {
        *self * *self
    }

    #[inline]
    fn modulus(&self) -> f32 {
        f32::abs(*self)
    }

    #[inline]
    fn from_real(r: f32) -> Self {
        r
    }

    #[inline]
    fn re(&self) -> f32 {
        *self
    }

    #[inline]
    fn im(&self) -> f32 {
        0.0
    }

    #[inline]
    fn sqrt(&self) -> Self {
        f32::sqrt(*self)
    }
}
