//! Error types for linear algebra operations.
//!
//! Every public operation validates its arguments before touching storage and
//! reports failures through [`LinalgError`]. Outputs are always freshly
//! allocated, so a failed operation leaves its operands untouched.

use crate::provider::ProviderKind;
use std::fmt;
use thiserror::Error;

/// Shape of an operand, reported by [`LinalgError::DimensionMismatch`].
///
/// Vectors are reported as `len × 1` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl Shape {
    /// Shape of a `rows × cols` matrix
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape of a vector of length `len`
    pub const fn vector(len: usize) -> Self {
        Self { rows: len, cols: 1 }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.rows, self.cols)
    }
}

/// Why an argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentReason {
    /// A count or size parameter must be strictly positive
    NotPositive,
    /// Two parameters that must differ are the same
    Duplicate,
    /// The parameter value is meaningless for the operation
    Invalid,
    /// Slice or sequence lengths disagree
    LengthMismatch,
    /// Division by a zero scalar
    ZeroDivisor,
}

impl fmt::Display for ArgumentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ArgumentReason::NotPositive => "parameter must be positive",
            ArgumentReason::Duplicate => "parameters must be distinct",
            ArgumentReason::Invalid => "invalid parameter",
            ArgumentReason::LengthMismatch => "parameter lengths do not match",
            ArgumentReason::ZeroDivisor => "division by zero",
        };
        f.write_str(text)
    }
}

/// Why an operation cannot be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotSupportedReason {
    /// The operation is only defined for square matrices
    NonSquare,
    /// The selected compute backend is not usable in this build
    Backend(ProviderKind),
    /// The operation is declared but has no implementation
    Unimplemented(&'static str),
}

impl fmt::Display for NotSupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotSupportedReason::NonSquare => f.write_str("only defined for square matrices"),
            NotSupportedReason::Backend(kind) => write!(f, "{kind} backend is not available"),
            NotSupportedReason::Unimplemented(op) => write!(f, "{op} is not implemented"),
        }
    }
}

/// Errors that can occur in vector and matrix operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LinalgError {
    /// A size or position argument lies outside its valid domain.
    #[error("argument `{name}` out of range: {value}")]
    ArgumentOutOfRange {
        /// Name of the offending argument
        name: &'static str,
        /// The rejected value, as displayed
        value: String,
    },

    /// An argument was rejected for the given reason.
    #[error("illegal argument `{name}`: {reason}")]
    IllegalArgument {
        /// Name of the offending argument
        name: &'static str,
        /// Why it was rejected
        reason: ArgumentReason,
    },

    /// Element access outside the container bounds.
    #[error("index `{name}` out of range: {index} (bound {bound})")]
    IndexOutOfRange {
        /// Which index was wrong (`index`, `row`, `column`)
        name: &'static str,
        /// The rejected index
        index: usize,
        /// The exclusive upper bound
        bound: usize,
    },

    /// Operand shapes are incompatible.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Shape of the left operand
        left: Shape,
        /// Shape of the right operand
        right: Shape,
    },

    /// The operation's precondition is not met.
    #[error("operation not supported: {0}")]
    NotSupported(NotSupportedReason),

    /// The matrix is singular, so it has no inverse and no unique solution.
    #[error("matrix is singular")]
    Singular,
}

/// A specialized `Result` type for linear algebra operations.
pub type Result<T> = std::result::Result<T, LinalgError>;

/// Operator overloads cannot return errors; they panic with the message.
#[track_caller]
pub(crate) fn unwrap_op<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl LinalgError {
    pub(crate) fn out_of_range(name: &'static str, value: impl fmt::Display) -> Self {
        LinalgError::ArgumentOutOfRange {
            name,
            value: value.to_string(),
        }
    }

    pub(crate) fn index(name: &'static str, index: usize, bound: usize) -> Self {
        LinalgError::IndexOutOfRange { name, index, bound }
    }

    pub(crate) fn illegal(name: &'static str, reason: ArgumentReason) -> Self {
        LinalgError::IllegalArgument { name, reason }
    }

    pub(crate) fn mismatch(left: Shape, right: Shape) -> Self {
        LinalgError::DimensionMismatch { left, right }
    }

    /// Returns `true` if this is a shape or length incompatibility.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            LinalgError::DimensionMismatch { .. }
                | LinalgError::IllegalArgument {
                    reason: ArgumentReason::LengthMismatch,
                    ..
                }
        )
    }

    /// Returns `true` if an index or range argument was out of bounds.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            LinalgError::ArgumentOutOfRange { .. } | LinalgError::IndexOutOfRange { .. }
        )
    }

    /// Returns `true` if the operation or backend is not supported.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, LinalgError::NotSupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = LinalgError::mismatch(Shape::new(2, 3), Shape::new(4, 5));
        assert_eq!(err.to_string(), "dimension mismatch: 2×3 vs 4×5");
    }

    #[test]
    fn test_zero_divisor_display() {
        let err = LinalgError::illegal("scalar", ArgumentReason::ZeroDivisor);
        assert_eq!(err.to_string(), "illegal argument `scalar`: division by zero");
    }

    #[test]
    fn test_backend_display() {
        let err = LinalgError::NotSupported(NotSupportedReason::Backend(ProviderKind::Cuda));
        assert_eq!(
            err.to_string(),
            "operation not supported: CUDA backend is not available"
        );
    }

    #[test]
    fn test_categories() {
        let dim = LinalgError::mismatch(Shape::vector(3), Shape::vector(4));
        let len = LinalgError::illegal("y", ArgumentReason::LengthMismatch);
        let idx = LinalgError::index("row", 5, 3);
        let range = LinalgError::out_of_range("p", -1.5);
        let square = LinalgError::NotSupported(NotSupportedReason::NonSquare);

        assert!(dim.is_dimension_error());
        assert!(len.is_dimension_error());
        assert!(!idx.is_dimension_error());
        assert!(idx.is_range_error());
        assert!(range.is_range_error());
        assert_eq!(range.to_string(), "argument `p` out of range: -1.5");
        assert!(square.is_not_supported());
        assert!(!square.is_range_error());
    }
}
