//! This module defines the custom error types for the library.
//!
//! Every failure a band matrix operation can report is collected in a single enum,
//! [`BandedErrorKind`], and surfaced through the public wrapper [`BandedError`].
//! Failures are raised synchronously at the offending call; an instance that existed
//! before the call is left exactly as it was.
//!
//! Display messages come from [`thiserror`]. [`faer::linalg::evd::EvdError`] is not a
//! [`std::error::Error`], so it is carried as a plain payload and printed with `Debug`.
use thiserror::Error;

/// Represents all possible errors that can occur when building or operating on a
/// banded matrix.
///
/// Use [`BandedError::kind`] to match on the specific failure.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct BandedError(#[from] BandedErrorKind);

impl BandedError {
    /// Returns the specific kind of this error.
    pub fn kind(&self) -> &BandedErrorKind {
        &self.0
    }

    pub(crate) fn dimension_mismatch(msg: impl Into<String>) -> Self {
        BandedErrorKind::DimensionMismatch(msg.into()).into()
    }

    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        BandedErrorKind::ArgumentError(msg.into()).into()
    }
}

/// The distinct kinds of errors.
#[derive(Error, Debug, PartialEq)]
pub enum BandedErrorKind {
    /// Band lengths violate the storage invariant of a `SymTridiagonal`, or the
    /// operands of an arithmetic, multiply or solve call have incompatible sizes.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// An argument is outside its admissible set: a dimension below 1, a diagonal
    /// offset beyond the matrix order, a write to a structurally zero position, or a
    /// matrix that is required to be symmetric but is not.
    #[error("Invalid argument: {0}")]
    ArgumentError(String),

    /// An entry index lies outside the matrix.
    #[error("Index ({row}, {col}) is out of bounds for a {nrows}x{ncols} matrix.")]
    OutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// The U factor of an LU factorization has an exact zero on its diagonal.
    #[error("Matrix is singular: zero pivot in U at position {index}.")]
    Singular { index: usize },

    /// Wraps an error originating from [`faer`]'s eigendecomposition module.
    #[error("A numerical error occurred in the eigensolver: {0:?}")]
    EvdError(faer::linalg::evd::EvdError),
}

// Manually implement PartialEq for the public error type.
// We compare the inner `BandedErrorKind`.
impl PartialEq for BandedError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

pub type Result<T, E = BandedError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_error_message() {
        let error = BandedError::dimension_mismatch("ev has length 5 but dv has length 3");
        assert_eq!(
            error.to_string(),
            "Dimension mismatch: ev has length 5 but dv has length 3"
        );
        assert!(matches!(
            error.kind(),
            BandedErrorKind::DimensionMismatch(_)
        ));
    }

    #[test]
    fn test_argument_error_message() {
        let error = BandedError::argument("cannot set off-diagonal entry (0, 2)");
        assert_eq!(
            error.to_string(),
            "Invalid argument: cannot set off-diagonal entry (0, 2)"
        );
    }

    #[test]
    fn test_out_of_bounds_error_message() {
        let error = BandedError::from(BandedErrorKind::OutOfBounds {
            row: 4,
            col: 0,
            nrows: 3,
            ncols: 3,
        });
        assert_eq!(
            error.to_string(),
            "Index (4, 0) is out of bounds for a 3x3 matrix."
        );
    }

    #[test]
    fn test_singular_error_message() {
        let error = BandedError::from(BandedErrorKind::Singular { index: 2 });
        assert_eq!(
            error.to_string(),
            "Matrix is singular: zero pivot in U at position 2."
        );
    }

    #[test]
    fn test_evd_error_message() {
        let evd_error = faer::linalg::evd::EvdError::NoConvergence;
        let error = BandedError(BandedErrorKind::EvdError(evd_error));
        // Note: The message uses the `Debug` format for the inner error.
        let expected_message = "A numerical error occurred in the eigensolver: NoConvergence";
        assert_eq!(error.to_string(), expected_message);
    }
}
