//! Structured O(n) kernels operating directly on band storage.
//!
//! - [`mul`]: sliding-window matrix-matrix, matrix-vector and bilinear-form kernels.
//! - [`usmani`]: the three-term determinant recurrence.
//! - [`lu`]: pivoted LU factorization of a general tridiagonal matrix.
//!
//! ** NOTE: Most callers should go through the methods on [`crate::SymTridiagonal`],
//! [`crate::Tridiagonal`] and [`crate::BandedMatrix`]. The free functions here are
//! public for callers who work with raw bands.

pub mod lu;
pub mod mul;
pub mod usmani;
