//! Symmetric tridiagonal and general tridiagonal matrices with band storage.
//!
//! This crate provides two structured matrix types that store only their nonzero bands,
//! using O(n) memory instead of O(n²), together with O(n) kernels that work on the bands
//! directly. Dense matrices are [`faer::Mat`]s; conversions to and from them are explicit.
//!
//! ## Matrix Types
//!
//! **[`SymTridiagonal`]**: Stores the diagonal `dv` and one off-diagonal `ev`. The
//! sub-diagonal is implied by symmetry. Only diagonal entries can be written, and
//! triangular trims widen the result into a [`Tridiagonal`].
//!
//! **[`Tridiagonal`]**: Stores the sub-diagonal `dl`, the diagonal `d` and the
//! super-diagonal `du`, plus an optional second super-diagonal `du2` that only exists
//! once the matrix has been through a pivoted LU factorization.
//!
//! Both types implement [`BandedMatrix`], which supplies bounds-checked indexing,
//! diagonal extraction, materialization and the multiply kernels. Entries may be plain
//! scalars (`f32`, `f64`, `Complex32`, `Complex64`) or small square blocks ([`Block`]);
//! see [`element`] for the capabilities each entry type provides.
//!
//! ## Algorithms
//!
//! - Sliding-window multiply `C := αSB + βC` and the bilinear form `xᴴSy`
//!   ([`algorithms::mul`]).
//! - The Usmani determinant recurrence, optionally shifted ([`algorithms::usmani`]).
//! - Pivoted tridiagonal LU with determinant and solves ([`algorithms::lu`]).
//! - Eigen-decomposition of real symmetric tridiagonal matrices, delegated to a
//!   pluggable collaborator with a [`faer`]-backed default ([`solvers`]).
//!
//! ## Example Usage
//!
//! The following example builds the 1D Laplacian, checks its determinant against the
//! closed form `n + 1`, applies it to a dense vector and computes its smallest
//! eigenvalue.
//!
//! ```rust
//! use banded_tridiag::{BandedMatrix, SymTridiagonal, Tridiagonal};
//! use faer::Mat;
//!
//! let n = 5;
//! let s = SymTridiagonal::<f64>::new(vec![2.0; n], vec![-1.0; n - 1]).unwrap();
//!
//! // Usmani recurrence, no dense matrix involved.
//! assert!((s.det() - (n as f64 + 1.0)).abs() < 1e-12);
//!
//! // O(n) product with a dense right-hand side.
//! let x = Mat::from_fn(n, 1, |_, _| 1.0);
//! let y = &s * x.as_ref();
//! assert_eq!(y[(0, 0)], 1.0);
//! assert_eq!(y[(2, 0)], 0.0);
//!
//! // Widening to the general type and solving through its LU factorization.
//! let t = Tridiagonal::from(&s);
//! let z = t.solve(&[1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
//! assert!(z.iter().all(|&v| (v - 1.0).abs() < 1e-12));
//!
//! // Smallest eigenvalue: 2 - 2 cos(π / (n + 1)).
//! let lambda = s.eigmin().unwrap();
//! let expected = 2.0 - 2.0 * (std::f64::consts::PI / (n as f64 + 1.0)).cos();
//! assert!((lambda - expected).abs() < 1e-12);
//! ```
//!
//! ## Errors
//!
//! Fallible operations return [`error::Result`]. Arithmetic operators panic on a
//! dimension mismatch, as `faer`'s dense operators do; their `checked_*` counterparts
//! return the error instead.

// Declare the modules that form the crate's API structure.
pub mod algorithms;
mod bands;
pub mod convert;
pub mod element;
pub mod error;
pub mod matrix;
pub mod ops;
pub mod solvers;
pub mod symtridiagonal;
pub mod tridiagonal;

// Re-export the main API for convenient access.
pub use algorithms::lu::TridiagonalLu;
pub use element::{BandElement, BandScalar, Block};
pub use error::{BandedError, BandedErrorKind};
pub use matrix::BandedMatrix;
pub use solvers::{EigenProblem, FaerEigensolver, SymmetricEigen, TridiagonalEigensolver};
pub use symtridiagonal::SymTridiagonal;
pub use tridiagonal::Tridiagonal;
