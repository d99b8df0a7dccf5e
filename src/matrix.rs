//! This module defines the indexing protocol shared by the band matrix types.
//!
//! Generic dense algorithms rarely need to know how a matrix is stored; they ask for
//! its size and read or write individual entries. [`BandedMatrix`] formalizes that
//! contract for tridiagonal storage. An implementor only describes its three bands
//! (sub-, main and super-diagonal entries) and how writes are restricted; everything
//! else is derived here:
//!
//! 1.  **Indexing**: bounds-checked [`get`](BandedMatrix::get), [`size`](BandedMatrix::size)
//!     and [`size_of`](BandedMatrix::size_of), and diagonal extraction via
//!     [`diag`](BandedMatrix::diag).
//! 2.  **Materialization**: [`to_dense`](BandedMatrix::to_dense) builds a [`faer::Mat`].
//! 3.  **Kernels**: multiplication and the bilinear form run the O(n) sliding-window
//!     kernels of [`crate::algorithms::mul`] over the band accessors, so the dense
//!     matrix is never formed.

use crate::{
    algorithms::mul,
    bands,
    element::BandElement,
    error::{BandedError, BandedErrorKind, Result},
};
use faer::{Mat, MatMut, MatRef};

/// A square matrix whose nonzero entries lie on the main diagonal and the first sub-
/// and super-diagonal.
///
/// # Type Parameters
///
/// *   `T`: The entry type. Plain scalars and block entries are both supported through
///     [`BandElement`].
pub trait BandedMatrix<T: BandElement> {
    /// Returns the order `n` of the `n`x`n` matrix.
    fn order(&self) -> usize;

    /// Entry `(i, i)`.
    fn diag_entry(&self, i: usize) -> T;

    /// Entry `(i + 1, i)`.
    fn sub_entry(&self, i: usize) -> T;

    /// Entry `(i, i + 1)`.
    fn super_entry(&self, i: usize) -> T;

    /// Writes entry `(i, j)`, subject to the structural restrictions of the storage.
    fn set(&mut self, i: usize, j: usize, value: T) -> Result<()>;

    /// Number of elements held in band storage.
    fn stored_len(&self) -> usize;

    /// Returns `(n, n)`.
    #[inline]
    fn size(&self) -> (usize, usize) {
        (self.order(), self.order())
    }

    /// Returns the extent along the 1-based dimension `dim`.
    ///
    /// Dimensions 1 and 2 are the rows and columns; every trailing dimension has extent 1.
    fn size_of(&self, dim: usize) -> Result<usize> {
        match dim {
            0 => Err(BandedError::argument(format!(
                "dimension must be at least 1, got {dim}"
            ))),
            1 | 2 => Ok(self.order()),
            _ => Ok(1),
        }
    }

    /// Fails with `OutOfBounds` unless `(i, j)` addresses an entry of the matrix.
    fn check_bounds(&self, i: usize, j: usize) -> Result<()> {
        let n = self.order();
        if i >= n || j >= n {
            return Err(BandedErrorKind::OutOfBounds {
                row: i,
                col: j,
                nrows: n,
                ncols: n,
            }
            .into());
        }
        Ok(())
    }

    /// Reads entry `(i, j)`, returning zero outside the band.
    fn get(&self, i: usize, j: usize) -> Result<T> {
        self.check_bounds(i, j)?;
        Ok(band_entry(self, i, j))
    }

    /// Extracts the `k`-th diagonal into a freshly allocated vector.
    ///
    /// `k = 0` is the main diagonal, positive `k` lies above it. Diagonals outside the
    /// band are returned as zeros of the correct length `n - |k|`.
    ///
    /// # Errors
    ///
    /// `ArgumentError` if `|k| > n` for a nonzero `k`.
    fn diag(&self, k: isize) -> Result<Vec<T>> {
        let n = self.order();
        bands::check_diagonal_offset(k, n)?;
        let len = n - k.unsigned_abs();
        Ok(match k {
            0 => (0..len).map(|i| self.diag_entry(i)).collect(),
            1 => (0..len).map(|i| self.super_entry(i)).collect(),
            -1 => (0..len).map(|i| self.sub_entry(i)).collect(),
            _ => bands::zeros(len),
        })
    }

    /// Materializes the full `n`x`n` matrix with zeros outside the band.
    fn to_dense(&self) -> Mat<T> {
        let n = self.order();
        Mat::from_fn(n, n, |i, j| band_entry(self, i, j))
    }

    /// Computes `c := alpha * self * b + beta * c`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the shapes of `self`, `b` and `c` are incompatible.
    fn mul_add(&self, alpha: &T, b: MatRef<'_, T>, beta: &T, c: MatMut<'_, T>) -> Result<()> {
        mul::mul_add(self, alpha, b, beta, c)
    }

    /// Applies the matrix to every column of `rhs`, returning an owned result.
    fn apply(&self, rhs: MatRef<'_, T>) -> Result<Mat<T>> {
        let mut out = Mat::from_fn(self.order(), rhs.ncols(), |_, _| T::zero());
        self.mul_add(&T::one(), rhs, &T::zero(), out.as_mut())?;
        Ok(out)
    }

    /// Matrix-vector product.
    fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        mul::mul_vec(self, x)
    }

    /// The bilinear form `x^H * self * y`.
    ///
    /// Empty operands of matching length yield zero.
    fn dot(&self, x: &[T], y: &[T]) -> Result<T> {
        mul::dot(x, self, y)
    }
}

/// Entry `(i, j)` of a banded matrix without bounds checking.
#[inline]
pub(crate) fn band_entry<T, M>(matrix: &M, i: usize, j: usize) -> T
where
    T: BandElement,
    M: BandedMatrix<T> + ?Sized,
{
    if i == j {
        matrix.diag_entry(i)
    } else if i == j + 1 {
        matrix.sub_entry(j)
    } else if i + 1 == j {
        matrix.super_entry(i)
    } else {
        T::zero()
    }
}

/// Checks that a dense matrix is square, returning its order.
pub(crate) fn square_order<T>(a: MatRef<'_, T>) -> Result<usize> {
    if a.nrows() != a.ncols() {
        return Err(BandedError::dimension_mismatch(format!(
            "matrix must be square, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    Ok(a.nrows())
}

/// Extracts the `k`-th diagonal of a square dense matrix, `k` in `-1..=1`.
pub(crate) fn dense_band<T: Clone>(a: MatRef<'_, T>, k: isize) -> Vec<T> {
    let n = a.nrows();
    match k {
        0 => (0..n).map(|i| a[(i, i)].clone()).collect(),
        1 => (0..n.saturating_sub(1)).map(|i| a[(i, i + 1)].clone()).collect(),
        _ => (0..n.saturating_sub(1)).map(|i| a[(i + 1, i)].clone()).collect(),
    }
}
