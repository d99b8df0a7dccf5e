//! LU factorization of a general tridiagonal matrix with partial pivoting.
//!
//! Row interchanges between rows `i` and `i + 1` let fill-in appear two places above
//! the diagonal, so the U factor of `P A = L U` is banded with bandwidth 2. The
//! factorization overwrites the bands of the input in place:
//!
//! - `dl` holds the multipliers of the unit lower bidiagonal L,
//! - `d`, `du` and the second superdiagonal `du2` hold U,
//! - `ipiv[i]` is the row interchanged with row `i` (either `i` or `i + 1`).
//!
//! This is the only place where a [`Tridiagonal`] acquires its `du2` band.

use crate::{
    bands,
    element::BandScalar,
    error::{BandedError, BandedErrorKind, Result},
    tridiagonal::Tridiagonal,
};
use faer::MatMut;

/// The factors of `P A = L U` for a tridiagonal `A`.
#[derive(Clone, Debug)]
pub struct TridiagonalLu<T> {
    factors: Tridiagonal<T>,
    ipiv: Vec<usize>,
    zero_pivot: Option<usize>,
}

impl<T: BandScalar> TridiagonalLu<T> {
    /// Factorizes `matrix`, consuming its storage.
    ///
    /// A zero on the diagonal of U does not abort the factorization; it is recorded and
    /// reported by [`is_singular`](Self::is_singular) and by every solve.
    pub fn factorize(matrix: Tridiagonal<T>) -> Self {
        let Tridiagonal {
            mut dl,
            mut d,
            mut du,
            du2,
        } = matrix;
        let n = d.len();

        // Reuse an existing second superdiagonal when it already has the right length.
        let mut du2 = match du2 {
            Some(mut buf) if buf.len() == n.saturating_sub(2) => {
                bands::fill(&mut buf, &T::zero());
                buf
            }
            _ => bands::zeros(n.saturating_sub(2)),
        };
        let mut ipiv: Vec<usize> = (0..n).collect();
        let mut interchanges = 0usize;

        for i in 0..n.saturating_sub(1) {
            if d[i].magnitude() >= dl[i].magnitude() {
                // No interchange.
                if !d[i].is_zero() {
                    let fact = dl[i] / d[i];
                    dl[i] = fact;
                    d[i + 1] = d[i + 1] - fact * du[i];
                }
            } else {
                let fact = d[i] / dl[i];
                d[i] = dl[i];
                dl[i] = fact;
                let tmp = du[i];
                du[i] = d[i + 1];
                d[i + 1] = tmp - fact * d[i + 1];
                if i + 2 < n {
                    du2[i] = du[i + 1];
                    du[i + 1] = -fact * du[i + 1];
                }
                ipiv[i] = i + 1;
                interchanges += 1;
            }
        }

        let zero_pivot = d.iter().position(|x| x.is_zero());
        log::debug!(
            "tridiagonal LU of order {n}: {interchanges} row interchanges, zero pivot: {zero_pivot:?}"
        );

        Self {
            factors: Tridiagonal {
                dl,
                d,
                du,
                du2: Some(du2),
            },
            ipiv,
            zero_pivot,
        }
    }

    /// The packed factors: multipliers of L in `dl`, U in `d`, `du` and `du2`.
    pub fn factors(&self) -> &Tridiagonal<T> {
        &self.factors
    }

    /// Row interchanges: row `i` was swapped with row `pivots()[i]`.
    pub fn pivots(&self) -> &[usize] {
        &self.ipiv
    }

    pub fn order(&self) -> usize {
        self.factors.d.len()
    }

    /// Index of the first exact zero on the diagonal of U, if any.
    pub fn zero_pivot(&self) -> Option<usize> {
        self.zero_pivot
    }

    pub fn is_singular(&self) -> bool {
        self.zero_pivot.is_some()
    }

    /// `det(A)`: the product of U's diagonal, negated once per row interchange.
    pub fn determinant(&self) -> T {
        let mut det = T::one();
        for (i, &p) in self.ipiv.iter().enumerate() {
            det = det * self.factors.d[i];
            if p != i {
                det = -det;
            }
        }
        det
    }

    /// Solves `A x = rhs`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `rhs` does not have length `n`, `Singular` if U has a
    /// zero pivot.
    pub fn solve(&self, rhs: &[T]) -> Result<Vec<T>> {
        let mut x = rhs.to_vec();
        self.solve_vec_in_place(&mut x)?;
        Ok(x)
    }

    /// Solves `A x = b`, overwriting `b` with `x`.
    pub fn solve_vec_in_place(&self, b: &mut [T]) -> Result<()> {
        self.check_solvable(b.len())?;
        self.substitute(b);
        Ok(())
    }

    /// Solves `A X = B` for every column of `b`, overwriting `b` with `X`.
    pub fn solve_in_place(&self, mut b: MatMut<'_, T>) -> Result<()> {
        self.check_solvable(b.nrows())?;
        let n = b.nrows();
        let mut column = Vec::with_capacity(n);
        for j in 0..b.ncols() {
            column.clear();
            column.extend((0..n).map(|i| b[(i, j)]));
            self.substitute(&mut column);
            for (i, &x) in column.iter().enumerate() {
                b[(i, j)] = x;
            }
        }
        Ok(())
    }

    fn check_solvable(&self, rhs_len: usize) -> Result<()> {
        if rhs_len != self.order() {
            return Err(BandedError::dimension_mismatch(format!(
                "matrix has order {} but right-hand side has {rhs_len} rows",
                self.order()
            )));
        }
        if let Some(index) = self.zero_pivot {
            return Err(BandedErrorKind::Singular { index }.into());
        }
        Ok(())
    }

    // Forward substitution with L and the interchanges, then back substitution with U.
    fn substitute(&self, x: &mut [T]) {
        let n = x.len();
        if n == 0 {
            return;
        }
        let Tridiagonal { dl, d, du, .. } = &self.factors;
        let du2 = self.factors.du2.as_deref().unwrap_or(&[]);

        for i in 0..n - 1 {
            let ip = self.ipiv[i];
            let other = if ip == i { i + 1 } else { i };
            let tmp = x[other] - dl[i] * x[ip];
            x[i] = x[ip];
            x[i + 1] = tmp;
        }

        x[n - 1] = x[n - 1] / d[n - 1];
        if n > 1 {
            x[n - 2] = (x[n - 2] - du[n - 2] * x[n - 1]) / d[n - 2];
        }
        for i in (0..n.saturating_sub(2)).rev() {
            x[i] = (x[i] - du[i] * x[i + 1] - du2[i] * x[i + 2]) / d[i];
        }
    }
}
