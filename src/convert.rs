//! Conversions between dense matrices and the band types, and between the two band
//! types.
//!
//! | from → to                          | checked?                                  |
//! |------------------------------------|-------------------------------------------|
//! | dense → [`Tridiagonal`]            | square only; off-band entries are dropped |
//! | dense → [`SymTridiagonal`]         | square, bands must be symmetric           |
//! | [`SymTridiagonal`] → [`Tridiagonal`] | never fails (mirrors `ev`)              |
//! | [`Tridiagonal`] → [`SymTridiagonal`] | must be symmetric                       |
//!
//! Dense → band conversion only inspects the three central diagonals; entries outside
//! the band are discarded without being checked.

use crate::{
    bands,
    element::BandElement,
    error::{BandedError, Result},
    matrix::{dense_band, square_order},
    symtridiagonal::SymTridiagonal,
    tridiagonal::Tridiagonal,
};
use faer::MatRef;

impl<T: BandElement> SymTridiagonal<T> {
    /// Extracts `dv = diag(A, 0)` and `ev = diag(A, 1)` from a dense matrix.
    ///
    /// # Errors
    /// `DimensionMismatch` if `a` is not square. `ArgumentError` unless
    /// `diag(A, 1) == transpose(diag(A, -1))` and every diagonal entry is symmetric.
    pub fn from_dense(a: MatRef<'_, T>) -> Result<Self> {
        square_order(a)?;
        let dv = dense_band(a, 0);
        let ev = dense_band(a, 1);
        let sub = dense_band(a, -1);
        let symmetric = dv.iter().all(BandElement::is_self_symmetric)
            && ev.iter().zip(&sub).all(|(u, l)| *u == l.transpose());
        if !symmetric {
            return Err(BandedError::argument(
                "matrix is not symmetric; cannot convert to SymTridiagonal",
            ));
        }
        Self::new(dv, ev)
    }
}

impl<T: BandElement> Tridiagonal<T> {
    /// Extracts `diag(A, -1)`, `diag(A, 0)` and `diag(A, 1)` from a dense matrix.
    ///
    /// # Errors
    /// `DimensionMismatch` if `a` is not square.
    pub fn from_dense(a: MatRef<'_, T>) -> Result<Self> {
        square_order(a)?;
        Self::new(dense_band(a, -1), dense_band(a, 0), dense_band(a, 1))
    }
}

/// Widens a symmetric matrix: `dl = transpose(ev)`, `d = symmetrize(dv)`, `du = ev`.
impl<T: BandElement> From<&SymTridiagonal<T>> for Tridiagonal<T> {
    fn from(s: &SymTridiagonal<T>) -> Self {
        let ev = s.effective_ev();
        Tridiagonal {
            dl: bands::map(ev, T::transpose),
            d: bands::map(&s.dv, T::symmetrize),
            du: ev.to_vec(),
            du2: None,
        }
    }
}

impl<T: BandElement> From<SymTridiagonal<T>> for Tridiagonal<T> {
    fn from(s: SymTridiagonal<T>) -> Self {
        Tridiagonal::from(&s)
    }
}

impl<T: BandElement> TryFrom<&Tridiagonal<T>> for SymTridiagonal<T> {
    type Error = BandedError;

    fn try_from(t: &Tridiagonal<T>) -> Result<Self> {
        t.to_symtridiagonal()
    }
}

impl<T: BandElement> TryFrom<Tridiagonal<T>> for SymTridiagonal<T> {
    type Error = BandedError;

    fn try_from(t: Tridiagonal<T>) -> Result<Self> {
        if !t.is_symmetric() {
            return Err(BandedError::argument(
                "matrix is not symmetric; cannot convert to SymTridiagonal",
            ));
        }
        let (_, d, du) = t.into_bands();
        SymTridiagonal::new(d, du)
    }
}
