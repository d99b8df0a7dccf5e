//! Symmetric tridiagonal matrices.
//!
//! A [`SymTridiagonal`] stores the diagonal `dv` and the super-diagonal `ev` only; the
//! sub-diagonal is the transpose of `ev`. `ev` may hold either `n - 1` or `n` entries.
//! The trailing entry of a length-`n` `ev` is carried along but never read: all
//! accessors go through [`SymTridiagonal::effective_ev`], which reconciles the two
//! layouts in one place.
//!
//! Only the diagonal can be written. A write to a single off-diagonal entry would break
//! symmetry, and a one-sided triangular trim cannot be represented at all, so
//! [`tril`](SymTridiagonal::tril) and [`triu`](SymTridiagonal::triu) widen the result to
//! a general [`Tridiagonal`].

use crate::{
    algorithms::usmani::det_usmani,
    bands,
    element::{BandElement, BandScalar},
    error::{BandedError, Result},
    matrix::BandedMatrix,
    tridiagonal::{Tridiagonal, check_same_order},
};

/// An `n`x`n` symmetric tridiagonal matrix.
#[derive(Clone, Debug)]
pub struct SymTridiagonal<T> {
    pub(crate) dv: Vec<T>,
    pub(crate) ev: Vec<T>,
}

impl<T: BandElement> SymTridiagonal<T> {
    /// Creates a symmetric tridiagonal matrix from its diagonal and super-diagonal.
    ///
    /// # Errors
    /// `DimensionMismatch` unless `dv.len() - 1 <= ev.len() <= dv.len()`.
    pub fn new(dv: Vec<T>, ev: Vec<T>) -> Result<Self> {
        bands::check_symmetric_lengths(dv.len(), ev.len())?;
        Ok(Self { dv, ev })
    }

    /// An `n`x`n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            dv: bands::zeros(n),
            ev: bands::zeros(bands::offdiag_len(n)),
        }
    }

    /// The stored diagonal.
    pub fn dv(&self) -> &[T] {
        &self.dv
    }

    /// The stored super-diagonal, including a trailing entry if one was supplied.
    pub fn ev(&self) -> &[T] {
        &self.ev
    }

    /// The first `n - 1` entries of `ev`: the part that belongs to the matrix.
    #[inline]
    pub fn effective_ev(&self) -> &[T] {
        &self.ev[..bands::offdiag_len(self.dv.len())]
    }

    pub fn into_bands(self) -> (Vec<T>, Vec<T>) {
        (self.dv, self.ev)
    }

    /// Always `true` for scalar entries; for block entries every diagonal block must be
    /// symmetric.
    pub fn is_symmetric(&self) -> bool {
        self.dv.iter().all(BandElement::is_self_symmetric)
    }

    /// `true` iff the matrix is symmetric and all entries are real.
    pub fn is_hermitian(&self) -> bool {
        self.is_symmetric()
            && self.dv.iter().all(BandElement::is_real)
            && self.effective_ev().iter().all(BandElement::is_real)
    }

    pub fn is_diagonal(&self) -> bool {
        bands::all_zero(self.effective_ev())
    }

    pub fn is_zero(&self) -> bool {
        bands::all_zero(self.effective_ev()) && bands::all_zero(&self.dv)
    }

    pub fn is_one(&self) -> bool {
        bands::all_zero(self.effective_ev()) && bands::all_one(&self.dv)
    }

    /// Returns `true` if every entry below the `k`-th diagonal is zero.
    pub fn is_triu(&self, k: isize) -> bool {
        match k {
            k if k <= -1 => true,
            0 => self.is_diagonal(),
            _ => self.is_zero(),
        }
    }

    /// Returns `true` if every entry above the `k`-th diagonal is zero.
    pub fn is_tril(&self, k: isize) -> bool {
        self.is_triu(-k)
    }

    /// Lower triangular part on and below the `k`-th diagonal.
    ///
    /// The result is always a [`Tridiagonal`]: zeroing one triangle breaks symmetry.
    /// `self` is not modified and the result owns fresh storage.
    ///
    /// # Errors
    /// `ArgumentError` unless `-n - 1 <= k <= n - 1`.
    pub fn tril(&self, k: isize) -> Result<Tridiagonal<T>> {
        bands::check_tril_offset(k, self.order())?;
        log::debug!("widening SymTridiagonal of order {} for tril({k})", self.order());
        let mut t = Tridiagonal::from(self);
        t.tril_mut(k)?;
        Ok(t)
    }

    /// Upper triangular part on and above the `k`-th diagonal.
    ///
    /// The result is always a [`Tridiagonal`]: zeroing one triangle breaks symmetry.
    /// `self` is not modified and the result owns fresh storage.
    ///
    /// # Errors
    /// `ArgumentError` unless `-n + 1 <= k <= n + 1`.
    pub fn triu(&self, k: isize) -> Result<Tridiagonal<T>> {
        bands::check_triu_offset(k, self.order())?;
        log::debug!("widening SymTridiagonal of order {} for triu({k})", self.order());
        let mut t = Tridiagonal::from(self);
        t.triu_mut(k)?;
        Ok(t)
    }

    /// The transpose of a symmetric matrix is itself.
    pub fn transpose(&self) -> Self {
        self.clone()
    }

    /// Conjugates every entry.
    pub fn adjoint(&self) -> Self {
        Self {
            dv: bands::map(&self.dv, |x| x.symmetrize().adjoint()),
            ev: bands::map(self.effective_ev(), |x| x.transpose().adjoint()),
        }
    }

    /// Sets every stored entry of both bands to `value`.
    pub fn fill_stored(&mut self, value: T) {
        bands::fill(&mut self.dv, &value);
        bands::fill(&mut self.ev, &value);
    }

    /// Multiplies every band entry by `alpha` from the right.
    pub fn scale(&self, alpha: &T) -> Self {
        let f = |x: &T| x.clone() * alpha.clone();
        Self {
            dv: bands::map(&self.dv, f),
            ev: bands::map(&self.ev, f),
        }
    }

    pub(crate) fn zip_bands(&self, other: &Self, f: impl Fn(&T, &T) -> T + Copy) -> Self {
        Self {
            dv: bands::zip_map(&self.dv, &other.dv, f),
            ev: bands::zip_map(self.effective_ev(), other.effective_ev(), f),
        }
    }

    /// Elementwise sum.
    ///
    /// # Errors
    /// `DimensionMismatch` if the orders differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        check_same_order(self.order(), other.order())?;
        Ok(self.zip_bands(other, |a, b| a.clone() + b.clone()))
    }

    /// Elementwise difference.
    ///
    /// # Errors
    /// `DimensionMismatch` if the orders differ.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        check_same_order(self.order(), other.order())?;
        Ok(self.zip_bands(other, |a, b| a.clone() - b.clone()))
    }

    /// Elementwise sum with a general tridiagonal matrix, widened to `Tridiagonal`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the orders differ.
    pub fn checked_add_tridiagonal(&self, other: &Tridiagonal<T>) -> Result<Tridiagonal<T>> {
        other.checked_add_sym(self)
    }

    /// Elementwise difference `self - other`, widened to `Tridiagonal`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the orders differ.
    pub fn checked_sub_tridiagonal(&self, other: &Tridiagonal<T>) -> Result<Tridiagonal<T>> {
        check_same_order(self.order(), other.order())?;
        Tridiagonal::from(self).checked_sub(other)
    }
}

impl<T: BandScalar> SymTridiagonal<T> {
    /// Determinant by Usmani's recurrence over `(ev, dv, ev)`.
    pub fn det(&self) -> T {
        self.det_shifted(T::zero())
    }

    /// `det(S + shift * I)` without forming the shifted matrix.
    pub fn det_shifted(&self, shift: T) -> T {
        let ev = self.effective_ev();
        det_usmani(ev, &self.dv, ev, &shift)
    }

    pub fn div_scalar(&self, alpha: T) -> Self {
        let f = |x: &T| *x / alpha;
        Self {
            dv: bands::map(&self.dv, f),
            ev: bands::map(&self.ev, f),
        }
    }

    /// Solves `S x = rhs` through the pivoted LU of the widened matrix.
    ///
    /// # Errors
    /// `DimensionMismatch` if `rhs.len() != n`, `Singular` if `S` is singular.
    pub fn solve(&self, rhs: &[T]) -> Result<Vec<T>> {
        Tridiagonal::from(self).solve(rhs)
    }
}

impl<T: BandElement> BandedMatrix<T> for SymTridiagonal<T> {
    #[inline]
    fn order(&self) -> usize {
        self.dv.len()
    }

    #[inline]
    fn diag_entry(&self, i: usize) -> T {
        self.dv[i].symmetrize()
    }

    #[inline]
    fn sub_entry(&self, i: usize) -> T {
        self.ev[i].transpose()
    }

    #[inline]
    fn super_entry(&self, i: usize) -> T {
        self.ev[i].clone()
    }

    /// Writes diagonal entry `(i, i)`.
    ///
    /// # Errors
    /// `ArgumentError` for any off-diagonal position.
    fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        self.check_bounds(i, j)?;
        if i != j {
            return Err(BandedError::argument(format!(
                "cannot set off-diagonal entry ({i}, {j})"
            )));
        }
        self.dv[i] = value;
        Ok(())
    }

    fn stored_len(&self) -> usize {
        self.dv.len() + self.ev.len()
    }
}
