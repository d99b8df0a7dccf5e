//! General tridiagonal matrices.
//!
//! A [`Tridiagonal`] stores its sub-diagonal `dl`, diagonal `d` and super-diagonal `du`
//! as three independent vectors, so the matrix need not be symmetric. A fourth band,
//! the second superdiagonal `du2`, only exists after a pivoted LU factorization has
//! produced it; until then it is `None`, which is distinct from a computed but empty
//! band (`Some` of length zero for matrices of order 2 or less).

use crate::{
    algorithms::{lu::TridiagonalLu, usmani::det_usmani},
    bands,
    element::{BandElement, BandScalar},
    error::{BandedError, Result},
    matrix::BandedMatrix,
    symtridiagonal::SymTridiagonal,
};

/// An `n`x`n` tridiagonal matrix with independent sub-, main and super-diagonals.
#[derive(Clone, Debug)]
pub struct Tridiagonal<T> {
    pub(crate) dl: Vec<T>,
    pub(crate) d: Vec<T>,
    pub(crate) du: Vec<T>,
    pub(crate) du2: Option<Vec<T>>,
}

impl<T: BandElement> Tridiagonal<T> {
    /// Creates a tridiagonal matrix from its bands.
    ///
    /// # Errors
    /// `ArgumentError` unless `dl` and `du` both have length `d.len() - 1`, or all three
    /// bands are empty.
    pub fn new(dl: Vec<T>, d: Vec<T>, du: Vec<T>) -> Result<Self> {
        bands::check_tridiagonal_lengths(dl.len(), d.len(), du.len())?;
        Ok(Self {
            dl,
            d,
            du,
            du2: None,
        })
    }

    /// Creates a tridiagonal matrix that already carries a second superdiagonal of
    /// length `max(0, n - 2)`.
    pub fn with_second_superdiagonal(
        dl: Vec<T>,
        d: Vec<T>,
        du: Vec<T>,
        du2: Vec<T>,
    ) -> Result<Self> {
        bands::check_tridiagonal_lengths(dl.len(), d.len(), du.len())?;
        bands::check_second_superdiagonal_length(d.len(), du2.len())?;
        Ok(Self {
            dl,
            d,
            du,
            du2: Some(du2),
        })
    }

    /// An `n`x`n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            dl: bands::zeros(bands::offdiag_len(n)),
            d: bands::zeros(n),
            du: bands::zeros(bands::offdiag_len(n)),
            du2: None,
        }
    }

    pub fn dl(&self) -> &[T] {
        &self.dl
    }

    pub fn d(&self) -> &[T] {
        &self.d
    }

    pub fn du(&self) -> &[T] {
        &self.du
    }

    /// The second superdiagonal, present only after an LU factorization.
    pub fn du2(&self) -> Option<&[T]> {
        self.du2.as_deref()
    }

    /// Returns `(dl, d, du)`, dropping any second superdiagonal.
    pub fn into_bands(self) -> (Vec<T>, Vec<T>, Vec<T>) {
        (self.dl, self.d, self.du)
    }

    /// `du[i] == transpose(dl[i])` and every diagonal entry is symmetric.
    pub fn is_symmetric(&self) -> bool {
        self.d.iter().all(BandElement::is_self_symmetric)
            && self.du.iter().zip(&self.dl).all(|(u, l)| *u == l.transpose())
    }

    /// `du[i] == adjoint(dl[i])` and every diagonal entry equals its own adjoint.
    pub fn is_hermitian(&self) -> bool {
        self.d.iter().all(|x| *x == x.adjoint())
            && self.du.iter().zip(&self.dl).all(|(u, l)| *u == l.adjoint())
    }

    pub fn is_diagonal(&self) -> bool {
        bands::all_zero(&self.dl) && bands::all_zero(&self.du)
    }

    pub fn is_zero(&self) -> bool {
        bands::all_zero(&self.dl) && bands::all_zero(&self.d) && bands::all_zero(&self.du)
    }

    pub fn is_one(&self) -> bool {
        bands::all_zero(&self.dl) && bands::all_one(&self.d) && bands::all_zero(&self.du)
    }

    /// Returns `true` if every entry below the `k`-th diagonal is zero.
    pub fn is_triu(&self, k: isize) -> bool {
        match k {
            k if k <= -1 => true,
            0 => bands::all_zero(&self.dl),
            1 => bands::all_zero(&self.dl) && bands::all_zero(&self.d),
            _ => self.is_zero(),
        }
    }

    /// Returns `true` if every entry above the `k`-th diagonal is zero.
    pub fn is_tril(&self, k: isize) -> bool {
        match k {
            k if k >= 1 => true,
            0 => bands::all_zero(&self.du),
            -1 => bands::all_zero(&self.du) && bands::all_zero(&self.d),
            _ => self.is_zero(),
        }
    }

    /// Zeroes every band above the `k`-th diagonal, in place.
    ///
    /// # Errors
    /// `ArgumentError` unless `-n - 1 <= k <= n - 1`; the matrix is left untouched.
    pub fn tril_mut(&mut self, k: isize) -> Result<()> {
        bands::check_tril_offset(k, self.order())?;
        self.du2 = None;
        let zero = T::zero();
        if k < -1 {
            bands::fill(&mut self.dl, &zero);
            bands::fill(&mut self.d, &zero);
            bands::fill(&mut self.du, &zero);
        } else if k == -1 {
            bands::fill(&mut self.d, &zero);
            bands::fill(&mut self.du, &zero);
        } else if k == 0 {
            bands::fill(&mut self.du, &zero);
        }
        Ok(())
    }

    /// Zeroes every band below the `k`-th diagonal, in place.
    ///
    /// # Errors
    /// `ArgumentError` unless `-n + 1 <= k <= n + 1`; the matrix is left untouched.
    pub fn triu_mut(&mut self, k: isize) -> Result<()> {
        bands::check_triu_offset(k, self.order())?;
        self.du2 = None;
        let zero = T::zero();
        if k > 1 {
            bands::fill(&mut self.dl, &zero);
            bands::fill(&mut self.d, &zero);
            bands::fill(&mut self.du, &zero);
        } else if k == 1 {
            bands::fill(&mut self.dl, &zero);
            bands::fill(&mut self.d, &zero);
        } else if k == 0 {
            bands::fill(&mut self.dl, &zero);
        }
        Ok(())
    }

    /// Lower triangular part on and below the `k`-th diagonal, as a new matrix.
    pub fn tril(&self, k: isize) -> Result<Self> {
        let mut out = self.clone();
        out.tril_mut(k)?;
        Ok(out)
    }

    /// Upper triangular part on and above the `k`-th diagonal, as a new matrix.
    pub fn triu(&self, k: isize) -> Result<Self> {
        let mut out = self.clone();
        out.triu_mut(k)?;
        Ok(out)
    }

    pub fn transpose(&self) -> Self {
        Self {
            dl: bands::map(&self.du, T::transpose),
            d: bands::map(&self.d, T::transpose),
            du: bands::map(&self.dl, T::transpose),
            du2: None,
        }
    }

    pub fn adjoint(&self) -> Self {
        Self {
            dl: bands::map(&self.du, T::adjoint),
            d: bands::map(&self.d, T::adjoint),
            du: bands::map(&self.dl, T::adjoint),
            du2: None,
        }
    }

    /// Sets every stored entry of the three bands to `value` and drops `du2`.
    pub fn fill_stored(&mut self, value: T) {
        self.du2 = None;
        bands::fill(&mut self.dl, &value);
        bands::fill(&mut self.d, &value);
        bands::fill(&mut self.du, &value);
    }

    /// Multiplies every band entry by `alpha` from the right.
    pub fn scale(&self, alpha: &T) -> Self {
        let f = |x: &T| x.clone() * alpha.clone();
        Self {
            dl: bands::map(&self.dl, f),
            d: bands::map(&self.d, f),
            du: bands::map(&self.du, f),
            du2: None,
        }
    }

    pub(crate) fn zip_bands(&self, other: &Self, f: impl Fn(&T, &T) -> T + Copy) -> Self {
        Self {
            dl: bands::zip_map(&self.dl, &other.dl, f),
            d: bands::zip_map(&self.d, &other.d, f),
            du: bands::zip_map(&self.du, &other.du, f),
            du2: None,
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

    /// Elementwise sum with a symmetric tridiagonal matrix, widened to `Tridiagonal`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the orders differ.
    pub fn checked_add_sym(&self, other: &SymTridiagonal<T>) -> Result<Self> {
        check_same_order(self.order(), other.order())?;
        self.checked_add(&Tridiagonal::from(other))
    }

    /// Elementwise difference `self - other` with a symmetric tridiagonal matrix.
    ///
    /// # Errors
    /// `DimensionMismatch` if the orders differ.
    pub fn checked_sub_sym(&self, other: &SymTridiagonal<T>) -> Result<Self> {
        check_same_order(self.order(), other.order())?;
        self.checked_sub(&Tridiagonal::from(other))
    }

    /// Converts to a [`SymTridiagonal`] if the matrix is symmetric.
    ///
    /// # Errors
    /// `ArgumentError` if [`is_symmetric`](Self::is_symmetric) is false.
    pub fn to_symtridiagonal(&self) -> Result<SymTridiagonal<T>> {
        if !self.is_symmetric() {
            return Err(BandedError::argument(
                "matrix is not symmetric; cannot convert to SymTridiagonal",
            ));
        }
        SymTridiagonal::new(self.d.clone(), self.du.clone())
    }
}

impl<T: BandScalar> Tridiagonal<T> {
    /// Determinant by Usmani's recurrence over `(dl, d, du)`.
    pub fn det(&self) -> T {
        self.det_shifted(T::zero())
    }

    /// `det(A + shift * I)` without forming the shifted matrix.
    pub fn det_shifted(&self, shift: T) -> T {
        det_usmani(&self.dl, &self.d, &self.du, &shift)
    }

    /// Elementwise division by a scalar.
    pub fn div_scalar(&self, alpha: T) -> Self {
        let f = |x: &T| *x / alpha;
        Self {
            dl: bands::map(&self.dl, f),
            d: bands::map(&self.d, f),
            du: bands::map(&self.du, f),
            du2: None,
        }
    }

    /// Pivoted LU factorization of a copy of this matrix.
    ///
    /// # Errors
    /// `Singular` if U has an exact zero on its diagonal.
    pub fn lu(&self) -> Result<TridiagonalLu<T>> {
        let lu = TridiagonalLu::factorize(self.clone());
        if let Some(index) = lu.zero_pivot() {
            return Err(crate::error::BandedErrorKind::Singular { index }.into());
        }
        Ok(lu)
    }

    /// Pivoted LU factorization reusing this matrix's storage. Singularity is recorded
    /// in the result rather than reported as an error.
    pub fn into_lu(self) -> TridiagonalLu<T> {
        TridiagonalLu::factorize(self)
    }

    /// Solves `A x = rhs`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `rhs.len() != n`, `Singular` if the matrix is singular.
    pub fn solve(&self, rhs: &[T]) -> Result<Vec<T>> {
        if rhs.len() != self.order() {
            return Err(BandedError::dimension_mismatch(format!(
                "matrix has order {} but right-hand side has length {}",
                self.order(),
                rhs.len()
            )));
        }
        self.lu()?.solve(rhs)
    }
}

impl<T: BandElement> BandedMatrix<T> for Tridiagonal<T> {
    #[inline]
    fn order(&self) -> usize {
        self.d.len()
    }

    #[inline]
    fn diag_entry(&self, i: usize) -> T {
        self.d[i].clone()
    }

    #[inline]
    fn sub_entry(&self, i: usize) -> T {
        self.dl[i].clone()
    }

    #[inline]
    fn super_entry(&self, i: usize) -> T {
        self.du[i].clone()
    }

    /// Writes entry `(i, j)`.
    ///
    /// Entries outside the band may only be "set" to zero, which is a no-op. Any write
    /// into the band invalidates a stored `du2`, which is dropped.
    fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        self.check_bounds(i, j)?;
        let slot = if i == j {
            &mut self.d[i]
        } else if i == j + 1 {
            &mut self.dl[j]
        } else if i + 1 == j {
            &mut self.du[i]
        } else if value.is_zero() {
            return Ok(());
        } else {
            return Err(BandedError::argument(format!(
                "cannot set entry ({i}, {j}) off the tridiagonal band to a nonzero value ({value:?})"
            )));
        };
        *slot = value;
        self.du2 = None;
        Ok(())
    }

    fn stored_len(&self) -> usize {
        self.dl.len() + self.d.len() + self.du.len() + self.du2.as_ref().map_or(0, Vec::len)
    }
}

pub(crate) fn check_same_order(a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(BandedError::dimension_mismatch(format!(
            "matrix orders must match, got {a} and {b}"
        )));
    }
    Ok(())
}
