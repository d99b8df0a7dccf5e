//! Band storage helpers.
//!
//! Both matrix types keep their diagonals in plain `Vec<T>`s. This module owns the
//! length rules for those vectors and the small band-wise primitives (map, zip, zero
//! checks, offset validation) that the matrix types and kernels are built from, so the
//! rules live in one place.

use crate::element::BandElement;
use crate::error::{BandedError, Result};

/// Length of the off-diagonals of a matrix of order `n`.
#[inline]
pub(crate) fn offdiag_len(n: usize) -> usize {
    n.saturating_sub(1)
}

/// Validates `len(dv) - 1 <= len(ev) <= len(dv)` for symmetric tridiagonal storage.
pub(crate) fn check_symmetric_lengths(dv_len: usize, ev_len: usize) -> Result<()> {
    if ev_len < offdiag_len(dv_len) || ev_len > dv_len {
        return Err(BandedError::dimension_mismatch(format!(
            "subdiagonal has wrong length. Has length {ev_len}, but should be either {} or {dv_len}.",
            offdiag_len(dv_len)
        )));
    }
    Ok(())
}

/// Validates `len(dl) == len(du) == len(d) - 1`, or all three empty.
pub(crate) fn check_tridiagonal_lengths(dl_len: usize, d_len: usize, du_len: usize) -> Result<()> {
    let all_empty = dl_len == 0 && d_len == 0 && du_len == 0;
    if !all_empty && (d_len == 0 || dl_len != d_len - 1 || du_len != d_len - 1) {
        return Err(BandedError::argument(format!(
            "cannot construct Tridiagonal from incompatible lengths of subdiagonal, diagonal and superdiagonal: ({dl_len}, {d_len}, {du_len})"
        )));
    }
    Ok(())
}

/// Validates the length of the second superdiagonal, `max(0, len(d) - 2)`.
pub(crate) fn check_second_superdiagonal_length(d_len: usize, du2_len: usize) -> Result<()> {
    if du2_len != d_len.saturating_sub(2) {
        return Err(BandedError::argument(format!(
            "second superdiagonal has length {du2_len}, expected {}",
            d_len.saturating_sub(2)
        )));
    }
    Ok(())
}

/// Validates a diagonal offset `k` for extraction from an `n`x`n` matrix.
///
/// The main diagonal is always valid, even for an empty matrix.
pub(crate) fn check_diagonal_offset(k: isize, n: usize) -> Result<()> {
    if k != 0 && k.unsigned_abs() > n {
        return Err(BandedError::argument(format!(
            "requested diagonal, {k}, must be at least -{n} and at most {n} for an {n}-by-{n} matrix"
        )));
    }
    Ok(())
}

/// Validates the offset of a lower triangular trim, `-n - 1 <= k <= n - 1`.
pub(crate) fn check_tril_offset(k: isize, n: usize) -> Result<()> {
    let n = n as isize;
    if !(-n - 1 <= k && k <= n - 1) {
        return Err(BandedError::argument(format!(
            "the requested diagonal, {k}, must be at least {} and at most {} in an {n}-by-{n} matrix",
            -n - 1,
            n - 1
        )));
    }
    Ok(())
}

/// Validates the offset of an upper triangular trim, `-n + 1 <= k <= n + 1`.
pub(crate) fn check_triu_offset(k: isize, n: usize) -> Result<()> {
    let n = n as isize;
    if !(-n + 1 <= k && k <= n + 1) {
        return Err(BandedError::argument(format!(
            "the requested diagonal, {k}, must be at least {} and at most {} in an {n}-by-{n} matrix",
            -n + 1,
            n + 1
        )));
    }
    Ok(())
}

#[inline]
pub(crate) fn zeros<T: BandElement>(len: usize) -> Vec<T> {
    vec![T::zero(); len]
}

#[inline]
pub(crate) fn fill<T: BandElement>(band: &mut [T], value: &T) {
    band.iter_mut().for_each(|x| *x = value.clone());
}

#[inline]
pub(crate) fn all_zero<T: BandElement>(band: &[T]) -> bool {
    band.iter().all(BandElement::is_zero)
}

#[inline]
pub(crate) fn all_one<T: BandElement>(band: &[T]) -> bool {
    band.iter().all(BandElement::is_one)
}

#[inline]
pub(crate) fn map<T: BandElement>(band: &[T], f: impl Fn(&T) -> T) -> Vec<T> {
    band.iter().map(f).collect()
}

/// Combines two bands of equal length elementwise.
#[inline]
pub(crate) fn zip_map<T: BandElement>(a: &[T], b: &[T], f: impl Fn(&T, &T) -> T) -> Vec<T> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| f(x, y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BandedErrorKind;

    #[test]
    fn test_symmetric_lengths() {
        assert!(check_symmetric_lengths(3, 2).is_ok());
        assert!(check_symmetric_lengths(3, 3).is_ok());
        assert!(check_symmetric_lengths(0, 0).is_ok());
        let err = check_symmetric_lengths(3, 1).unwrap_err();
        assert!(matches!(err.kind(), BandedErrorKind::DimensionMismatch(_)));
        assert!(check_symmetric_lengths(3, 4).is_err());
        assert!(check_symmetric_lengths(0, 1).is_err());
    }

    #[test]
    fn test_tridiagonal_lengths() {
        assert!(check_tridiagonal_lengths(2, 3, 2).is_ok());
        assert!(check_tridiagonal_lengths(0, 0, 0).is_ok());
        assert!(check_tridiagonal_lengths(0, 1, 0).is_ok());
        let err = check_tridiagonal_lengths(1, 3, 2).unwrap_err();
        assert!(matches!(err.kind(), BandedErrorKind::ArgumentError(_)));
        assert!(check_tridiagonal_lengths(1, 0, 1).is_err());
    }

    #[test]
    fn test_offsets() {
        assert!(check_diagonal_offset(0, 0).is_ok());
        assert!(check_diagonal_offset(3, 3).is_ok());
        assert!(check_diagonal_offset(-4, 3).is_err());
        assert!(check_tril_offset(-4, 3).is_ok());
        assert!(check_tril_offset(3, 3).is_err());
        assert!(check_triu_offset(4, 3).is_ok());
        assert!(check_triu_offset(-3, 3).is_err());
    }

    #[test]
    fn test_band_primitives() {
        let a = vec![1.0, 2.0];
        let b = vec![3.0, 4.0];
        assert_eq!(zip_map(&a, &b, |x, y| x + y), vec![4.0, 6.0]);
        assert_eq!(map(&a, |x| -x), vec![-1.0, -2.0]);
        assert!(all_zero(&zeros::<f64>(4)));
        assert!(all_one(&[1.0_f64, 1.0]));
        let mut c = vec![0.0; 3];
        fill(&mut c, &7.0);
        assert_eq!(c, vec![7.0; 3]);
    }
}
