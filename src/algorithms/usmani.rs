//! Determinant of a tridiagonal matrix by Usmani's three-term recurrence.
//!
//! With sub-diagonal `a`, diagonal `b` and super-diagonal `c`, the leading principal
//! minors satisfy
//!
//! ```text
//! θ₀ = 1
//! θ₁ = b₁
//! θᵢ = bᵢ θᵢ₋₁ − aᵢ₋₁ cᵢ₋₁ θᵢ₋₂,   i = 2..n
//! ```
//!
//! and the determinant is θₙ. An optional `shift` is added to every diagonal entry,
//! which yields `det(A + shift * I)` without forming the shifted matrix.
//!
//! The recurrence is O(n) and does no pivoting. It is exact in exact arithmetic but
//! can lose accuracy (or overflow) for badly scaled or ill-conditioned matrices; use
//! [`crate::TridiagonalLu::determinant`] when that matters.

use crate::element::BandElement;

/// Evaluates θₙ for bands `a` (sub), `b` (diagonal), `c` (super), shifted by `shift`.
///
/// `a` and `c` must hold at least `b.len() - 1` entries; trailing entries are ignored.
/// An empty diagonal gives the multiplicative identity.
pub fn det_usmani<T: BandElement>(a: &[T], b: &[T], c: &[T], shift: &T) -> T {
    let n = b.len();
    debug_assert!(a.len() + 1 >= n && c.len() + 1 >= n);

    let mut theta_a = T::one();
    if n == 0 {
        return theta_a;
    }
    let mut theta_b = b[0].clone() + shift.clone();
    for i in 1..n {
        let next = (b[i].clone() + shift.clone()) * theta_b.clone()
            - a[i - 1].clone() * c[i - 1].clone() * theta_a;
        theta_a = theta_b;
        theta_b = next;
    }
    theta_b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laplacian_closed_form() {
        // det of the n x n matrix tridiag(1, 2, 1) is n + 1.
        for n in 1..8 {
            let b = vec![2.0; n];
            let off = vec![1.0; n - 1];
            let det = det_usmani(&off, &b, &off, &0.0);
            assert_eq!(det, (n + 1) as f64);
        }
    }

    #[test]
    fn test_empty_is_one() {
        let empty: [f64; 0] = [];
        assert_eq!(det_usmani(&empty, &empty, &empty, &0.0), 1.0);
        assert_eq!(det_usmani(&empty, &empty, &empty, &5.0), 1.0);
    }

    #[test]
    fn test_shift_is_added_to_diagonal() {
        // [[1, 2], [3, 4]] shifted by 1 is [[2, 2], [3, 5]] with det 4.
        let det = det_usmani(&[3.0], &[1.0, 4.0], &[2.0], &1.0);
        assert_eq!(det, 4.0);
    }

    #[test]
    fn test_trailing_offdiagonal_entries_ignored() {
        let det = det_usmani(&[1.0, 99.0], &[2.0, 2.0], &[1.0, 99.0], &0.0);
        assert_eq!(det, 3.0);
    }
}
