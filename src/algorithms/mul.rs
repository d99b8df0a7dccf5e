//! Sliding-window multiplication kernels.
//!
//! Row `i` of a tridiagonal product only involves rows `i - 1`, `i` and `i + 1` of the
//! right-hand side. Both kernels sweep each column once from top to bottom, keeping a
//! three-element window `(x₋, x₀, x₊)` over the input column and the matching window
//! over the off-diagonal band, so each output column costs O(n) and the dense matrix is
//! never formed.

use crate::{
    element::BandElement,
    error::{BandedError, Result},
    matrix::BandedMatrix,
};
use faer::{MatMut, MatRef};
use std::mem;

/// Computes `c := alpha * matrix * b + beta * c`.
///
/// When `beta` is zero the previous contents of `c` are never read, so uninitialized
/// or non-finite values in `c` do not leak into the result. When `alpha` is zero the
/// sweep is skipped and `c` is only scaled by `beta`.
///
/// # Errors
/// `DimensionMismatch` if `b` and `c` do not have `matrix.order()` rows, or if their
/// column counts differ.
pub fn mul_add<T, M>(
    matrix: &M,
    alpha: &T,
    b: MatRef<'_, T>,
    beta: &T,
    mut c: MatMut<'_, T>,
) -> Result<()>
where
    T: BandElement,
    M: BandedMatrix<T> + ?Sized,
{
    let m = b.nrows();
    let ncols = b.ncols();
    if !(m == matrix.order() && m == c.nrows()) {
        return Err(BandedError::dimension_mismatch(format!(
            "A has first dimension {}, B has {}, C has {} but all must match",
            matrix.order(),
            m,
            c.nrows()
        )));
    }
    if ncols != c.ncols() {
        return Err(BandedError::dimension_mismatch(format!(
            "second dimension of B, {ncols}, doesn't match second dimension of C, {}",
            c.ncols()
        )));
    }
    if m == 0 {
        return Ok(());
    }
    if alpha.is_zero() {
        log::trace!("alpha is zero; scaling C by beta without a sweep");
        scale_or_fill(c, beta);
        return Ok(());
    }

    for j in 0..ncols {
        let mut x_zero = T::zero();
        let mut x_plus = b[(0, j)].clone();
        // Coefficient of x₋ in the current row, i.e. entry (i, i - 1).
        let mut sub_prev = T::zero();

        for i in 0..m - 1 {
            let x_next = b[(i + 1, j)].clone();
            let x_minus = mem::replace(&mut x_zero, mem::replace(&mut x_plus, x_next));
            let sub = mem::replace(&mut sub_prev, matrix.sub_entry(i));
            let row = sub * x_minus
                + matrix.diag_entry(i) * x_zero.clone()
                + matrix.super_entry(i) * x_plus.clone();
            accumulate(&mut c, i, j, alpha, beta, row);
        }
        // The last row has no super-diagonal entry.
        let row = sub_prev * x_zero + matrix.diag_entry(m - 1) * x_plus;
        accumulate(&mut c, m - 1, j, alpha, beta, row);
    }
    Ok(())
}

/// Matrix-vector product `matrix * x`.
pub fn mul_vec<T, M>(matrix: &M, x: &[T]) -> Result<Vec<T>>
where
    T: BandElement,
    M: BandedMatrix<T> + ?Sized,
{
    let n = matrix.order();
    if x.len() != n {
        return Err(BandedError::dimension_mismatch(format!(
            "matrix has order {n} but vector has length {}",
            x.len()
        )));
    }
    let b = faer::Mat::from_fn(n, 1, |i, _| x[i].clone());
    let mut c = faer::Mat::from_fn(n, 1, |_, _| T::zero());
    mul_add(matrix, &T::one(), b.as_ref(), &T::zero(), c.as_mut())?;
    Ok((0..n).map(|i| c[(i, 0)].clone()).collect())
}

/// The bilinear form `x^H * matrix * y`.
///
/// # Errors
/// `DimensionMismatch` unless `x`, `y` and the matrix all have the same length.
pub fn dot<T, M>(x: &[T], matrix: &M, y: &[T]) -> Result<T>
where
    T: BandElement,
    M: BandedMatrix<T> + ?Sized,
{
    let n = matrix.order();
    if !(x.len() == n && y.len() == n) {
        return Err(BandedError::dimension_mismatch(format!(
            "dot: x has length {}, matrix has order {n}, y has length {}",
            x.len(),
            y.len()
        )));
    }
    if n == 0 {
        return Ok(T::zero());
    }

    let mut acc = T::zero();
    let mut y_zero = T::zero();
    let mut y_plus = y[0].clone();
    let mut sub_prev = T::zero();
    for i in 0..n {
        let has_next = i + 1 < n;
        let y_next = if has_next { y[i + 1].clone() } else { T::zero() };
        let y_minus = mem::replace(&mut y_zero, mem::replace(&mut y_plus, y_next));
        let (next_sub, sup) = if has_next {
            (matrix.sub_entry(i), matrix.super_entry(i))
        } else {
            (T::zero(), T::zero())
        };
        let sub = mem::replace(&mut sub_prev, next_sub);
        let row = sub * y_minus + matrix.diag_entry(i) * y_zero.clone() + sup * y_plus.clone();
        acc = acc + x[i].adjoint() * row;
    }
    Ok(acc)
}

#[inline]
fn accumulate<T: BandElement>(
    c: &mut MatMut<'_, T>,
    i: usize,
    j: usize,
    alpha: &T,
    beta: &T,
    row: T,
) {
    let scaled = if alpha.is_one() {
        row
    } else {
        alpha.clone() * row
    };
    c[(i, j)] = if beta.is_zero() {
        scaled
    } else {
        scaled + beta.clone() * c[(i, j)].clone()
    };
}

fn scale_or_fill<T: BandElement>(mut c: MatMut<'_, T>, beta: &T) {
    for j in 0..c.ncols() {
        for i in 0..c.nrows() {
            c[(i, j)] = if beta.is_zero() {
                T::zero()
            } else {
                beta.clone() * c[(i, j)].clone()
            };
        }
    }
}
