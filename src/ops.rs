//! Arithmetic operators and equality for the band types.
//!
//! Band-wise operations preserve the operand type: the sum of two
//! [`SymTridiagonal`]s is a `SymTridiagonal`, and likewise for [`Tridiagonal`]. Mixing
//! the two widens to `Tridiagonal`. As with `faer`'s dense operators, a dimension
//! mismatch panics; use `checked_add`/`checked_sub` (or `checked_add_sym`,
//! `checked_sub_tridiagonal` and friends for mixed operands) to get a
//! [`DimensionMismatch`](crate::BandedErrorKind::DimensionMismatch) error instead.
//!
//! Equality compares the logical matrices, so a `SymTridiagonal` with a trailing `ev`
//! entry equals one without, and a `Tridiagonal` equals a `SymTridiagonal` whenever its
//! bands are the symmetric embedding of the latter. The `du2` band of a `Tridiagonal`
//! is factorization workspace and does not take part in comparisons.

use crate::{
    element::{BandElement, BandScalar},
    matrix::BandedMatrix,
    symtridiagonal::SymTridiagonal,
    tridiagonal::Tridiagonal,
};
use faer::{Mat, MatRef};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_band_op {
    ($ty:ident, $trait:ident, $method:ident, $checked:ident) => {
        impl<T: BandElement> $trait<&$ty<T>> for &$ty<T> {
            type Output = $ty<T>;

            fn $method(self, rhs: &$ty<T>) -> $ty<T> {
                match self.$checked(rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("{e}"),
                }
            }
        }

        impl<T: BandElement> $trait<$ty<T>> for $ty<T> {
            type Output = $ty<T>;

            #[inline]
            fn $method(self, rhs: $ty<T>) -> $ty<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_binary_band_op!(SymTridiagonal, Add, add, checked_add);
impl_binary_band_op!(SymTridiagonal, Sub, sub, checked_sub);
impl_binary_band_op!(Tridiagonal, Add, add, checked_add);
impl_binary_band_op!(Tridiagonal, Sub, sub, checked_sub);

// Mixed operands widen the symmetric side first.
macro_rules! impl_mixed_band_op {
    ($trait:ident, $method:ident, $sym_checked:ident, $tri_checked:ident) => {
        impl<T: BandElement> $trait<&Tridiagonal<T>> for &SymTridiagonal<T> {
            type Output = Tridiagonal<T>;

            fn $method(self, rhs: &Tridiagonal<T>) -> Tridiagonal<T> {
                match self.$sym_checked(rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("{e}"),
                }
            }
        }

        impl<T: BandElement> $trait<&SymTridiagonal<T>> for &Tridiagonal<T> {
            type Output = Tridiagonal<T>;

            fn $method(self, rhs: &SymTridiagonal<T>) -> Tridiagonal<T> {
                match self.$tri_checked(rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

impl_mixed_band_op!(Add, add, checked_add_tridiagonal, checked_add_sym);
impl_mixed_band_op!(Sub, sub, checked_sub_tridiagonal, checked_sub_sym);

impl<T: BandElement> Neg for &SymTridiagonal<T> {
    type Output = SymTridiagonal<T>;

    fn neg(self) -> SymTridiagonal<T> {
        SymTridiagonal {
            dv: self.dv.iter().map(|x| -x.clone()).collect(),
            ev: self.ev.iter().map(|x| -x.clone()).collect(),
        }
    }
}

impl<T: BandElement> Neg for SymTridiagonal<T> {
    type Output = SymTridiagonal<T>;

    #[inline]
    fn neg(self) -> SymTridiagonal<T> {
        -&self
    }
}

impl<T: BandElement> Neg for &Tridiagonal<T> {
    type Output = Tridiagonal<T>;

    fn neg(self) -> Tridiagonal<T> {
        let negate = |band: &[T]| -> Vec<T> { band.iter().map(|x| -x.clone()).collect() };
        Tridiagonal {
            dl: negate(&self.dl),
            d: negate(&self.d),
            du: negate(&self.du),
            du2: None,
        }
    }
}

impl<T: BandElement> Neg for Tridiagonal<T> {
    type Output = Tridiagonal<T>;

    #[inline]
    fn neg(self) -> Tridiagonal<T> {
        -&self
    }
}

macro_rules! impl_scalar_ops {
    ($ty:ident) => {
        /// Band * scalar.
        impl<T: BandElement> Mul<T> for &$ty<T> {
            type Output = $ty<T>;

            #[inline]
            fn mul(self, rhs: T) -> $ty<T> {
                self.scale(&rhs)
            }
        }

        impl<T: BandElement> Mul<T> for $ty<T> {
            type Output = $ty<T>;

            #[inline]
            fn mul(self, rhs: T) -> $ty<T> {
                self.scale(&rhs)
            }
        }

        /// Band / scalar.
        impl<T: BandScalar> Div<T> for &$ty<T> {
            type Output = $ty<T>;

            #[inline]
            fn div(self, rhs: T) -> $ty<T> {
                self.div_scalar(rhs)
            }
        }

        impl<T: BandScalar> Div<T> for $ty<T> {
            type Output = $ty<T>;

            #[inline]
            fn div(self, rhs: T) -> $ty<T> {
                self.div_scalar(rhs)
            }
        }

        /// Band * dense matrix.
        ///
        /// # Panics
        /// If `rhs` does not have `self.order()` rows.
        impl<T: BandElement> Mul<MatRef<'_, T>> for &$ty<T> {
            type Output = Mat<T>;

            fn mul(self, rhs: MatRef<'_, T>) -> Mat<T> {
                match self.apply(rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

impl_scalar_ops!(SymTridiagonal);
impl_scalar_ops!(Tridiagonal);

impl<T: BandElement> PartialEq for SymTridiagonal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dv == other.dv && self.effective_ev() == other.effective_ev()
    }
}

impl<T: BandElement> PartialEq for Tridiagonal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dl == other.dl && self.d == other.d && self.du == other.du
    }
}

impl<T: BandElement> PartialEq<SymTridiagonal<T>> for Tridiagonal<T> {
    fn eq(&self, other: &SymTridiagonal<T>) -> bool {
        self.du.iter().zip(&self.dl).all(|(u, l)| *u == l.transpose())
            && self.du.as_slice() == other.effective_ev()
            && self.d.len() == other.dv.len()
            && self.d.iter().zip(&other.dv).all(|(a, b)| *a == b.symmetrize())
    }
}

impl<T: BandElement> PartialEq<Tridiagonal<T>> for SymTridiagonal<T> {
    #[inline]
    fn eq(&self, other: &Tridiagonal<T>) -> bool {
        other == self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    fn sym() -> SymTridiagonal<f64> {
        SymTridiagonal::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0]).unwrap()
    }

    fn tri() -> Tridiagonal<f64> {
        Tridiagonal::new(vec![1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0]).unwrap()
    }

    #[test]
    fn test_same_type_addition_is_closed() {
        let s: SymTridiagonal<f64> = &sym() + &sym();
        assert_eq!(s, SymTridiagonal::new(vec![2.0, 4.0, 6.0], vec![8.0, 10.0]).unwrap());
        let t: Tridiagonal<f64> = tri() + tri();
        assert_eq!(t.d(), &[6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_self_difference_is_zero() {
        assert!((sym() - sym()).is_zero());
        assert!((tri() - tri()).is_zero());
        assert_eq!((tri() - tri()).order(), 3);
    }

    #[test]
    fn test_addition_commutes_and_associates() {
        let a = tri();
        let b = tri().scale(&-0.5);
        let c = tri().transpose();
        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn test_mismatched_addition_panics() {
        let _ = sym() + SymTridiagonal::zeros(2);
    }

    #[test]
    fn test_mixed_addition_widens() {
        let t: Tridiagonal<f64> = &sym() + &tri();
        assert_eq!(t.dl(), &[5.0, 7.0]);
        assert_eq!(t.du(), &[10.0, 12.0]);
        let u: Tridiagonal<f64> = &tri() - &sym();
        assert_eq!(u.d(), &[2.0, 2.0, 2.0]);
        let v: Tridiagonal<f64> = &sym() - &tri();
        assert_eq!(v, -u);
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn test_mixed_mismatched_addition_panics() {
        let _ = &SymTridiagonal::<f64>::zeros(2) + &tri();
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn test_mixed_mismatched_subtraction_panics() {
        let _ = &tri() - &SymTridiagonal::<f64>::zeros(4);
    }

    #[test]
    fn test_mixed_checked_arithmetic_reports_mismatch() {
        let small = SymTridiagonal::<f64>::zeros(2);
        assert!(small.checked_add_tridiagonal(&tri()).is_err());
        assert!(small.checked_sub_tridiagonal(&tri()).is_err());
        assert_eq!(sym().checked_add_tridiagonal(&tri()).unwrap(), &tri() + &sym());
    }

    #[test]
    fn test_negation_and_scalar_ops() {
        let n = -sym();
        assert_eq!(n.dv(), &[-1.0, -2.0, -3.0]);
        assert_eq!((&tri() * 2.0).du(), &[12.0, 14.0]);
        assert_eq!(tri() * 2.0 / 2.0, tri());
        assert_eq!((-tri()).dl(), &[-1.0, -2.0]);
    }

    #[test]
    fn test_dense_product_operator() {
        let b: Mat<f64> = mat![[1.0], [1.0], [1.0]];
        let c = &sym() * b.as_ref();
        assert_eq!(c, mat![[5.0], [11.0], [8.0]]);
    }

    #[test]
    fn test_cross_type_equality() {
        let s = sym();
        assert_eq!(Tridiagonal::from(&s), s);
        assert_eq!(s, Tridiagonal::from(&s));
        assert_ne!(tri(), s);

        let padded = SymTridiagonal::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 42.0]).unwrap();
        assert_eq!(padded, s);
        assert_eq!(Tridiagonal::from(&padded), s);
    }

    #[test]
    fn test_equality_ignores_second_superdiagonal() {
        let t = tri();
        let with_du2 = Tridiagonal::with_second_superdiagonal(
            t.dl().to_vec(),
            t.d().to_vec(),
            t.du().to_vec(),
            vec![9.0],
        )
        .unwrap();
        assert_eq!(with_du2, t);
    }
}
