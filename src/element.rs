//! Element capabilities required by the band matrix types.
//!
//! A symmetric tridiagonal matrix stores only its upper off-diagonal and reconstructs
//! the lower one by transposition. For plain scalars transposition and symmetrization
//! are the identity, but the same structure is also meaningful with block entries
//! (a block tridiagonal matrix), where each diagonal entry must itself be a symmetric
//! block and each mirrored off-diagonal entry is the transposed block.
//!
//! [`BandElement`] captures exactly that: ring arithmetic plus
//! `transpose`/`adjoint`/`symmetrize` and the related predicates. [`BandScalar`] adds
//! what pivoted factorizations need (division and a magnitude to compare pivots).

use num_complex::{Complex32, Complex64};
use std::fmt::Debug;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// An entry type that can be stored in the bands of a tridiagonal matrix.
pub trait BandElement:
    Clone
    + PartialEq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// The transpose of the entry (identity for scalars).
    fn transpose(&self) -> Self;

    /// The conjugate transpose of the entry.
    fn adjoint(&self) -> Self;

    /// A value equal to its own transpose, built from the upper triangle of `self`.
    fn symmetrize(&self) -> Self;

    /// Returns `true` if the entry equals its own transpose.
    fn is_self_symmetric(&self) -> bool;

    /// Returns `true` if the entry has no imaginary part.
    fn is_real(&self) -> bool;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

/// A field element: supports division and exposes a magnitude for pivot selection.
pub trait BandScalar: BandElement + Copy + Div<Output = Self> {
    /// Magnitude used to compare pivot candidates.
    fn magnitude(&self) -> f64;
}

macro_rules! real_band_scalar {
    ($($ty:ty),+) => {
        $(
            impl BandElement for $ty {
                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn one() -> Self {
                    1.0
                }

                #[inline]
                fn transpose(&self) -> Self {
                    *self
                }

                #[inline]
                fn adjoint(&self) -> Self {
                    *self
                }

                #[inline]
                fn symmetrize(&self) -> Self {
                    *self
                }

                #[inline]
                fn is_self_symmetric(&self) -> bool {
                    true
                }

                #[inline]
                fn is_real(&self) -> bool {
                    true
                }
            }

            impl BandScalar for $ty {
                #[inline]
                fn magnitude(&self) -> f64 {
                    f64::from(self.abs())
                }
            }
        )+
    };
}
real_band_scalar!(f32, f64);

macro_rules! complex_band_scalar {
    ($($ty:ty),+) => {
        $(
            impl BandElement for $ty {
                #[inline]
                fn zero() -> Self {
                    <$ty>::new(0.0, 0.0)
                }

                #[inline]
                fn one() -> Self {
                    <$ty>::new(1.0, 0.0)
                }

                #[inline]
                fn transpose(&self) -> Self {
                    *self
                }

                #[inline]
                fn adjoint(&self) -> Self {
                    self.conj()
                }

                #[inline]
                fn symmetrize(&self) -> Self {
                    *self
                }

                #[inline]
                fn is_self_symmetric(&self) -> bool {
                    true
                }

                #[inline]
                fn is_real(&self) -> bool {
                    self.im == 0.0
                }
            }

            impl BandScalar for $ty {
                #[inline]
                fn magnitude(&self) -> f64 {
                    f64::from(self.norm())
                }
            }
        )+
    };
}
complex_band_scalar!(Complex32, Complex64);

/// A dense, real `N`x`N` block used as the entry of a block tridiagonal matrix.
///
/// Stored row-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block<const N: usize>(pub [[f64; N]; N]);

impl<const N: usize> Block<N> {
    /// Creates a block by evaluating `f(row, col)` for every entry.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = [[0.0; N]; N];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, elem) in row.iter_mut().enumerate() {
                *elem = f(i, j);
            }
        }
        Self(data)
    }

    pub fn identity() -> Self {
        Self::from_fn(|i, j| if i == j { 1.0 } else { 0.0 })
    }

    fn zip_with(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::from_fn(|i, j| f(self.0[i][j], rhs.0[i][j]))
    }
}

impl<const N: usize> Index<(usize, usize)> for Block<N> {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.0[row][col]
    }
}

impl<const N: usize> IndexMut<(usize, usize)> for Block<N> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.0[row][col]
    }
}

impl<const N: usize> Add for Block<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Block<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<const N: usize> Neg for Block<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_fn(|i, j| -self.0[i][j])
    }
}

/// Block * Block is the matrix product.
impl<const N: usize> Mul for Block<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_fn(|i, j| (0..N).fold(0.0, |acc, k| acc + self.0[i][k] * rhs.0[k][j]))
    }
}

impl<const N: usize> BandElement for Block<N> {
    fn zero() -> Self {
        Self([[0.0; N]; N])
    }

    fn one() -> Self {
        Self::identity()
    }

    fn transpose(&self) -> Self {
        Self::from_fn(|i, j| self.0[j][i])
    }

    fn adjoint(&self) -> Self {
        self.transpose()
    }

    // Mirrors the upper triangle into the lower one.
    fn symmetrize(&self) -> Self {
        Self::from_fn(|i, j| if i <= j { self.0[i][j] } else { self.0[j][i] })
    }

    fn is_self_symmetric(&self) -> bool {
        *self == self.transpose()
    }

    fn is_real(&self) -> bool {
        true
    }
}
