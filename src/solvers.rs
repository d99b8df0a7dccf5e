//! Eigen-decomposition of real symmetric tridiagonal matrices.
//!
//! The band types do not implement an eigensolver themselves. They hand their diagonal
//! and off-diagonal to a collaborator implementing [`TridiagonalEigensolver`], which
//! must be able to compute
//!
//! - the full decomposition (eigenvalues ascending, orthonormal eigenvectors as columns),
//! - eigenvalues only,
//! - eigenpairs restricted to an index range or a value interval,
//! - eigenvectors for an explicit set of eigenvalues.
//!
//! [`FaerEigensolver`] is the default collaborator. It delegates the decomposition to
//! [`faer`]'s self-adjoint eigensolver and computes eigenvectors for given eigenvalues
//! by inverse iteration on the shifted matrix, using the crate's own pivoted
//! tridiagonal LU.
//!
//! [`EigenProblem`] binds a matrix to a collaborator, validates ranges and intervals,
//! and derives `eigmin`, `eigmax` and the singular values. The shorthand methods on
//! [`SymTridiagonal<f64>`] use [`FaerEigensolver`].

use crate::{
    algorithms::lu::TridiagonalLu,
    bands,
    error::{BandedError, BandedErrorKind, Result},
    symtridiagonal::SymTridiagonal,
    tridiagonal::Tridiagonal,
};
use faer::{Mat, Side};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::ops::Range;

/// Number of inverse iteration sweeps per eigenvector.
const INVERSE_ITERATIONS: usize = 3;

/// How many times the shift is pushed away from an exactly singular shifted matrix.
const MAX_SHIFT_RETRIES: usize = 8;

/// Eigenvalues closer than this multiple of the matrix norm are treated as a cluster
/// and their eigenvectors are explicitly re-orthogonalized.
const CLUSTER_TOLERANCE: f64 = 1e-3;

const INVERSE_ITERATION_SEED: u64 = 0x7269_6469_6167;

/// Eigenvalues and eigenvectors of a real symmetric matrix.
#[derive(Clone, Debug)]
pub struct SymmetricEigen {
    /// Eigenvalues in ascending order.
    pub eigenvalues: Vec<f64>,
    /// Orthonormal eigenvectors; column `j` belongs to `eigenvalues[j]`.
    pub eigenvectors: Mat<f64>,
}

impl SymmetricEigen {
    /// Keeps only the eigenpairs at the given positions, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        let n = self.eigenvectors.nrows();
        Self {
            eigenvalues: indices.iter().map(|&j| self.eigenvalues[j]).collect(),
            eigenvectors: Mat::from_fn(n, indices.len(), |i, j| {
                self.eigenvectors[(i, indices[j])]
            }),
        }
    }
}

/// An external capability that diagonalizes a real symmetric tridiagonal matrix given
/// its diagonal `dv` (length `n`) and off-diagonal `ev` (length `n - 1`).
///
/// Range and interval variants have default implementations that filter the full
/// result; a collaborator with a native restricted solver can override them.
pub trait TridiagonalEigensolver {
    /// Full eigen-decomposition, eigenvalues ascending.
    fn eigen(&self, dv: &[f64], ev: &[f64]) -> Result<SymmetricEigen>;

    /// Eigenvalues only, ascending.
    fn eigenvalues(&self, dv: &[f64], ev: &[f64]) -> Result<Vec<f64>>;

    /// Unit eigenvectors for the given eigenvalues, one column per value.
    fn eigenvectors_for(&self, dv: &[f64], ev: &[f64], eigenvalues: &[f64])
    -> Result<Mat<f64>>;

    /// Eigenpairs with 0-based ascending positions in `range`.
    fn eigen_in_range(
        &self,
        dv: &[f64],
        ev: &[f64],
        range: Range<usize>,
    ) -> Result<SymmetricEigen> {
        let full = self.eigen(dv, ev)?;
        Ok(full.select(&range.collect::<Vec<_>>()))
    }

    /// Eigenvalues with 0-based ascending positions in `range`.
    fn eigenvalues_in_range(
        &self,
        dv: &[f64],
        ev: &[f64],
        range: Range<usize>,
    ) -> Result<Vec<f64>> {
        let values = self.eigenvalues(dv, ev)?;
        Ok(values[range].to_vec())
    }

    /// Eigenpairs with `lower < λ <= upper`.
    fn eigen_in_interval(
        &self,
        dv: &[f64],
        ev: &[f64],
        lower: f64,
        upper: f64,
    ) -> Result<SymmetricEigen> {
        let full = self.eigen(dv, ev)?;
        let indices: Vec<usize> = full
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|&(_, &l)| lower < l && l <= upper)
            .map(|(j, _)| j)
            .collect();
        Ok(full.select(&indices))
    }

    /// Eigenvalues with `lower < λ <= upper`.
    fn eigenvalues_in_interval(
        &self,
        dv: &[f64],
        ev: &[f64],
        lower: f64,
        upper: f64,
    ) -> Result<Vec<f64>> {
        let values = self.eigenvalues(dv, ev)?;
        Ok(values.into_iter().filter(|&l| lower < l && l <= upper).collect())
    }
}

/// The default collaborator, backed by [`faer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FaerEigensolver;

impl TridiagonalEigensolver for FaerEigensolver {
    fn eigen(&self, dv: &[f64], ev: &[f64]) -> Result<SymmetricEigen> {
        bands::check_symmetric_lengths(dv.len(), ev.len())?;
        let n = dv.len();
        if n == 0 {
            return Ok(SymmetricEigen {
                eigenvalues: Vec::new(),
                eigenvectors: Mat::zeros(0, 0),
            });
        }
        let dense = assemble_dense(dv, ev);
        let evd = dense
            .as_ref()
            .self_adjoint_eigen(Side::Lower)
            .map_err(|e| BandedError::from(BandedErrorKind::EvdError(e)))?;
        let s = evd.S();
        let u = evd.U();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| s[a].total_cmp(&s[b]));
        Ok(SymmetricEigen {
            eigenvalues: order.iter().map(|&j| s[j]).collect(),
            eigenvectors: Mat::from_fn(n, n, |i, j| u[(i, order[j])]),
        })
    }

    fn eigenvalues(&self, dv: &[f64], ev: &[f64]) -> Result<Vec<f64>> {
        bands::check_symmetric_lengths(dv.len(), ev.len())?;
        if dv.is_empty() {
            return Ok(Vec::new());
        }
        let dense = assemble_dense(dv, ev);
        let mut values = dense
            .as_ref()
            .self_adjoint_eigenvalues(Side::Lower)
            .map_err(|e| BandedError::from(BandedErrorKind::EvdError(e)))?;
        values.sort_by(f64::total_cmp);
        Ok(values)
    }

    fn eigenvectors_for(
        &self,
        dv: &[f64],
        ev: &[f64],
        eigenvalues: &[f64],
    ) -> Result<Mat<f64>> {
        bands::check_symmetric_lengths(dv.len(), ev.len())?;
        inverse_iteration(dv, &ev[..bands::offdiag_len(dv.len())], eigenvalues)
    }
}

/// Assembles the dense symmetric matrix handed to faer. `ev` must hold at least
/// `dv.len() - 1` entries.
fn assemble_dense(dv: &[f64], ev: &[f64]) -> Mat<f64> {
    let n = dv.len();
    let mut a = Mat::zeros(n, n);
    for (i, &d) in dv.iter().enumerate() {
        a.as_mut()[(i, i)] = d;
    }
    for (i, &e) in ev.iter().take(n.saturating_sub(1)).enumerate() {
        a.as_mut()[(i, i + 1)] = e;
        a.as_mut()[(i + 1, i)] = e;
    }
    a
}

/// Inverse iteration: repeatedly solves `(T - σI) x = x` with σ next to each requested
/// eigenvalue, so that `x` converges to the corresponding eigenvector. `ev` has exactly
/// `dv.len() - 1` entries.
fn inverse_iteration(dv: &[f64], ev: &[f64], eigenvalues: &[f64]) -> Result<Mat<f64>> {
    let n = dv.len();
    let k = eigenvalues.len();
    if n == 0 {
        return Ok(Mat::zeros(0, k));
    }
    let norm = dv
        .iter()
        .chain(ev)
        .fold(0.0_f64, |m, x| m.max(x.abs()))
        .max(f64::MIN_POSITIVE);
    let cluster_tol = CLUSTER_TOLERANCE * norm;
    let mut rng = StdRng::seed_from_u64(INVERSE_ITERATION_SEED);
    let mut vectors: Vec<Vec<f64>> = Vec::with_capacity(k);

    for &lambda in eigenvalues {
        let lu = shifted_lu(dv, ev, lambda, norm)?;
        let mut x: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
        for _ in 0..INVERSE_ITERATIONS {
            if !normalize(&mut x) {
                x.iter_mut().for_each(|xi| *xi = rng.random_range(-1.0..1.0));
                normalize(&mut x);
            }
            lu.solve_vec_in_place(&mut x)?;
            for (prev, &mu) in vectors.iter().zip(eigenvalues) {
                if (mu - lambda).abs() <= cluster_tol {
                    let proj: f64 = prev.iter().zip(&x).map(|(p, xi)| p * xi).sum();
                    x.iter_mut().zip(prev).for_each(|(xi, p)| *xi -= proj * p);
                }
            }
        }
        normalize(&mut x);
        fix_sign(&mut x);
        vectors.push(x);
    }
    Ok(Mat::from_fn(n, k, |i, j| vectors[j][i]))
}

/// Factorizes `T - (λ + δ)I`, growing `δ` until the factorization is nonsingular.
fn shifted_lu(dv: &[f64], off: &[f64], lambda: f64, norm: f64) -> Result<TridiagonalLu<f64>> {
    let mut delta = f64::EPSILON * norm;
    let mut attempt = 0;
    loop {
        let sigma = lambda + delta;
        let diagonal = dv.iter().map(|d| d - sigma).collect();
        let shifted = Tridiagonal::new(off.to_vec(), diagonal, off.to_vec())?;
        let lu = shifted.into_lu();
        let Some(index) = lu.zero_pivot() else {
            return Ok(lu);
        };
        attempt += 1;
        if attempt == MAX_SHIFT_RETRIES {
            return Err(BandedErrorKind::Singular { index }.into());
        }
        log::warn!(
            "shifted matrix is exactly singular at σ = {sigma}; \
             perturbing the shift (attempt {attempt})"
        );
        delta *= 10.0;
    }
}

fn normalize(x: &mut [f64]) -> bool {
    let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return false;
    }
    x.iter_mut().for_each(|v| *v /= norm);
    true
}

/// Makes the largest-magnitude component positive.
fn fix_sign(x: &mut [f64]) {
    let pivot = x.iter().copied().fold(0.0_f64, |m, v| if v.abs() > m.abs() { v } else { m });
    if pivot < 0.0 {
        x.iter_mut().for_each(|v| *v = -*v);
    }
}

/// A real symmetric tridiagonal matrix bound to an eigensolver collaborator.
pub struct EigenProblem<'a, S> {
    dv: &'a [f64],
    ev: &'a [f64],
    solver: S,
}

impl<S: TridiagonalEigensolver> EigenProblem<'_, S> {
    fn order(&self) -> usize {
        self.dv.len()
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.order() {
            return Err(BandedError::argument(format!(
                "eigenvalue index range {range:?} must lie within 0..{}",
                self.order()
            )));
        }
        Ok(())
    }

    fn check_interval(lower: f64, upper: f64) -> Result<()> {
        if !(lower < upper) {
            return Err(BandedError::argument(format!(
                "eigenvalue interval ({lower}, {upper}] is empty or invalid"
            )));
        }
        Ok(())
    }

    fn check_nonempty(&self) -> Result<()> {
        if self.order() == 0 {
            return Err(BandedError::argument("matrix is empty; it has no eigenvalues"));
        }
        Ok(())
    }

    pub fn eigen(&self) -> Result<SymmetricEigen> {
        log::debug!("delegating eigen-decomposition of order {}", self.order());
        self.solver.eigen(self.dv, self.ev)
    }

    pub fn eigenvalues(&self) -> Result<Vec<f64>> {
        log::debug!("delegating eigenvalue computation of order {}", self.order());
        self.solver.eigenvalues(self.dv, self.ev)
    }

    /// Eigenpairs with 0-based ascending positions in `range`.
    pub fn eigen_range(&self, range: Range<usize>) -> Result<SymmetricEigen> {
        self.check_range(&range)?;
        self.solver.eigen_in_range(self.dv, self.ev, range)
    }

    pub fn eigenvalues_range(&self, range: Range<usize>) -> Result<Vec<f64>> {
        self.check_range(&range)?;
        self.solver.eigenvalues_in_range(self.dv, self.ev, range)
    }

    /// Eigenpairs with `lower < λ <= upper`.
    pub fn eigen_interval(&self, lower: f64, upper: f64) -> Result<SymmetricEigen> {
        Self::check_interval(lower, upper)?;
        self.solver.eigen_in_interval(self.dv, self.ev, lower, upper)
    }

    pub fn eigenvalues_interval(&self, lower: f64, upper: f64) -> Result<Vec<f64>> {
        Self::check_interval(lower, upper)?;
        self.solver.eigenvalues_in_interval(self.dv, self.ev, lower, upper)
    }

    pub fn eigenvectors_for(&self, eigenvalues: &[f64]) -> Result<Mat<f64>> {
        log::debug!(
            "delegating {} eigenvector computations of order {}",
            eigenvalues.len(),
            self.order()
        );
        self.solver.eigenvectors_for(self.dv, self.ev, eigenvalues)
    }

    pub fn eigmin(&self) -> Result<f64> {
        self.check_nonempty()?;
        Ok(self.eigenvalues_range(0..1)?[0])
    }

    pub fn eigmax(&self) -> Result<f64> {
        self.check_nonempty()?;
        let n = self.order();
        Ok(self.eigenvalues_range(n - 1..n)?[0])
    }

    /// Singular values: absolute eigenvalues in descending order.
    pub fn singular_values(&self) -> Result<Vec<f64>> {
        let mut values: Vec<f64> = self.eigenvalues()?.into_iter().map(f64::abs).collect();
        values.sort_by(|a, b| b.total_cmp(a));
        Ok(values)
    }
}

impl SymTridiagonal<f64> {
    /// Binds this matrix to an eigensolver collaborator.
    pub fn eigensolver<S: TridiagonalEigensolver>(&self, solver: S) -> EigenProblem<'_, S> {
        EigenProblem {
            dv: &self.dv,
            ev: self.effective_ev(),
            solver,
        }
    }

    pub fn eigen(&self) -> Result<SymmetricEigen> {
        self.eigensolver(FaerEigensolver).eigen()
    }

    pub fn eigenvalues(&self) -> Result<Vec<f64>> {
        self.eigensolver(FaerEigensolver).eigenvalues()
    }

    pub fn eigen_range(&self, range: Range<usize>) -> Result<SymmetricEigen> {
        self.eigensolver(FaerEigensolver).eigen_range(range)
    }

    pub fn eigenvalues_range(&self, range: Range<usize>) -> Result<Vec<f64>> {
        self.eigensolver(FaerEigensolver).eigenvalues_range(range)
    }

    pub fn eigen_interval(&self, lower: f64, upper: f64) -> Result<SymmetricEigen> {
        self.eigensolver(FaerEigensolver).eigen_interval(lower, upper)
    }

    pub fn eigenvalues_interval(&self, lower: f64, upper: f64) -> Result<Vec<f64>> {
        self.eigensolver(FaerEigensolver).eigenvalues_interval(lower, upper)
    }

    pub fn eigenvectors_for(&self, eigenvalues: &[f64]) -> Result<Mat<f64>> {
        self.eigensolver(FaerEigensolver).eigenvectors_for(eigenvalues)
    }

    pub fn eigmin(&self) -> Result<f64> {
        self.eigensolver(FaerEigensolver).eigmin()
    }

    pub fn eigmax(&self) -> Result<f64> {
        self.eigensolver(FaerEigensolver).eigmax()
    }

    pub fn singular_values(&self) -> Result<Vec<f64>> {
        self.eigensolver(FaerEigensolver).singular_values()
    }
}
