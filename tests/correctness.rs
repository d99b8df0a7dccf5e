//! Integration test suite to verify the band kernels against dense ground truth.
//!
//! # Test Methodology
//!
//! Every band operation has a dense counterpart that is easy to trust: materialize the
//! matrix with `to_dense` and run the same operation through `faer`. The suite follows
//! the same steps throughout:
//! 1.  **Construct a Test Matrix:** A reproducible random `Tridiagonal` or
//!     `SymTridiagonal` is generated from a seeded [`StdRng`]. Diagonally dominant
//!     matrices are used wherever a factorization is involved.
//! 2.  **Compute the Ground Truth:** The matrix is materialized and the operation is
//!     performed densely with `faer`, or compared against a closed form.
//! 3.  **Run the Band Kernel:** The O(n) implementation is executed on band storage.
//! 4.  **Verify Accuracy:** The relative error `||x_band - x_dense|| / ||x_dense||` is
//!     asserted to be within a tolerance.
//!
//! Sizes include the degenerate orders 0, 1 and 2, where the band layouts have empty or
//! single-element off-diagonals.

use anyhow::{Result, anyhow, ensure};
use banded_tridiag::{BandedErrorKind, BandedMatrix, SymTridiagonal, Tridiagonal};
use faer::{Mat, Side, prelude::*};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::PI;

/// Tolerance for kernels whose rounding error grows only with the local band sums.
const TOLERANCE: f64 = 1e-12;

/// Tolerance for factorizations and eigen-decompositions.
const SOLVER_TOLERANCE: f64 = 1e-10;

fn random_tridiagonal(n: usize, seed: u64, dominant: bool) -> Result<Tridiagonal<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let off = n.saturating_sub(1);
    let dl: Vec<f64> = (0..off).map(|_| rng.random::<f64>() - 0.5).collect();
    let du: Vec<f64> = (0..off).map(|_| rng.random::<f64>() - 0.5).collect();
    let shift = if dominant { 2.0 } else { -0.5 };
    let d: Vec<f64> = (0..n).map(|_| rng.random::<f64>() + shift).collect();
    Ok(Tridiagonal::new(dl, d, du)?)
}

fn random_symtridiagonal(n: usize, seed: u64) -> Result<SymTridiagonal<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dv: Vec<f64> = (0..n).map(|_| rng.random::<f64>() * 4.0 - 2.0).collect();
    let ev: Vec<f64> = (0..n.saturating_sub(1)).map(|_| rng.random::<f64>() - 0.5).collect();
    Ok(SymTridiagonal::new(dv, ev)?)
}

fn laplacian(n: usize) -> Result<SymTridiagonal<f64>> {
    Ok(SymTridiagonal::new(vec![2.0; n], vec![-1.0; n.saturating_sub(1)])?)
}

fn relative_error(approx: &Mat<f64>, exact: &Mat<f64>) -> f64 {
    let diff = (approx.as_ref() - exact.as_ref()).norm_l2();
    let scale = exact.norm_l2();
    if scale == 0.0 { diff } else { diff / scale }
}

/// A macro to generate the boilerplate for each dense-agreement test.
///
/// For each order in the list, the test builds a random matrix with `$build`, a
/// reproducible random right-hand side, and compares `$band` against `$dense`, both
/// given the matrix, its dense form and the right-hand side.
macro_rules! generate_dense_agreement_test {
    ($test_name:ident, $build:expr, $band:expr, $dense:expr, $tolerance:expr) => {
        #[test]
        fn $test_name() -> Result<()> {
            for (seed, n) in [0usize, 1, 2, 3, 17, 100].into_iter().enumerate() {
                let matrix = $build(n, seed as u64)?;
                let dense = matrix.to_dense();
                let mut rng = StdRng::seed_from_u64(1000 + seed as u64);
                let rhs = Mat::from_fn(n, 3, |_, _| rng.random::<f64>());

                let band_result: Mat<f64> = $band(&matrix, &rhs)?;
                let dense_result: Mat<f64> = $dense(&dense, &rhs);

                let error = relative_error(&band_result, &dense_result);
                ensure!(
                    error < $tolerance,
                    "n = {}: relative error {:.3e} exceeds tolerance {:.3e}",
                    n,
                    error,
                    $tolerance
                );
            }
            Ok(())
        }
    };
}

generate_dense_agreement_test!(
    test_symtridiagonal_multiply_matches_dense,
    random_symtridiagonal,
    |s: &SymTridiagonal<f64>, b: &Mat<f64>| s.apply(b.as_ref()),
    |a: &Mat<f64>, b: &Mat<f64>| a * b,
    TOLERANCE
);

generate_dense_agreement_test!(
    test_tridiagonal_multiply_matches_dense,
    |n, seed| random_tridiagonal(n, seed, false),
    |t: &Tridiagonal<f64>, b: &Mat<f64>| t.apply(b.as_ref()),
    |a: &Mat<f64>, b: &Mat<f64>| a * b,
    TOLERANCE
);

generate_dense_agreement_test!(
    test_tridiagonal_solve_matches_dense_lu,
    |n, seed| random_tridiagonal(n, seed, true),
    |t: &Tridiagonal<f64>, b: &Mat<f64>| -> Result<Mat<f64>> {
        let mut x = b.clone();
        t.lu()?.solve_in_place(x.as_mut())?;
        Ok(x)
    },
    |a: &Mat<f64>, b: &Mat<f64>| a.partial_piv_lu().solve(b),
    SOLVER_TOLERANCE
);

#[test]
fn test_mul_add_scales_and_accumulates() -> Result<()> {
    let t = random_tridiagonal(25, 7, false)?;
    let dense = t.to_dense();
    let mut rng = StdRng::seed_from_u64(8);
    let b = Mat::from_fn(25, 4, |_, _| rng.random::<f64>());
    let c0 = Mat::from_fn(25, 4, |_, _| rng.random::<f64>());

    for (alpha, beta) in [(1.0, 0.0), (2.5, -1.0), (0.0, 3.0), (0.0, 0.0)] {
        let ab = &dense * &b;
        let expected = Mat::from_fn(25, 4, |i, j| alpha * ab[(i, j)] + beta * c0[(i, j)]);
        let mut c = c0.clone();
        t.mul_add(&alpha, b.as_ref(), &beta, c.as_mut())?;
        let error = relative_error(&c, &expected);
        ensure!(error < TOLERANCE, "alpha = {alpha}, beta = {beta}: error {error:.3e}");
    }
    Ok(())
}

#[test]
fn test_mul_add_never_reads_c_when_beta_is_zero() -> Result<()> {
    let s = laplacian(4)?;
    let b = Mat::from_fn(4, 1, |_, _| 1.0);
    let mut c = Mat::from_fn(4, 1, |_, _| f64::NAN);
    s.mul_add(&1.0, b.as_ref(), &0.0, c.as_mut())?;
    ensure!((0..4).all(|i| c[(i, 0)].is_finite()), "NaN leaked from C");
    ensure!(c[(0, 0)] == 1.0 && c[(1, 0)] == 0.0);
    Ok(())
}

#[test]
fn test_multiply_dimension_mismatch() -> Result<()> {
    let s = laplacian(4)?;
    let b = Mat::<f64>::zeros(3, 2);
    let err = s
        .apply(b.as_ref())
        .err()
        .ok_or_else(|| anyhow!("expected a dimension mismatch"))?;
    ensure!(matches!(err.kind(), BandedErrorKind::DimensionMismatch(_)));
    Ok(())
}

#[test]
fn test_bilinear_form_matches_dense() -> Result<()> {
    for (seed, n) in [1usize, 2, 9, 64].into_iter().enumerate() {
        let s = random_symtridiagonal(n, 40 + seed as u64)?;
        let mut rng = StdRng::seed_from_u64(50 + seed as u64);
        let x: Vec<f64> = (0..n).map(|_| rng.random()).collect();
        let y: Vec<f64> = (0..n).map(|_| rng.random()).collect();

        let sy = s.mul_vec(&y)?;
        let expected: f64 = x.iter().zip(&sy).map(|(a, b)| a * b).sum();
        let actual = s.dot(&x, &y)?;
        ensure!(
            (actual - expected).abs() <= TOLERANCE * expected.abs().max(1.0),
            "n = {n}: {actual} vs {expected}"
        );
    }
    let empty = SymTridiagonal::<f64>::new(vec![], vec![])?;
    ensure!(empty.dot(&[], &[])? == 0.0);
    Ok(())
}

#[test]
fn test_dense_round_trip_preserves_matrices() -> Result<()> {
    for n in [0usize, 1, 2, 5, 30] {
        let s = random_symtridiagonal(n, n as u64)?;
        ensure!(SymTridiagonal::from_dense(s.to_dense().as_ref())? == s, "n = {n}");

        let t = random_tridiagonal(n, 100 + n as u64, false)?;
        ensure!(Tridiagonal::from_dense(t.to_dense().as_ref())? == t, "n = {n}");
    }
    Ok(())
}

#[test]
fn test_conversion_to_symmetric_succeeds_iff_symmetric() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    for trial in 0..50 {
        let n = 1 + trial % 6;
        let du: Vec<f64> = (1..n).map(|_| f64::from(rng.random_range(-2i32..=2))).collect();
        let dl: Vec<f64> = du
            .iter()
            .map(|&u| if rng.random::<f64>() < 0.3 { u + 1.0 } else { u })
            .collect();
        let d: Vec<f64> = (0..n).map(|_| rng.random()).collect();
        let t = Tridiagonal::new(dl, d, du)?;

        let converted = SymTridiagonal::try_from(&t);
        ensure!(
            converted.is_ok() == t.is_symmetric(),
            "trial {trial}: conversion and symmetry predicate disagree"
        );
        if let Ok(s) = converted {
            ensure!(s == t, "trial {trial}: converted matrix differs");
        }
    }
    Ok(())
}

#[test]
fn test_entry_access_matches_dense() -> Result<()> {
    let t = random_tridiagonal(6, 11, false)?;
    let dense = t.to_dense();
    for i in 0..6 {
        for j in 0..6 {
            ensure!(t.get(i, j)? == dense[(i, j)], "mismatch at ({i}, {j})");
        }
    }
    for k in -6isize..=6 {
        let band = t.diag(k)?;
        ensure!(band.len() == 6 - k.unsigned_abs(), "k = {k}: wrong length");
    }
    ensure!(t.diag(7).is_err() && t.get(6, 0).is_err());
    Ok(())
}

#[test]
fn test_determinant_matches_eigenvalue_product() -> Result<()> {
    for (seed, n) in [1usize, 2, 3, 8, 20].into_iter().enumerate() {
        let s = random_symtridiagonal(n, 200 + seed as u64)?;
        let eigenvalues = s
            .to_dense()
            .as_ref()
            .self_adjoint_eigenvalues(Side::Lower)
            .map_err(|e| anyhow!("eigenvalue computation failed: {e:?}"))?;
        let expected: f64 = eigenvalues.iter().product();
        let det = s.det();
        ensure!(
            (det - expected).abs() <= SOLVER_TOLERANCE * expected.abs().max(1.0),
            "n = {n}: {det} vs {expected}"
        );
    }
    Ok(())
}

#[test]
fn test_usmani_agrees_with_pivoted_lu_determinant() -> Result<()> {
    for (seed, n) in [1usize, 2, 5, 40].into_iter().enumerate() {
        let t = random_tridiagonal(n, 300 + seed as u64, false)?;
        let usmani = t.det();
        let lu = t.clone().into_lu().determinant();
        ensure!(
            (usmani - lu).abs() <= SOLVER_TOLERANCE * usmani.abs().max(1.0),
            "n = {n}: {usmani} vs {lu}"
        );
    }
    Ok(())
}

#[test]
fn test_laplacian_spectrum_and_determinant() -> Result<()> {
    for n in [1usize, 2, 10, 64] {
        let s = laplacian(n)?;
        ensure!((s.det() - (n + 1) as f64).abs() < 1e-9, "n = {n}: determinant");

        let evd = s.eigen()?;
        for (k, &lambda) in evd.eigenvalues.iter().enumerate() {
            let exact = 2.0 - 2.0 * ((k + 1) as f64 * PI / (n + 1) as f64).cos();
            ensure!((lambda - exact).abs() < SOLVER_TOLERANCE, "n = {n}, k = {k}");
        }
        let residual = relative_error(
            &s.apply(evd.eigenvectors.as_ref())?,
            &Mat::from_fn(n, n, |i, j| evd.eigenvalues[j] * evd.eigenvectors[(i, j)]),
        );
        ensure!(residual < SOLVER_TOLERANCE, "n = {n}: residual {residual:.3e}");
    }
    Ok(())
}

#[test]
fn test_inverse_iteration_on_random_spectra() -> Result<()> {
    for (seed, n) in [2usize, 7, 30].into_iter().enumerate() {
        let s = random_symtridiagonal(n, 500 + seed as u64)?;
        let values = s.eigenvalues()?;
        let vectors = s.eigenvectors_for(&values)?;
        let sv = s.apply(vectors.as_ref())?;
        let expected = Mat::from_fn(n, n, |i, j| values[j] * vectors[(i, j)]);
        let residual = relative_error(&sv, &expected);
        ensure!(residual < SOLVER_TOLERANCE, "n = {n}: residual {residual:.3e}");

        let range = s.eigenvalues_range(1..n)?;
        ensure!(range.as_slice() == &values[1..], "n = {n}: index range");
        ensure!((s.eigmin()? - values[0]).abs() == 0.0);
        ensure!((s.eigmax()? - values[n - 1]).abs() == 0.0);
    }
    Ok(())
}

#[test]
fn test_singular_solve_reports_pivot() -> Result<()> {
    // [[1, 1, 0], [1, 1, 0], [0, 0, 1]]: the first two rows coincide.
    let t = Tridiagonal::new(vec![1.0, 0.0], vec![1.0, 1.0, 1.0], vec![1.0, 0.0])?;
    let err = t
        .solve(&[1.0, 2.0, 3.0])
        .err()
        .ok_or_else(|| anyhow!("expected a singular matrix"))?;
    ensure!(matches!(err.kind(), BandedErrorKind::Singular { .. }));
    ensure!(t.det() == 0.0);
    Ok(())
}
