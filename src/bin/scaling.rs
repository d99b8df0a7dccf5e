//! Band vs. dense performance analysis.
//!
//! This executable measures how the O(n) band kernels scale against their dense
//! `faer` counterparts on a diagonally dominant random tridiagonal matrix. For every
//! order in the requested range it times
//!
//! - `multiply`: the sliding-window product `S * X` against the dense `A * X`,
//! - `solve`: the pivoted tridiagonal LU solve against `faer`'s partial pivoting LU,
//!
//! and records the stored element count of each representation. Each timing is the
//! best of `repetitions` runs. The maximum deviation between the band and the dense
//! result is logged as a sanity check.

use anyhow::{Result, ensure};
use banded_tridiag::{BandedMatrix, Tridiagonal};
use clap::{Parser, ValueEnum};
use faer::{Mat, prelude::*};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::{path::PathBuf, time::Instant};

/// The kernel being timed.
#[derive(ValueEnum, Clone, Debug, Serialize, PartialEq, Eq, Copy)]
#[serde(rename_all = "kebab-case")]
enum Operation {
    Multiply,
    Solve,
}

/// Command-line arguments for the scaling experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "scaling-runner",
    about = "Compares band and dense kernels for tridiagonal matrices of growing order."
)]
struct ScalingArgs {
    /// Smallest matrix order.
    #[clap(long, default_value_t = 100)]
    n_start: usize,
    /// Largest matrix order.
    #[clap(long, default_value_t = 2000)]
    n_end: usize,
    /// Step size for increasing the order.
    #[clap(long, default_value_t = 100)]
    n_step: usize,
    /// Number of right-hand-side columns.
    #[clap(long, default_value_t = 1)]
    rhs: usize,
    /// Timed runs per measurement; the fastest is reported.
    #[clap(long, default_value_t = 5)]
    repetitions: usize,
    /// Kernels to time. Defaults to all of them.
    #[clap(long, value_enum)]
    operation: Vec<Operation>,
    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// Represents a single row of data for the scaling CSV.
#[derive(Debug, Serialize)]
struct ScalingResult {
    operation: Operation,
    n: usize,
    band_time_s: f64,
    dense_time_s: f64,
    band_elements: usize,
    dense_elements: usize,
}

/// Runs `f` `repetitions` times and returns the fastest wall-clock time.
fn best_of<R>(repetitions: usize, mut f: impl FnMut() -> Result<R>) -> Result<(f64, R)> {
    let start = Instant::now();
    let mut out = f()?;
    let mut best = start.elapsed().as_secs_f64();
    for _ in 1..repetitions {
        let start = Instant::now();
        out = f()?;
        best = best.min(start.elapsed().as_secs_f64());
    }
    Ok((best, out))
}

fn max_deviation(a: &Mat<f64>, b: &Mat<f64>) -> f64 {
    let mut worst = 0.0_f64;
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            worst = worst.max((a[(i, j)] - b[(i, j)]).abs());
        }
    }
    worst
}

/// Generates a random tridiagonal matrix with a dominant diagonal.
fn random_tridiagonal(n: usize, rng: &mut StdRng) -> Result<Tridiagonal<f64>> {
    let dl: Vec<f64> = (1..n).map(|_| rng.random::<f64>() - 0.5).collect();
    let du: Vec<f64> = (1..n).map(|_| rng.random::<f64>() - 0.5).collect();
    let d: Vec<f64> = (0..n).map(|_| 2.0 + rng.random::<f64>()).collect();
    Ok(Tridiagonal::new(dl, d, du)?)
}

fn run_single(
    op: Operation,
    t: &Tridiagonal<f64>,
    x: &Mat<f64>,
    repetitions: usize,
) -> Result<ScalingResult> {
    let n = t.order();
    let dense = t.to_dense();
    let (band_time_s, dense_time_s, deviation) = match op {
        Operation::Multiply => {
            let (band_time, band) = best_of(repetitions, || Ok(t.apply(x.as_ref())?))?;
            let (dense_time, reference) = best_of(repetitions, || Ok(&dense * x))?;
            (band_time, dense_time, max_deviation(&band, &reference))
        }
        Operation::Solve => {
            let (band_time, band) = best_of(repetitions, || {
                let lu = t.lu()?;
                let mut sol = x.clone();
                lu.solve_in_place(sol.as_mut())?;
                Ok(sol)
            })?;
            let (dense_time, reference) =
                best_of(repetitions, || Ok(dense.partial_piv_lu().solve(x)))?;
            (band_time, dense_time, max_deviation(&band, &reference))
        }
    };
    log::info!(
        "{op:?} n = {n}: band {band_time_s:.3e}s, dense {dense_time_s:.3e}s, \
         deviation {deviation:.3e}"
    );
    Ok(ScalingResult {
        operation: op,
        n,
        band_time_s,
        dense_time_s,
        band_elements: t.stored_len(),
        dense_elements: n * n,
    })
}

/// The main entry point for the scaling experiment.
fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = ScalingArgs::parse();
    ensure!(args.n_start >= 1, "n_start must be at least 1");
    ensure!(args.n_step >= 1, "n_step must be at least 1");
    ensure!(args.repetitions >= 1, "repetitions must be at least 1");
    let operations = if args.operation.is_empty() {
        vec![Operation::Multiply, Operation::Solve]
    } else {
        args.operation.clone()
    };
    log::info!(
        "Starting scaling experiment for n in [{}, {}] (step {}), operations {operations:?}",
        args.n_start,
        args.n_end,
        args.n_step
    );

    // Fixed seed for reproducibility.
    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&args.output)?;
    for n in (args.n_start..=args.n_end).step_by(args.n_step) {
        let t = random_tridiagonal(n, &mut rng)?;
        let x = Mat::from_fn(n, args.rhs, |_, _| rng.random::<f64>());
        for &op in &operations {
            writer.serialize(run_single(op, &t, &x, args.repetitions)?)?;
        }
    }
    writer.flush()?;

    log::info!("Scaling experiment complete. Results written to {}", args.output.display());
    Ok(())
}
