//! Common test utilities and data generators.

use faer::{Col, Mat};
use olsdiag::OlsFit;

/// Deterministic pseudo-random value in [-1, 1].
fn next_rand(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    ((*state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
}

/// Generate a full-rank design matrix (intercept + noisy predictors).
pub fn generate_design_matrix(n_samples: usize, n_params: usize, seed: u64) -> Mat<f64> {
    let mut rng_state = seed;
    let mut x = Mat::zeros(n_samples, n_params);

    for i in 0..n_samples {
        for j in 0..n_params {
            x[(i, j)] = if j == 0 {
                1.0
            } else {
                i as f64 * j as f64 * 0.1 + next_rand(&mut rng_state)
            };
        }
    }

    x
}

/// Generate a residual vector with the given seed.
pub fn generate_residuals(n_samples: usize, seed: u64) -> Col<f64> {
    let mut rng_state = seed;
    Col::from_fn(n_samples, |_| next_rand(&mut rng_state) * 0.5)
}

/// Build a validated fit around a generated design and residuals.
///
/// The MSE is taken as RSS / (n - p), the way an external OLS solver would
/// report it.
pub fn generate_fit(n_samples: usize, n_params: usize, seed: u64) -> OlsFit {
    let x = generate_design_matrix(n_samples, n_params, seed);
    let residuals = generate_residuals(n_samples, seed ^ 0x9e3779b97f4a7c15);

    let rss: f64 = residuals.iter().map(|&e| e * e).sum();
    let mse = rss / (n_samples - n_params) as f64;

    OlsFit::new(x, residuals, mse).expect("generated shapes are valid")
}

/// Hand-checkable three-point scenario: intercept plus one predictor
/// taking the values 1, 2, 3.
pub fn three_point_fit() -> OlsFit {
    let x = Mat::from_fn(3, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
    let residuals = Col::from_fn(3, |i| [0.1, -0.2, 0.1][i]);
    OlsFit::new(x, residuals, 0.01).expect("shapes are valid")
}

/// A design matrix with a duplicated column (rank deficient).
pub fn duplicated_column_fit() -> OlsFit {
    let x = Mat::from_fn(3, 2, |_, _| 1.0);
    let residuals = Col::zeros(3);
    OlsFit::new(x, residuals, 1.0).expect("shapes are valid")
}
