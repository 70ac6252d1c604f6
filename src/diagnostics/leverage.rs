//! Leverage (hat matrix diagonal) calculations.

use faer::{Col, Mat};

use crate::core::DiagnosticsError;
use crate::factor::QrFactors;

/// Compute leverage values from the thin orthogonal factor.
///
/// h_i is the i-th diagonal entry of H = QₚQₚ', which equals the squared
/// Euclidean norm of the i-th row of Qₚ. The full hat matrix is never
/// formed here.
///
/// # Properties
/// - h_i ∈ [0, 1]
/// - Σ h_i = p (trace of an idempotent projection)
/// - h_i == 1 means the fit at observation i is fully determined by the
///   observation itself (saturation); downstream diagnostics are infinite
///   there but the value itself is legitimate
pub fn leverage_from_factors(factors: &QrFactors) -> Col<f64> {
    let q = factors.q();
    let n = q.nrows();
    let p = q.ncols();

    Col::from_fn(n, |i| {
        let h: f64 = (0..p).map(|j| q[(i, j)] * q[(i, j)]).sum();
        h.clamp(0.0, 1.0)
    })
}

/// Compute leverage values for a design matrix.
///
/// Fails with `RankDeficient` when the columns of `x` are linearly
/// dependent, since the projection onto the column space is no longer
/// p-dimensional and the leverage invariants do not hold.
pub fn leverage_points(x: &Mat<f64>, rank_tolerance: f64) -> Result<Col<f64>, DiagnosticsError> {
    let factors = QrFactors::compute(x);
    let rank = factors.rank(rank_tolerance);
    if rank < x.ncols() {
        return Err(DiagnosticsError::RankDeficient {
            rank,
            n_params: x.ncols(),
        });
    }

    Ok(leverage_from_factors(&factors))
}

/// Form the full hat matrix H = QₚQₚ'.
///
/// H is n×n; callers that only need leverage should prefer
/// [`leverage_from_factors`], which reads the diagonal without the
/// quadratic-memory product.
pub fn hat_matrix(factors: &QrFactors) -> Mat<f64> {
    let q = factors.q();
    q.as_ref() * q.transpose()
}

/// Indices of observations whose leverage is saturated (1 - h <= tolerance).
///
/// Cook's distance and studentized residuals are infinite at these points;
/// the rest of the diagnostic vectors stay valid.
pub fn saturated_leverage_points(leverage: &Col<f64>, tolerance: f64) -> Vec<usize> {
    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| 1.0 - h <= tolerance)
        .map(|(i, _)| i)
        .collect()
}

/// Identify high leverage points.
///
/// Returns indices of observations with leverage > threshold.
/// Default threshold is 2p/n where p is the number of parameters.
pub fn high_leverage_points(
    leverage: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let n = leverage.nrows();
    let cutoff = threshold.unwrap_or(2.0 * n_params as f64 / n as f64);

    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > cutoff)
        .map(|(i, _)| i)
        .collect()
}
