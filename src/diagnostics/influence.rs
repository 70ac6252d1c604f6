//! Influence measures: Cook's distance and DFFITS.

use std::ops::Range;

use faer::Col;
use rayon::prelude::*;

use crate::core::{CancelToken, DiagnosticsError};

/// Cook's distance for a single observation.
///
/// D_i = (e_i² / (p * MSE)) * (h_i / (1 - h_i)²)
///
/// Saturated leverage (h_i == 1) makes the deletion influence unbounded and
/// is reported as +infinity, never as a finite value from a floored
/// denominator. A zero residual contributes zero influence regardless of the
/// MSE, so a perfect fit yields an all-zero vector.
fn cook_stat(residual: f64, leverage: f64, mse: f64, n_params: usize) -> f64 {
    let h = leverage.clamp(0.0, 1.0);
    if 1.0 - h <= 1e-12 {
        return f64::INFINITY;
    }
    if residual == 0.0 {
        return 0.0;
    }
    if mse <= 0.0 || !mse.is_finite() || n_params == 0 {
        return f64::NAN;
    }

    let one_minus_h = 1.0 - h;
    (residual * residual / (n_params as f64 * mse)) * (h / (one_minus_h * one_minus_h))
}

/// Compute Cook's distance for every observation.
///
/// The per-observation terms are independent, so they are fanned out across
/// the rayon pool: each worker reads the shared immutable inputs and writes
/// its own slot of the pre-sized output, and the parallel join returns once
/// all n slots are filled. Output order is by observation index regardless
/// of completion order.
pub fn cooks_distance(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    let mut dists = vec![0.0f64; n];

    dists.par_iter_mut().enumerate().for_each(|(i, slot)| {
        *slot = cook_stat(residuals[i], leverage[i], mse, n_params);
    });

    Col::from_fn(n, |i| dists[i])
}

/// Compute Cook's distance for the observations in `range` only.
///
/// `out[k]` holds the distance for observation `range.start + k`. Workers
/// poll the optional token between observations; a cancelled run returns
/// `Cancelled` instead of a partially filled vector.
pub fn cooks_distance_range(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
    range: Range<usize>,
    cancel: Option<&CancelToken>,
) -> Result<Col<f64>, DiagnosticsError> {
    let n = residuals.nrows();
    if range.start > range.end || range.end > n {
        return Err(DiagnosticsError::InvalidRange {
            start: range.start,
            end: range.end,
            n,
        });
    }

    let mut dists = vec![0.0f64; range.len()];
    dists
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(k, slot)| {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(DiagnosticsError::Cancelled);
            }
            let i = range.start + k;
            *slot = cook_stat(residuals[i], leverage[i], mse, n_params);
            Ok(())
        })?;

    Ok(Col::from_fn(dists.len(), |k| dists[k]))
}

/// Compute DFFITS for each observation.
///
/// DFFITS_i = r*_i * sqrt(h_i / (1 - h_i)) where r*_i is the externally
/// studentized residual. Observations with |DFFITS_i| > 2*sqrt(p/n) are
/// typically considered influential.
pub fn dffits(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64, n_params: usize) -> Col<f64> {
    let n = residuals.nrows();
    let df_resid = n.saturating_sub(n_params);

    if df_resid <= 1 || mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let rss = mse * df_resid as f64;

    Col::from_fn(n, |i| {
        let h = leverage[i].clamp(0.0, 1.0);
        let e = residuals[i];
        if 1.0 - h <= 1e-12 {
            return if e == 0.0 { f64::NAN } else { f64::INFINITY * e.signum() };
        }

        let one_minus_h = 1.0 - h;
        let rss_loo = rss - e * e / one_minus_h;
        let df_loo = (df_resid - 1) as f64;
        if rss_loo <= 0.0 {
            return f64::NAN;
        }

        let s_loo = (rss_loo / df_loo).sqrt();
        let r_star = e / (s_loo * one_minus_h.sqrt());
        r_star * (h / one_minus_h).sqrt()
    })
}

/// Identify influential observations based on Cook's distance.
///
/// Returns indices of observations with D_i > threshold; saturated points
/// (infinite distance) always qualify. Common thresholds: 4/n or 1.
pub fn influential_cooks(cooks_d: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let n = cooks_d.nrows();
    let cutoff = threshold.unwrap_or(4.0 / n as f64);

    cooks_d
        .iter()
        .enumerate()
        .filter(|(_, &d)| !d.is_nan() && d > cutoff)
        .map(|(i, _)| i)
        .collect()
}

/// Identify influential observations based on DFFITS.
///
/// Returns indices of observations with |DFFITS_i| > threshold.
/// Common threshold: 2*sqrt(p/n).
pub fn influential_dffits(
    dffits: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let n = dffits.nrows();
    let cutoff = threshold.unwrap_or(2.0 * (n_params as f64 / n as f64).sqrt());

    dffits
        .iter()
        .enumerate()
        .filter(|(_, &d)| !d.is_nan() && d.abs() > cutoff)
        .map(|(i, _)| i)
        .collect()
}
