//! Standardized and studentized residuals.

use faer::Col;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::utils::sample_std_dev;

/// Compute standardized residuals: e_i / s, where s = sqrt(MSE).
pub fn standardized_residuals(residuals: &Col<f64>, mse: f64) -> Col<f64> {
    let n = residuals.nrows();

    if mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(n, |i| if residuals[i] == 0.0 { 0.0 } else { f64::NAN });
    }

    let s = mse.sqrt();
    Col::from_fn(n, |i| residuals[i] / s)
}

/// Compute internally studentized residuals.
///
/// t_i = e_i / (σ * sqrt(1 - h_i)), where σ is the sample standard deviation
/// of the residual vector, computed once. Sequential; the per-element work
/// is too cheap to justify parallel dispatch.
///
/// Saturated leverage (h_i == 1) zeroes the denominator; the ratio is
/// reported as ±infinity (NaN for a zero residual), leaving the remaining
/// entries valid.
pub fn studentized_residuals(residuals: &Col<f64>, leverage: &Col<f64>) -> Col<f64> {
    let n = residuals.nrows();
    let sigma = sample_std_dev(residuals);

    Col::from_fn(n, |i| {
        let h = leverage[i].clamp(0.0, 1.0);
        let e = residuals[i];
        if 1.0 - h <= 1e-12 {
            return if e == 0.0 { f64::NAN } else { f64::INFINITY * e.signum() };
        }
        e / (sigma * (1.0 - h).sqrt())
    })
}

/// Compute externally studentized residuals (deleted residuals).
///
/// Uses the leave-one-out MSE: e_i / (s_(i) * sqrt(1 - h_i)), where s_(i)
/// is the residual standard error computed without observation i. Under the
/// null these follow a t-distribution with n - p - 1 degrees of freedom.
pub fn externally_studentized_residuals(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    let df_resid = n.saturating_sub(n_params);

    if df_resid <= 1 || mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let rss = mse * df_resid as f64;
    let df_loo = (df_resid - 1) as f64;

    Col::from_fn(n, |i| {
        let h = leverage[i].clamp(0.0, 1.0);
        let e = residuals[i];
        if 1.0 - h <= 1e-12 {
            return if e == 0.0 { f64::NAN } else { f64::INFINITY * e.signum() };
        }

        let one_minus_h = 1.0 - h;
        let rss_loo = rss - e * e / one_minus_h;
        if rss_loo <= 0.0 {
            return f64::NAN;
        }

        let mse_loo = rss_loo / df_loo;
        e / (mse_loo.sqrt() * one_minus_h.sqrt())
    })
}

/// Identify outliers based on studentized residuals.
///
/// Returns indices of observations with |t_i| > threshold.
/// Common thresholds are 2 or 3.
pub fn residual_outliers(studentized: &Col<f64>, threshold: f64) -> Vec<usize> {
    studentized
        .iter()
        .enumerate()
        .filter(|(_, &t)| t.abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Two-tailed p-values for an outlier test on externally studentized
/// residuals, which follow t(n - p - 1) under the null hypothesis that the
/// observation is not an outlier.
pub fn outlier_p_values(ext_studentized: &Col<f64>, n_params: usize) -> Col<f64> {
    let n = ext_studentized.nrows();
    let df = n as f64 - n_params as f64 - 1.0;

    let t_dist = if df > 0.0 {
        StudentsT::new(0.0, 1.0, df).ok()
    } else {
        None
    };

    Col::from_fn(n, |i| {
        let t = ext_studentized[i];
        match (&t_dist, t.is_finite()) {
            (Some(dist), true) => 2.0 * (1.0 - dist.cdf(t.abs())),
            (Some(_), false) if t.is_infinite() => 0.0,
            _ => f64::NAN,
        }
    })
}
