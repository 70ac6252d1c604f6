//! Regression diagnostics (leverage, Cook's distance, studentized residuals).
//!
//! This module provides tools for detecting influential and outlying
//! observations in a fitted OLS model:
//!
//! - **Leverage**: identifies observations with unusual predictor values
//! - **Residuals**: standardized and studentized residuals for outlier
//!   detection
//! - **Influence**: Cook's distance and DFFITS for influential point
//!   detection
//! - **Covariance**: the variance-covariance matrix of the coefficient
//!   estimates
//!
//! The free functions operate on explicit inputs; [`ModelDiagnostics`] ties
//! them together for a fitted model and memoizes the QR factorization, the
//! leverage vector, and the hat matrix across calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use olsdiag::prelude::*;
//!
//! let fit = OlsFit::new(x, residuals, mse)?;
//! let diag = ModelDiagnostics::new(&fit);
//!
//! let leverage = diag.leverage_points()?;
//! let cooks = diag.cooks_distance()?;
//! let influential = influential_cooks(&cooks, None);
//! ```

mod covariance;
mod influence;
mod leverage;
mod residuals;

pub use covariance::{
    coefficient_standard_errors, covariance_from_factors, variance_covariance_matrix,
};
pub use influence::{
    cooks_distance, cooks_distance_range, dffits, influential_cooks, influential_dffits,
};
pub use leverage::{
    hat_matrix, high_leverage_points, leverage_from_factors, leverage_points,
    saturated_leverage_points,
};
pub use residuals::{
    externally_studentized_residuals, outlier_p_values, residual_outliers,
    standardized_residuals, studentized_residuals,
};

use std::ops::Range;
use std::sync::OnceLock;

use faer::{Col, Mat};

use crate::core::{CancelToken, DiagnosticsError, DiagnosticsOptions, FittedModel};
use crate::factor::QrFactors;

/// Diagnostics for one fitted model.
///
/// Borrows the model read-only and owns the memoized intermediates (QR
/// factors, leverage vector, hat matrix), so repeated diagnostic calls do
/// not refactor the design matrix and the caller's model is never mutated.
/// Each cache cell is written at most once, which keeps concurrent
/// diagnostic calls on a shared instance safe.
pub struct ModelDiagnostics<'m, M: FittedModel> {
    model: &'m M,
    options: DiagnosticsOptions,
    factors: OnceLock<QrFactors>,
    leverage: OnceLock<Col<f64>>,
    hat: OnceLock<Mat<f64>>,
}

impl<'m, M: FittedModel> ModelDiagnostics<'m, M> {
    /// Create diagnostics for a model with default options.
    pub fn new(model: &'m M) -> Self {
        Self::with_options(model, DiagnosticsOptions::default())
    }

    /// Create diagnostics with explicit options.
    pub fn with_options(model: &'m M, options: DiagnosticsOptions) -> Self {
        Self {
            model,
            options,
            factors: OnceLock::new(),
            leverage: OnceLock::new(),
            hat: OnceLock::new(),
        }
    }

    /// The model under diagnosis.
    pub fn model(&self) -> &M {
        self.model
    }

    fn factors(&self) -> &QrFactors {
        if let Some(factors) = self.factors.get() {
            return factors;
        }
        let computed = QrFactors::compute(self.model.design_matrix());
        self.factors.get_or_init(|| computed)
    }

    fn full_rank_factors(&self) -> Result<&QrFactors, DiagnosticsError> {
        let factors = self.factors();
        let n_params = self.model.n_parameters();
        let rank = factors.rank(self.options.rank_tolerance);
        if rank < n_params {
            return Err(DiagnosticsError::RankDeficient { rank, n_params });
        }
        Ok(factors)
    }

    /// Leverage values, the diagonal of the hat matrix.
    pub fn leverage_points(&self) -> Result<&Col<f64>, DiagnosticsError> {
        if let Some(h) = self.leverage.get() {
            return Ok(h);
        }
        let computed = leverage::leverage_from_factors(self.full_rank_factors()?);
        Ok(self.leverage.get_or_init(|| computed))
    }

    /// The full hat matrix H = QₚQₚ', formed lazily on first request.
    ///
    /// [`Self::leverage_points`] alone never materializes the n×n matrix.
    pub fn hat_matrix(&self) -> Result<&Mat<f64>, DiagnosticsError> {
        if let Some(h) = self.hat.get() {
            return Ok(h);
        }
        let computed = leverage::hat_matrix(self.full_rank_factors()?);
        Ok(self.hat.get_or_init(|| computed))
    }

    /// Observations whose leverage is saturated (h == 1 within tolerance).
    pub fn saturated_leverage_points(&self) -> Result<Vec<usize>, DiagnosticsError> {
        let h = self.leverage_points()?;
        Ok(leverage::saturated_leverage_points(
            h,
            self.options.leverage_tolerance,
        ))
    }

    /// Cook's distance for every observation, computed in parallel.
    pub fn cooks_distance(&self) -> Result<Col<f64>, DiagnosticsError> {
        let h = self.leverage_points()?;
        Ok(influence::cooks_distance(
            self.model.residuals(),
            h,
            self.model.mse(),
            self.model.n_parameters(),
        ))
    }

    /// Cook's distance restricted to an index subrange, with optional
    /// cooperative cancellation.
    pub fn cooks_distance_range(
        &self,
        range: Range<usize>,
        cancel: Option<&CancelToken>,
    ) -> Result<Col<f64>, DiagnosticsError> {
        let h = self.leverage_points()?;
        influence::cooks_distance_range(
            self.model.residuals(),
            h,
            self.model.mse(),
            self.model.n_parameters(),
            range,
            cancel,
        )
    }

    /// Internally studentized residuals.
    pub fn studentized_residuals(&self) -> Result<Col<f64>, DiagnosticsError> {
        let h = self.leverage_points()?;
        Ok(residuals::studentized_residuals(self.model.residuals(), h))
    }

    /// Standardized residuals e_i / sqrt(MSE).
    pub fn standardized_residuals(&self) -> Col<f64> {
        residuals::standardized_residuals(self.model.residuals(), self.model.mse())
    }

    /// Externally studentized (deleted) residuals.
    pub fn externally_studentized_residuals(&self) -> Result<Col<f64>, DiagnosticsError> {
        let h = self.leverage_points()?;
        Ok(residuals::externally_studentized_residuals(
            self.model.residuals(),
            h,
            self.model.mse(),
            self.model.n_parameters(),
        ))
    }

    /// DFFITS for every observation.
    pub fn dffits(&self) -> Result<Col<f64>, DiagnosticsError> {
        let h = self.leverage_points()?;
        Ok(influence::dffits(
            self.model.residuals(),
            h,
            self.model.mse(),
            self.model.n_parameters(),
        ))
    }

    /// The unscaled coefficient covariance (X'X)⁻¹.
    pub fn variance_covariance_matrix(&self) -> Result<Mat<f64>, DiagnosticsError> {
        covariance::covariance_from_factors(self.factors(), self.options.rank_tolerance)
    }

    /// Coefficient standard errors sqrt(MSE * (X'X)⁻¹_jj).
    pub fn coefficient_standard_errors(&self) -> Result<Col<f64>, DiagnosticsError> {
        covariance::coefficient_standard_errors(
            self.factors(),
            self.model.mse(),
            self.options.rank_tolerance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OlsFit;

    fn simple_fit() -> OlsFit {
        let x = Mat::from_fn(3, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
        let residuals = Col::from_fn(3, |i| [0.1, -0.2, 0.1][i]);
        OlsFit::new(x, residuals, 0.01).expect("valid fit")
    }

    #[test]
    fn test_leverage_is_cached_across_calls() {
        let fit = simple_fit();
        let diag = ModelDiagnostics::new(&fit);

        let first = diag.leverage_points().expect("full rank") as *const Col<f64>;
        let second = diag.leverage_points().expect("full rank") as *const Col<f64>;
        assert_eq!(first, second, "second call must return the cached vector");
    }

    #[test]
    fn test_hat_matrix_diagonal_agrees_with_leverage() {
        let fit = simple_fit();
        let diag = ModelDiagnostics::new(&fit);

        let leverage = diag.leverage_points().expect("full rank").clone();
        let hat = diag.hat_matrix().expect("full rank");

        for i in 0..3 {
            assert!((hat[(i, i)] - leverage[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rank_deficient_model_reports_error() {
        let x = Mat::from_fn(4, 2, |i, _| (i + 1) as f64);
        let residuals = Col::zeros(4);
        let fit = OlsFit::new(x, residuals, 1.0).expect("shapes are valid");

        let diag = ModelDiagnostics::new(&fit);
        assert!(matches!(
            diag.leverage_points().unwrap_err(),
            DiagnosticsError::RankDeficient { rank: 1, n_params: 2 }
        ));
        assert!(matches!(
            diag.variance_covariance_matrix().unwrap_err(),
            DiagnosticsError::SingularMatrix
        ));
    }
}
