//! Post-fit diagnostics for ordinary least squares regression.
//!
//! Given a fitted OLS model (design matrix, residual vector, and mean
//! squared error), this library computes the influence and outlier
//! diagnostics derived from the QR factorization of the design matrix:
//!
//! - **Leverage**: the diagonal of the hat matrix H = QₚQₚ'
//! - **Cook's distance**: combined leverage/residual influence, fanned out
//!   across observations on the rayon pool
//! - **Studentized residuals**: residuals scaled by their leverage-adjusted
//!   standard deviation
//! - **Coefficient covariance**: (X'X)⁻¹ obtained by inverting the
//!   triangular factor, without ever forming X'X
//!
//! Fitting the model (coefficients, residuals, MSE) is the caller's job;
//! diagnostics consume the fit through the [`core::FittedModel`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use olsdiag::prelude::*;
//! use faer::{Col, Mat};
//!
//! // Design matrix (intercept + one predictor) and fit outputs from an
//! // external OLS solver.
//! let x = Mat::from_fn(3, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
//! let residuals = Col::from_fn(3, |i| [0.1, -0.2, 0.1][i]);
//! let fit = OlsFit::new(x, residuals, 0.01)?;
//!
//! let diag = ModelDiagnostics::new(&fit);
//! let leverage = diag.leverage_points()?;
//! let cooks = diag.cooks_distance()?;
//! let cov = diag.variance_covariance_matrix()?;
//! ```

pub mod core;
pub mod diagnostics;
pub mod factor;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CancelToken, DiagnosticsError, DiagnosticsOptions, DiagnosticsOptionsBuilder, FittedModel,
        OlsFit,
    };
    pub use crate::diagnostics::{
        cooks_distance, cooks_distance_range, leverage_points, studentized_residuals,
        variance_covariance_matrix, ModelDiagnostics,
    };
    pub use crate::factor::QrFactors;
}

pub use crate::core::{
    CancelToken, DiagnosticsError, DiagnosticsOptions, DiagnosticsOptionsBuilder, FittedModel,
    OlsFit,
};
pub use crate::diagnostics::ModelDiagnostics;
