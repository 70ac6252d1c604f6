//! Fitted-model capability interface and diagnostics errors.

use faer::{Col, Mat};
use thiserror::Error;

/// Errors that can occur while computing diagnostics.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("design matrix is rank deficient: rank {rank} with {n_params} columns")]
    RankDeficient { rank: usize, n_params: usize },

    #[error("triangular factor is singular or nearly singular")]
    SingularMatrix,

    #[error("dimension mismatch: design matrix has {x_rows} rows but residual vector has {residuals} elements")]
    DimensionMismatch { x_rows: usize, residuals: usize },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("observation range {start}..{end} out of bounds for {n} observations")]
    InvalidRange { start: usize, end: usize, n: usize },

    #[error("diagnostic computation was cancelled")]
    Cancelled,
}

/// Read-only view of a fitted OLS model.
///
/// The concrete fitting logic (coefficient estimation, residual computation)
/// lives outside this crate; diagnostics only need the design matrix, the
/// residual vector, and the mean squared error of the fit.
pub trait FittedModel {
    /// Number of observations n (rows of the design matrix).
    fn n_observations(&self) -> usize {
        self.design_matrix().nrows()
    }

    /// Number of parameters p (columns of the design matrix, intercept
    /// column included if the model has one).
    fn n_parameters(&self) -> usize {
        self.design_matrix().ncols()
    }

    /// The n×p design matrix, n >= p.
    fn design_matrix(&self) -> &Mat<f64>;

    /// Residuals y - ŷ, length n.
    fn residuals(&self) -> &Col<f64>;

    /// Mean squared error of the fit.
    fn mse(&self) -> f64;
}

/// Plain holder for the outputs of an external OLS fit.
///
/// Validates dimensions on construction so every downstream diagnostic can
/// rely on n >= p and matching residual length.
#[derive(Debug, Clone)]
pub struct OlsFit {
    design: Mat<f64>,
    residuals: Col<f64>,
    mse: f64,
}

impl OlsFit {
    /// Wrap fit outputs, checking shapes.
    pub fn new(design: Mat<f64>, residuals: Col<f64>, mse: f64) -> Result<Self, DiagnosticsError> {
        if design.nrows() != residuals.nrows() {
            return Err(DiagnosticsError::DimensionMismatch {
                x_rows: design.nrows(),
                residuals: residuals.nrows(),
            });
        }
        if design.nrows() < design.ncols() {
            return Err(DiagnosticsError::InsufficientObservations {
                needed: design.ncols(),
                got: design.nrows(),
            });
        }

        Ok(Self {
            design,
            residuals,
            mse,
        })
    }
}

impl FittedModel for OlsFit {
    fn design_matrix(&self) -> &Mat<f64> {
        &self.design
    }

    fn residuals(&self) -> &Col<f64> {
        &self.residuals
    }

    fn mse(&self) -> f64 {
        self.mse
    }
}
