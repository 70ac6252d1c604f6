//! Diagnostics configuration.

use thiserror::Error;

/// Configuration for diagnostic computations.
#[derive(Debug, Clone)]
pub struct DiagnosticsOptions {
    /// Tolerance below which a diagonal entry of the triangular factor is
    /// treated as zero (default: 1e-10).
    pub rank_tolerance: f64,
    /// Tolerance for flagging a leverage value as saturated, i.e. h == 1
    /// (default: 1e-12).
    pub leverage_tolerance: f64,
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self {
            rank_tolerance: 1e-10,
            leverage_tolerance: 1e-12,
        }
    }
}

impl DiagnosticsOptions {
    /// Create a new builder for diagnostics options.
    pub fn builder() -> DiagnosticsOptionsBuilder {
        DiagnosticsOptionsBuilder::default()
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.rank_tolerance > 0.0 && self.rank_tolerance.is_finite()) {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        if !(self.leverage_tolerance > 0.0 && self.leverage_tolerance.is_finite()) {
            return Err(OptionsError::InvalidLeverageTolerance(
                self.leverage_tolerance,
            ));
        }
        Ok(())
    }
}

/// Errors that can occur when validating diagnostics options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("rank_tolerance must be positive and finite, got {0}")]
    InvalidRankTolerance(f64),
    #[error("leverage_tolerance must be positive and finite, got {0}")]
    InvalidLeverageTolerance(f64),
}

/// Builder for `DiagnosticsOptions`.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsOptionsBuilder {
    options: DiagnosticsOptions,
}

impl DiagnosticsOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rank tolerance for the triangular factor.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Set the saturation tolerance for leverage values.
    pub fn leverage_tolerance(mut self, tol: f64) -> Self {
        self.options.leverage_tolerance = tol;
        self
    }

    /// Validate and build the options.
    pub fn build(self) -> Result<DiagnosticsOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
