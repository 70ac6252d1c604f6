//! Coefficient covariance from the triangular factor.

use faer::{Col, Mat};

use crate::core::DiagnosticsError;
use crate::factor::{invert_upper_triangular, QrFactors};

/// Compute the unscaled coefficient covariance (X'X)⁻¹.
///
/// With X = QR, (X'X)⁻¹ = (R'Q'QR)⁻¹ = (R'R)⁻¹ = R⁻¹(R⁻¹)', so only the p×p
/// triangular factor is inverted and X'X is never formed, which is
/// numerically preferable to the normal-equations route.
///
/// Fails with `SingularMatrix` when R is not invertible, e.g. for perfectly
/// collinear predictors.
pub fn variance_covariance_matrix(
    x: &Mat<f64>,
    rank_tolerance: f64,
) -> Result<Mat<f64>, DiagnosticsError> {
    let factors = QrFactors::compute(x);
    covariance_from_factors(&factors, rank_tolerance)
}

/// Covariance from pre-computed QR factors.
pub fn covariance_from_factors(
    factors: &QrFactors,
    rank_tolerance: f64,
) -> Result<Mat<f64>, DiagnosticsError> {
    let r_inv = invert_upper_triangular(factors.r(), rank_tolerance)?;
    Ok(r_inv.as_ref() * r_inv.transpose())
}

/// Standard errors of the coefficients: sqrt(MSE * (X'X)⁻¹_jj).
pub fn coefficient_standard_errors(
    factors: &QrFactors,
    mse: f64,
    rank_tolerance: f64,
) -> Result<Col<f64>, DiagnosticsError> {
    let cov = covariance_from_factors(factors, rank_tolerance)?;
    let p = cov.nrows();

    Ok(Col::from_fn(p, |j| {
        let var = mse * cov[(j, j)];
        if var >= 0.0 {
            var.sqrt()
        } else {
            f64::NAN
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covariance_equals_xtx_inverse() {
        let x = Mat::from_fn(15, 2, |i, j| if j == 0 { 1.0 } else { (i as f64).sin() });

        let cov = variance_covariance_matrix(&x, 1e-10).expect("full rank");

        let xtx = x.transpose() * x.as_ref();
        let product = xtx.as_ref() * cov.as_ref();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (product[(i, j)] - expected).abs() < 1e-8,
                    "X'X * cov differs from identity at ({i},{j}): {}",
                    product[(i, j)]
                );
            }
        }
    }

    #[test]
    fn test_covariance_is_symmetric() {
        let x = Mat::from_fn(20, 3, |i, j| match j {
            0 => 1.0,
            1 => i as f64,
            _ => (i as f64).cos(),
        });

        let cov = variance_covariance_matrix(&x, 1e-10).expect("full rank");
        for i in 0..3 {
            for j in 0..3 {
                assert!((cov[(i, j)] - cov[(j, i)]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_covariance_rejects_duplicated_column() {
        let x = Mat::from_fn(3, 2, |_, _| 1.0);

        let err = variance_covariance_matrix(&x, 1e-10).unwrap_err();
        assert!(matches!(err, DiagnosticsError::SingularMatrix));
    }

    #[test]
    fn test_standard_errors_match_manual_formula() {
        let x = Mat::from_fn(10, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
        let factors = QrFactors::compute(&x);
        let mse = 0.25;

        let se = coefficient_standard_errors(&factors, mse, 1e-10).expect("full rank");
        let cov = covariance_from_factors(&factors, 1e-10).expect("full rank");

        for j in 0..2 {
            assert!((se[j] - (mse * cov[(j, j)]).sqrt()).abs() < 1e-12);
        }
    }
}
